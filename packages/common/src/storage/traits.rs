use async_trait::async_trait;

use super::error::StorageError;
use super::hash::MediaName;

/// Content-addressed media storage.
///
/// Identical uploads share one stored file, so a file may be referenced by
/// several rows and is never removed when a single reference goes away.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store bytes under the given extension and return the media name.
    async fn put(&self, data: &[u8], extension: &str) -> Result<MediaName, StorageError>;

    /// Retrieve all bytes of a stored file.
    async fn get(&self, name: &MediaName) -> Result<Vec<u8>, StorageError>;
}
