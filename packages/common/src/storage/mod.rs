//! Content-addressed storage for uploaded media (avatars, recipe images).

mod error;
mod hash;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use hash::{ContentHash, MediaName};
pub use traits::MediaStore;
