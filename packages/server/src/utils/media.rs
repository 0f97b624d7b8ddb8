use axum::extract::DefaultBodyLimit;
use common::image::{ImageError, decode_data_uri};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Room left for the non-image fields of a JSON body.
const JSON_OVERHEAD: u64 = 64 * 1024;

/// Body limit for JSON requests that carry one base64 image of up to `max_size` bytes.
pub fn media_body_limit(max_size: u64) -> DefaultBodyLimit {
    let encoded = max_size.div_ceil(3).saturating_mul(4);
    let limit = encoded.saturating_add(JSON_OVERHEAD);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

/// Decode a base64 image data URI and store it, returning the media name.
pub async fn store_data_uri(state: &AppState, data_uri: &str) -> Result<String, AppError> {
    let image = decode_data_uri(data_uri).map_err(image_error)?;
    let name = state.media.put(&image.bytes, image.extension).await?;
    Ok(name.to_string())
}

/// Absolute URL under which a stored media file is served.
pub fn media_url(config: &AppConfig, name: &str) -> String {
    format!(
        "{}/media/{}",
        config.server.public_url.trim_end_matches('/'),
        name
    )
}

fn image_error(err: ImageError) -> AppError {
    AppError::Validation(format!("Invalid image: {err}"))
}
