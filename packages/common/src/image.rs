//! Decoding of base64 image data URIs sent by API clients.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("image must be a data URI of the form data:image/<format>;base64,<payload>")]
    Malformed,
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("image payload is not valid base64")]
    InvalidBase64,
    #[error("image payload is empty")]
    Empty,
}

/// Raw bytes and file extension of a decoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
}

fn extension_for(format: &str) -> Option<&'static str> {
    match format.to_ascii_lowercase().as_str() {
        "png" => Some("png"),
        "jpeg" | "jpg" => Some("jpg"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        _ => None,
    }
}

/// Decode `data:image/<format>;base64,<payload>`.
pub fn decode_data_uri(input: &str) -> Result<DecodedImage, ImageError> {
    let rest = input
        .trim()
        .strip_prefix("data:image/")
        .ok_or(ImageError::Malformed)?;
    let (format, payload) = rest.split_once(";base64,").ok_or(ImageError::Malformed)?;

    let extension =
        extension_for(format).ok_or_else(|| ImageError::UnsupportedFormat(format.to_string()))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|_| ImageError::InvalidBase64)?;
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }

    Ok(DecodedImage { bytes, extension })
}
