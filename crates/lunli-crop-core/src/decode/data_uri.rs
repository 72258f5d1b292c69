//! Decoding of base64-encoded images, as stored in user profiles.
//!
//! Accepts bare base64 as well as `data:image/...;base64,` URIs. Line breaks
//! and other whitespace inside the payload are ignored.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::{decode_image, resize_to_fit, DecodeError, DecodedImage, FilterType};

/// Strip an optional data-URI header and surrounding whitespace.
pub fn strip_data_uri(text: &str) -> &str {
    let payload = if let Some((_, rest)) = text.split_once("base64,") {
        rest
    } else if text.contains("data:image") {
        text.split_once(',').map_or(text, |(_, rest)| rest)
    } else {
        text
    };
    payload.trim()
}

/// Decode raw bytes from base64 text, with or without a data-URI header.
pub fn decode_base64_bytes(text: &str) -> Result<Vec<u8>, DecodeError> {
    let payload: String = strip_data_uri(text)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))
}

/// Decode an image from base64 text.
pub fn decode_base64_image(text: &str) -> Result<DecodedImage, DecodeError> {
    decode_image(&decode_base64_bytes(text)?)
}

/// Decode an image from base64 text, shrinking it so its longest edge is at
/// most `max_edge`.
pub fn decode_base64_image_fit(text: &str, max_edge: u32) -> Result<DecodedImage, DecodeError> {
    let image = decode_base64_image(text)?;
    resize_to_fit(&image, max_edge, FilterType::Bilinear)
}
