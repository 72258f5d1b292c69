//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode RGB pixel data to JPEG bytes
//! - [`encode_jpeg_from_image`] - Encode a `JsDecodedImage` to JPEG bytes
//! - [`encode_jpeg_base64`] - Encode a `JsDecodedImage` to base64 JPEG text
//!
//! # Example
//!
//! ```typescript
//! import { encode_jpeg_base64 } from '@lunli/crop-wasm';
//!
//! const avatar = encode_jpeg_base64(cropped, 90);
//! await api.uploadAvatar(avatar);
//! ```

use crate::types::JsDecodedImage;
use lunli_crop_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100.
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match
/// `width * height * 3` or either dimension is zero.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a `JsDecodedImage` to JPEG bytes.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_image_jpeg(&image.to_decoded(), quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a `JsDecodedImage` to JPEG and return standard base64 text
/// without a `data:` header.
#[wasm_bindgen]
pub fn encode_jpeg_base64(image: &JsDecodedImage, quality: u8) -> Result<String, JsValue> {
    encode::encode_jpeg_base64(&image.to_decoded(), quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
