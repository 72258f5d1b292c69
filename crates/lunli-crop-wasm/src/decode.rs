//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG or PNG file, applying EXIF orientation
//! - [`decode_base64_image`] - Decode base64 text or a `data:` URI
//! - [`decode_base64_image_fit`] - Decode base64 and downscale to a max edge
//! - [`resize`] - Resize an image to exact dimensions
//! - [`resize_to_fit`] - Resize an image to fit within a max edge
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_to_fit } from '@lunli/crop-wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const preview = resize_to_fit(image, 2048, 1); // Bilinear
//! ```

use crate::types::{filter_from_u8, JsDecodedImage};
use lunli_crop_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG image from bytes.
///
/// EXIF orientation is applied so the result is upright.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or the file is
/// corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode an image from base64 text.
///
/// Accepts bare base64 or a full `data:image/...;base64,` URI. Whitespace
/// and line breaks in the payload are ignored.
#[wasm_bindgen]
pub fn decode_base64_image(text: &str) -> Result<JsDecodedImage, JsValue> {
    decode::decode_base64_image(text)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode an image from base64 text and shrink it so its longest edge is at
/// most `max_edge` pixels.
#[wasm_bindgen]
pub fn decode_base64_image_fit(text: &str, max_edge: u32) -> Result<JsDecodedImage, JsValue> {
    decode::decode_base64_image_fit(text, max_edge)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to exact dimensions.
///
/// `filter`: 0 = Nearest, 1 = Bilinear (default), 2 = Lanczos3.
///
/// # Errors
///
/// Returns an error if width or height is zero.
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize(&image.to_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image so its longest edge is `max_edge`, preserving aspect
/// ratio. Smaller images are returned unchanged.
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsDecodedImage,
    max_edge: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize_to_fit(&image.to_decoded(), max_edge, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
