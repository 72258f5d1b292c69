//! WASM bindings for pixel-buffer crop operations.

use crate::types::{filter_from_u8, JsDecodedImage};
use lunli_crop_core::transform;
use wasm_bindgen::prelude::*;

/// Crop using normalized coordinates (0.0 to 1.0), top-left origin.
///
/// ```typescript
/// // Center 50% of the image
/// const cropped = apply_crop(image, 0.25, 0.25, 0.5, 0.5);
/// ```
#[wasm_bindgen]
pub fn apply_crop(
    image: &JsDecodedImage,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> JsDecodedImage {
    let result = transform::apply_crop(&image.to_decoded(), left, top, width, height);
    JsDecodedImage::from_decoded(result)
}

/// Largest centered square of the image.
#[wasm_bindgen]
pub fn center_square(image: &JsDecodedImage) -> JsDecodedImage {
    JsDecodedImage::from_decoded(transform::center_square(&image.to_decoded()))
}

/// Centered square scaled to `size x size`, for avatars.
///
/// `filter`: 0 = Nearest, 1 = Bilinear (default), 2 = Lanczos3.
#[wasm_bindgen]
pub fn avatar_thumbnail(
    image: &JsDecodedImage,
    size: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    transform::avatar_thumbnail(&image.to_decoded(), size, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
