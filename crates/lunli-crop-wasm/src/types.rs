//! WASM-compatible wrapper types and numeric code conversions.
//!
//! JavaScript callers pass enums as small integers; the helpers here map
//! those codes onto the core crate's types.

use lunli_crop_core::decode::{DecodedImage, FilterType};
use lunli_crop_core::{Corner, CropMode};
use wasm_bindgen::prelude::*;

/// A decoded RGB image held in WASM memory.
///
/// Calling `pixels()` copies the buffer into a JavaScript `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from dimensions and RGB pixel data (3 bytes per
    /// pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as a `Uint8Array` copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Release the WASM memory now instead of waiting for the finalizer.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Clone into a core image for passing to core functions.
    ///
    /// The buffer length is not checked; callers that keep the image use
    /// `has_consistent_buffer` on the result.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Convert a filter code to the core `FilterType`.
///
/// 0 = Nearest, 1 = Bilinear, 2 = Lanczos3. Any other value defaults to
/// Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// Convert a mode code to a `CropMode`.
///
/// 0 = Square, 1 = ScreenRatio, 2 = FullScreen. Unknown codes fall back to
/// Square.
pub(crate) fn mode_from_u8(value: u8) -> CropMode {
    match value {
        1 => CropMode::ScreenRatio,
        2 => CropMode::FullScreen,
        _ => CropMode::Square,
    }
}

pub(crate) fn mode_to_u8(mode: CropMode) -> u8 {
    match mode {
        CropMode::Square => 0,
        CropMode::ScreenRatio => 1,
        CropMode::FullScreen => 2,
    }
}

/// Convert a corner code (clockwise from top-left) to a `Corner`.
///
/// Unknown codes fall back to TopLeft.
pub(crate) fn corner_from_u8(value: u8) -> Corner {
    match value {
        1 => Corner::TopRight,
        2 => Corner::BottomRight,
        3 => Corner::BottomLeft,
        _ => Corner::TopLeft,
    }
}
