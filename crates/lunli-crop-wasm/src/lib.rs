//! Lunli Crop WASM - WebAssembly bindings for the Lunli crop engine
//!
//! This crate exposes `lunli-crop-core` to JavaScript/TypeScript so the web
//! client can share the crop screen logic with the mobile apps.
//!
//! # Module Structure
//!
//! - `engine` - Interactive crop engine driven by touch gestures
//! - `types` - WASM-compatible wrapper types and enum codes
//! - `decode` - Image decoding bindings (JPEG/PNG, base64, resize)
//! - `encode` - Image encoding bindings (JPEG, base64 JPEG)
//! - `transform` - Pixel-buffer crops (normalized, center square, avatar)
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsCropEngine } from '@lunli/crop-wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const engine = new JsCropEngine(640, 640);
//! engine.attach_image(image);
//! const cropped = engine.crop_image();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod engine;
mod transform;
mod types;

pub use decode::{decode_base64_image, decode_base64_image_fit, decode_image, resize, resize_to_fit};
pub use encode::{encode_jpeg, encode_jpeg_base64, encode_jpeg_from_image};
pub use engine::JsCropEngine;
pub use transform::{apply_crop, avatar_thumbnail, center_square};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
