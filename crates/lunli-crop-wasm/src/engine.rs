//! Crop engine WASM bindings.
//!
//! [`JsCropEngine`] wraps the core `CropEngine` for the crop screen. The host
//! forwards touch gestures to it, reads back the crop and display rectangles
//! for drawing, and calls `crop()` when the user confirms.
//!
//! # Example
//!
//! ```typescript
//! import { JsCropEngine, decode_image } from '@lunli/crop-wasm';
//!
//! const engine = new JsCropEngine(view.clientWidth, view.clientHeight);
//! engine.set_mode(0); // Square
//! engine.attach_image(decode_image(bytes)); // throws on a malformed buffer
//! engine.set_on_crop((image) => {
//!   if (image) upload(image);
//! });
//!
//! view.onpointerdown = (e) => engine.on_touch_down(e.offsetX, e.offsetY);
//! view.onpointermove = (e) => engine.on_pan(e.movementX, e.movementY);
//! view.onpointerup = () => engine.on_touch_up();
//! view.ondblclick = () => engine.on_double_tap();
//!
//! confirmButton.onclick = () => engine.crop();
//! ```

use crate::types::{corner_from_u8, mode_from_u8, mode_to_u8, JsDecodedImage};
use lunli_crop_core::encode::encode_jpeg_base64;
use lunli_crop_core::{CropConfig, CropEngine, CropError, Point};
use wasm_bindgen::prelude::*;

fn to_js_error(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Interactive crop engine for JavaScript.
#[wasm_bindgen]
pub struct JsCropEngine {
    inner: CropEngine,
    on_crop: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl JsCropEngine {
    /// Create an engine for a view of the given size, with the default
    /// configuration and Square mode.
    #[wasm_bindgen(constructor)]
    pub fn new(view_width: f64, view_height: f64) -> JsCropEngine {
        JsCropEngine {
            inner: CropEngine::new(view_width, view_height),
            on_crop: None,
        }
    }

    /// Replace the configuration from a plain object. Missing fields take
    /// their defaults.
    pub fn set_config(&mut self, value: JsValue) -> Result<(), JsValue> {
        let config: CropConfig = serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        self.inner.set_config(config).map_err(to_js_error)
    }

    /// Current configuration as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config()).map_err(to_js_error)
    }

    /// Mode code: 0 = Square, 1 = ScreenRatio, 2 = FullScreen.
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> u8 {
        mode_to_u8(self.inner.mode())
    }

    /// Switch mode by code; discards scale, pan and crop adjustments.
    pub fn set_mode(&mut self, mode: u8) {
        self.inner.set_mode(mode_from_u8(mode));
    }

    pub fn set_view_size(&mut self, width: f64, height: f64) {
        self.inner.set_view_size(width, height);
    }

    /// Attach a copy of `image` as the crop source.
    ///
    /// Fails when the pixel buffer is not `width * height * 3` bytes long;
    /// the current image is kept in that case.
    pub fn attach_image(&mut self, image: &JsDecodedImage) -> Result<(), JsValue> {
        let image = image.to_decoded();
        if !image.has_consistent_buffer() {
            return Err(to_js_error(CropError::CorruptImage {
                expected: image.expected_len(),
                actual: image.pixels.len(),
            }));
        }
        self.inner.attach_image(image);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.transform().scale
    }

    pub fn on_scale(&mut self, factor: f64, focal_x: f64, focal_y: f64) {
        self.inner.on_scale(factor, Point::new(focal_x, focal_y));
    }

    /// Start a touch. Returns the drag target as a plain value:
    /// `"image"`, `"crop_rect"` or `{ corner: "top_left" }`.
    pub fn on_touch_down(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let target = self.inner.on_touch_down(Point::new(x, y));
        serde_wasm_bindgen::to_value(&target).map_err(to_js_error)
    }

    pub fn on_pan(&mut self, dx: f64, dy: f64) {
        self.inner.on_pan(dx, dy);
    }

    pub fn on_touch_up(&mut self) {
        self.inner.on_touch_up();
    }

    /// Drag a corner handle directly. Corner codes run clockwise from
    /// top-left (0..=3).
    pub fn on_corner_drag(&mut self, corner: u8, dx: f64, dy: f64) {
        self.inner.on_corner_drag(corner_from_u8(corner), dx, dy);
    }

    pub fn on_double_tap(&mut self) {
        self.inner.on_double_tap();
    }

    /// Crop rectangle in view pixels: `{ left, top, right, bottom }`.
    pub fn crop_rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.crop_rect()).map_err(to_js_error)
    }

    /// On-screen image rectangle after scale and pan.
    pub fn display_rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.display_rect()).map_err(to_js_error)
    }

    /// Register the listener that receives crop results.
    pub fn set_on_crop(&mut self, callback: js_sys::Function) {
        self.on_crop = Some(callback);
    }

    pub fn clear_on_crop(&mut self) {
        self.on_crop = None;
    }

    /// Crop and hand the result to the listener.
    ///
    /// The listener receives a `JsDecodedImage`, or `null` when the crop
    /// fails; failures are also logged to the console. Returns whether a
    /// crop was produced.
    pub fn crop(&self) -> Result<bool, JsValue> {
        let (result, cropped) = match self.inner.crop_image() {
            Ok(image) => (JsValue::from(JsDecodedImage::from_decoded(image)), true),
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!("crop failed: {e}")));
                (JsValue::NULL, false)
            }
        };

        if let Some(callback) = &self.on_crop {
            callback.call1(&JsValue::NULL, &result)?;
        }
        Ok(cropped)
    }

    /// Crop and return the result directly.
    pub fn crop_image(&self) -> Result<JsDecodedImage, JsValue> {
        self.inner
            .crop_image()
            .map(JsDecodedImage::from_decoded)
            .map_err(to_js_error)
    }

    /// Crop and encode as base64 JPEG at the configured quality, ready for
    /// upload.
    pub fn crop_jpeg_base64(&self) -> Result<String, JsValue> {
        let image = self.inner.crop_image().map_err(to_js_error)?;
        encode_jpeg_base64(&image, self.inner.config().jpeg_quality).map_err(to_js_error)
    }
}

/// Tests for engine bindings that do not touch `JsValue`.
#[cfg(test)]
mod tests {
    use super::*;
    use lunli_crop_core::{CropMode, Rect};

    fn test_image(width: u32, height: u32) -> JsDecodedImage {
        let pixels: Vec<u8> = (0..(width * height * 3) as usize)
            .map(|i| (i % 256) as u8)
            .collect();
        JsDecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_new_engine() {
        let engine = JsCropEngine::new(1000.0, 800.0);
        assert_eq!(engine.mode(), 0);
        assert!(!engine.has_image());
        assert_eq!(engine.scale(), 1.0);
    }

    #[test]
    fn test_set_mode_by_code() {
        let mut engine = JsCropEngine::new(1000.0, 800.0);
        engine.set_mode(1);
        assert_eq!(engine.inner.mode(), CropMode::ScreenRatio);
        engine.set_mode(200);
        assert_eq!(engine.mode(), 0);
    }

    #[test]
    fn test_gestures_forwarded() {
        let mut engine = JsCropEngine::new(1000.0, 1000.0);
        engine.attach_image(&test_image(100, 100)).unwrap();
        assert!(engine.has_image());

        engine.on_scale(2.0, 500.0, 500.0);
        assert_eq!(engine.scale(), 2.0);

        engine.on_double_tap();
        assert_eq!(engine.scale(), 1.0);

        engine.on_corner_drag(2, -100.0, -100.0);
        assert_eq!(engine.inner.crop_rect(), Rect::new(150.0, 150.0, 750.0, 750.0));
    }

    #[test]
    fn test_pan_moves_image() {
        let mut engine = JsCropEngine::new(1000.0, 1000.0);
        engine.attach_image(&test_image(10, 10)).unwrap();
        engine.on_pan(25.0, -10.0);
        engine.on_touch_up();
        assert_eq!(engine.inner.transform().translation, Point::new(25.0, -10.0));
    }

    #[test]
    fn test_view_size_resets() {
        let mut engine = JsCropEngine::new(1000.0, 1000.0);
        engine.attach_image(&test_image(10, 10)).unwrap();
        engine.on_scale(3.0, 0.0, 0.0);
        engine.set_view_size(400.0, 400.0);
        assert_eq!(engine.scale(), 1.0);
        assert_eq!(engine.inner.view_size(), (400.0, 400.0));
    }
}
