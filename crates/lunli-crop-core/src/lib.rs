//! Lunli Crop Core - image cropping library
//!
//! This crate provides the geometry and pixel work behind the avatar and
//! photo crop screens: an interactive crop engine driven by touch gestures,
//! the display transform it manipulates, pixel-buffer cropping, and the
//! decode/encode steps around them.
//!
//! # Example Flow
//!
//! 1. Decode the picked file with [`decode::decode_image`]
//! 2. Attach it to a [`CropEngine`] sized to the crop view
//! 3. Feed gestures (`on_scale`, `on_touch_down`, `on_pan`, `on_double_tap`)
//! 4. Call [`CropEngine::crop_image`] and encode the result with
//!    [`encode::encode_jpeg_base64`]
//!
//! The crate never installs a `tracing` subscriber; embedding applications
//! decide where engine logs go.

pub mod decode;
pub mod encode;
pub mod engine;
pub mod geometry;
pub mod transform;

pub use engine::{
    ConfigError, CropConfig, CropEngine, CropError, CropMode, CropPlan, DragTarget,
    ParseModeError, SizeLimits,
};
pub use geometry::{Corner, Point, Rect};
pub use transform::{
    apply_crop, avatar_thumbnail, center_square, extract_region, DisplayTransform, PixelRect,
};
