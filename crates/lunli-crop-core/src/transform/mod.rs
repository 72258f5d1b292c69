//! Image-space transforms: the on-screen display transform and pixel cropping.
//!
//! # Coordinate System
//!
//! - The display transform works in view pixels (`f64`) and scales about a
//!   pivot point, normally the view center
//! - Pixel crops work in integer source-image pixels
//! - Normalized crops ([`apply_crop`]) use 0.0 to 1.0 relative to the image
//! - Origin is the top-left corner everywhere

mod crop;
mod display;

pub use crop::{apply_crop, avatar_thumbnail, center_square, extract_region, PixelRect};
pub use display::{DisplayTransform, MIN_INVERTIBLE_SCALE};
