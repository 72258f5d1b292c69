//! Image decoding for the crop pipeline.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG images with EXIF orientation correction
//! - Decoding base64 / data-URI encoded images
//! - Image resizing for avatars and previews
//!
//! All operations are synchronous and single-threaded.

mod data_uri;
mod raster;
mod resize;
mod types;

pub use data_uri::{
    decode_base64_bytes, decode_base64_image, decode_base64_image_fit, strip_data_uri,
};
pub use raster::{decode_image, decode_image_no_orientation, get_orientation};
pub use resize::{resize, resize_to_fit, scale_by_ratio};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
