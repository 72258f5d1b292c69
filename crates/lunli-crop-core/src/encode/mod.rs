//! Image encoding for crop results.
//!
//! This module provides functionality for:
//! - Encoding images to JPEG format with configurable quality
//! - Encoding JPEG output as base64 text for upload

mod jpeg;

pub use jpeg::{encode_image_jpeg, encode_jpeg, encode_jpeg_base64, EncodeError};
