//! Resolved crop requests.
//!
//! A [`CropPlan`] is the result of mapping the on-screen crop rectangle back
//! onto the source image. It owns a shared handle to the source pixels, so it
//! can be moved to another thread and executed there while the engine keeps
//! handling gestures.

use std::sync::Arc;

use thiserror::Error;

use crate::decode::DecodedImage;
use crate::transform::{extract_region, PixelRect};

/// Reasons a crop cannot be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    #[error("No image attached")]
    NoImage,

    /// The attached pixel buffer does not match the image dimensions.
    #[error("Image buffer holds {actual} bytes, expected {expected}")]
    CorruptImage { expected: usize, actual: usize },

    #[error("Crop view has zero area")]
    EmptyView,

    /// The display transform cannot be inverted.
    #[error("Display transform is not invertible (scale = {scale})")]
    SingularTransform { scale: f64 },

    /// The image was placed into a zero-area rectangle.
    #[error("Image placement has zero area")]
    DegeneratePlacement,

    /// The crop rectangle does not cover any part of the image.
    #[error("Crop rectangle does not overlap the image")]
    OutsideImage,
}

/// A crop ready to be executed against its source image.
#[derive(Debug, Clone)]
pub struct CropPlan {
    source: Arc<DecodedImage>,
    region: Option<PixelRect>,
}

impl CropPlan {
    /// Plan that returns the source unmodified.
    pub(crate) fn full_frame(source: Arc<DecodedImage>) -> Self {
        Self {
            source,
            region: None,
        }
    }

    pub(crate) fn region(source: Arc<DecodedImage>, region: PixelRect) -> Self {
        Self {
            source,
            region: Some(region),
        }
    }

    /// Pixel region to extract, or `None` for a full-frame plan.
    pub fn pixel_rect(&self) -> Option<PixelRect> {
        self.region
    }

    pub fn is_full_frame(&self) -> bool {
        self.region.is_none()
    }

    pub fn source(&self) -> &DecodedImage {
        &self.source
    }

    /// Produce the cropped image.
    pub fn execute(&self) -> DecodedImage {
        match self.region {
            Some(region) => extract_region(&self.source, region),
            None => DecodedImage::clone(&self.source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn image(width: u32, height: u32) -> Arc<DecodedImage> {
        let pixels = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        Arc::new(DecodedImage::new(width, height, pixels))
    }

    #[test]
    fn test_full_frame_plan_returns_source() {
        let src = image(8, 4);
        let plan = CropPlan::full_frame(Arc::clone(&src));
        assert!(plan.is_full_frame());
        assert_eq!(plan.pixel_rect(), None);
        assert_eq!(plan.execute(), *src);
    }

    #[test]
    fn test_region_plan_extracts() {
        let plan = CropPlan::region(image(8, 4), PixelRect::new(2, 1, 3, 2));
        let out = plan.execute();
        assert_eq!((out.width, out.height), (3, 2));
        assert_eq!(plan.source().width, 8);
    }

    #[test]
    fn test_plan_executes_on_another_thread() {
        let plan = CropPlan::region(image(16, 16), PixelRect::new(4, 4, 8, 8));
        let handle = thread::spawn(move || plan.execute());
        let out = handle.join().unwrap();
        assert_eq!((out.width, out.height), (8, 8));
    }

    #[test]
    fn test_crop_error_display() {
        assert_eq!(CropError::NoImage.to_string(), "No image attached");
        assert_eq!(
            CropError::SingularTransform { scale: 0.0 }.to_string(),
            "Display transform is not invertible (scale = 0)"
        );
        assert_eq!(
            CropError::CorruptImage {
                expected: 30000,
                actual: 30
            }
            .to_string(),
            "Image buffer holds 30 bytes, expected 30000"
        );
    }
}
