//! Pixel-buffer cropping operations.
//!
//! Two coordinate flavours are supported:
//!
//! - [`extract_region`] takes an integer [`PixelRect`] in source pixels. This
//!   is what the crop engine produces after mapping its view-space rectangle
//!   back onto the image.
//! - [`apply_crop`] takes normalized coordinates (0.0 to 1.0) relative to the
//!   image dimensions.
//!
//! Both clamp out-of-range input instead of failing, and never produce an
//! image smaller than 1x1 from a non-empty source.

use serde::{Deserialize, Serialize};

use crate::decode::{resize, DecodeError, DecodedImage, FilterType};

/// Integer crop region in source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from floating-point pixel values.
    ///
    /// Casts saturate: negative values and NaN become 0, oversized values
    /// become `u32::MAX`. Follow with [`PixelRect::clamp_to`].
    pub fn from_f64(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x as u32, y as u32, width as u32, height as u32)
    }

    /// Clamp so that `x + width <= image_width`, `y + height <= image_height`
    /// and both dimensions are at least 1.
    ///
    /// An empty image yields an all-zero rectangle.
    pub fn clamp_to(self, image_width: u32, image_height: u32) -> Self {
        if image_width == 0 || image_height == 0 {
            return Self::default();
        }

        let x = self.x.min(image_width - 1);
        let y = self.y.min(image_height - 1);
        let width = self.width.clamp(1, image_width - x);
        let height = self.height.clamp(1, image_height - y);

        Self::new(x, y, width, height)
    }

    /// Check that the rectangle lies fully inside an image of the given size.
    pub fn fits_within(&self, image_width: u32, image_height: u32) -> bool {
        self.width >= 1
            && self.height >= 1
            && self.x as u64 + self.width as u64 <= image_width as u64
            && self.y as u64 + self.height as u64 <= image_height as u64
    }
}

/// Copy a rectangular region out of an image.
///
/// The region is clamped to the image bounds first. Returns a clone when the
/// region covers the whole image, and an empty image when the source buffer
/// does not match its dimensions.
pub fn extract_region(image: &DecodedImage, region: PixelRect) -> DecodedImage {
    if !image.has_consistent_buffer() {
        return DecodedImage::new(0, 0, Vec::new());
    }

    let region = region.clamp_to(image.width, image.height);

    if region.width == 0 || region.height == 0 {
        return DecodedImage::new(0, 0, Vec::new());
    }

    // Fast path: full image
    if region.x == 0 && region.y == 0 && region.width == image.width && region.height == image.height
    {
        return image.clone();
    }

    let src_stride = image.width as usize * 3;
    let row_bytes = region.width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * region.height as usize);

    // Copy pixel data row by row
    for y in region.y..region.y + region.height {
        let start = y as usize * src_stride + region.x as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    DecodedImage::new(region.width, region.height, output)
}

/// Apply crop to an image using normalized coordinates.
///
/// # Arguments
///
/// * `image` - Source image to crop
/// * `left` - Left edge of crop region (0.0 to 1.0)
/// * `top` - Top edge of crop region (0.0 to 1.0)
/// * `width` - Width of crop region (0.0 to 1.0)
/// * `height` - Height of crop region (0.0 to 1.0)
///
/// Coordinates beyond the image are clamped; the output is at least 1x1.
pub fn apply_crop(
    image: &DecodedImage,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> DecodedImage {
    let src_w = image.width as f64;
    let src_h = image.height as f64;

    let region = PixelRect::from_f64(
        (left.clamp(0.0, 1.0) * src_w).round(),
        (top.clamp(0.0, 1.0) * src_h).round(),
        (width.clamp(0.0, 1.0) * src_w).round(),
        (height.clamp(0.0, 1.0) * src_h).round(),
    );

    extract_region(image, region)
}

/// The largest centered square of an image.
pub fn center_square(image: &DecodedImage) -> DecodedImage {
    let side = image.width.min(image.height);
    let region = PixelRect::new(
        (image.width - side) / 2,
        (image.height - side) / 2,
        side,
        side,
    );
    extract_region(image, region)
}

/// Centered square crop scaled to `size x size`, as used for avatars.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for a zero `size`, an empty image or
/// a pixel buffer that does not match the dimensions.
pub fn avatar_thumbnail(
    image: &DecodedImage,
    size: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if image.is_empty() || !image.has_consistent_buffer() {
        return Err(DecodeError::InvalidFormat);
    }
    resize(&center_square(image), size, size, filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v); // R
                pixels.push(v); // G
                pixels.push(v); // B
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_extract_region_values() {
        let img = test_image(10, 10);
        let result = extract_region(&img, PixelRect::new(2, 3, 4, 5));

        assert_eq!(result.width, 4);
        assert_eq!(result.height, 5);
        // First pixel comes from (2, 3): 3 * 10 + 2 = 32
        assert_eq!(result.pixels[0], 32);
        // Last pixel comes from (5, 7): 7 * 10 + 5 = 75
        assert_eq!(result.pixels[result.pixels.len() - 1], 75);
    }

    #[test]
    fn test_extract_full_region_is_identical() {
        let img = test_image(20, 15);
        let result = extract_region(&img, PixelRect::new(0, 0, 20, 15));
        assert_eq!(result, img);
    }

    #[test]
    fn test_extract_region_clamps_overflow() {
        let img = test_image(10, 10);
        let result = extract_region(&img, PixelRect::new(8, 8, 50, 50));
        assert_eq!(result.width, 2);
        assert_eq!(result.height, 2);
    }

    #[test]
    fn test_extract_region_origin_past_bounds() {
        let img = test_image(10, 10);
        let result = extract_region(&img, PixelRect::new(100, 100, 5, 5));
        // Clamped to the last pixel
        assert_eq!(result.width, 1);
        assert_eq!(result.height, 1);
        assert_eq!(result.pixels[0], 99);
    }

    #[test]
    fn test_extract_region_zero_size_becomes_one_pixel() {
        let img = test_image(10, 10);
        let result = extract_region(&img, PixelRect::new(4, 4, 0, 0));
        assert_eq!(result.width, 1);
        assert_eq!(result.height, 1);
    }

    #[test]
    fn test_extract_region_empty_image() {
        let img = DecodedImage::new(0, 0, vec![]);
        let result = extract_region(&img, PixelRect::new(0, 0, 5, 5));
        assert!(result.is_empty());
    }

    #[test]
    fn test_extract_region_short_buffer() {
        let img = DecodedImage {
            width: 100,
            height: 100,
            pixels: vec![7u8; 30],
        };
        let result = extract_region(&img, PixelRect::new(15, 15, 70, 70));
        assert!(result.is_empty());
        assert!(center_square(&img).is_empty());
    }

    #[test]
    fn test_pixel_rect_from_f64_saturates() {
        let r = PixelRect::from_f64(-12.0, f64::NAN, 1e20, 3.7);
        assert_eq!(r, PixelRect::new(0, 0, u32::MAX, 3));
    }

    #[test]
    fn test_pixel_rect_clamp() {
        let r = PixelRect::new(90, 5, 40, 0).clamp_to(100, 50);
        assert_eq!(r, PixelRect::new(90, 5, 10, 1));
        assert!(r.fits_within(100, 50));
    }

    #[test]
    fn test_apply_crop_center() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, 0.2, 0.2, 0.6, 0.6);

        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);
        // Value at (2, 2) = 2 * 10 + 2 = 22
        assert_eq!(result.pixels[0], 22);
    }

    #[test]
    fn test_apply_crop_negative_and_oversized() {
        let img = test_image(100, 100);
        let result = apply_crop(&img, -0.1, -0.1, 1.5, 1.5);
        assert_eq!(result, img);
    }

    #[test]
    fn test_center_square_landscape() {
        let img = test_image(30, 10);
        let result = center_square(&img);
        assert_eq!((result.width, result.height), (10, 10));
        // Starts at column 10
        assert_eq!(result.pixels[0], 10);
    }

    #[test]
    fn test_center_square_portrait() {
        let img = test_image(10, 30);
        let result = center_square(&img);
        assert_eq!((result.width, result.height), (10, 10));
        // Starts at row 10: 10 * 10 = 100
        assert_eq!(result.pixels[0], 100);
    }

    #[test]
    fn test_avatar_thumbnail() {
        let img = test_image(300, 200);
        let avatar = avatar_thumbnail(&img, 64, FilterType::Bilinear).unwrap();
        assert_eq!((avatar.width, avatar.height), (64, 64));
        assert_eq!(avatar.pixels.len(), 64 * 64 * 3);
    }

    #[test]
    fn test_avatar_thumbnail_errors() {
        let img = test_image(30, 20);
        assert!(avatar_thumbnail(&img, 0, FilterType::Bilinear).is_err());

        let empty = DecodedImage::new(0, 0, vec![]);
        assert!(avatar_thumbnail(&empty, 32, FilterType::Bilinear).is_err());

        let short = DecodedImage {
            width: 30,
            height: 20,
            pixels: vec![0u8; 12],
        };
        assert!(matches!(
            avatar_thumbnail(&short, 32, FilterType::Bilinear),
            Err(DecodeError::InvalidFormat)
        ));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
