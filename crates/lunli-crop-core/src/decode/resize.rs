//! Image resizing for avatars and memory-bounded previews.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for zero target dimensions, and
/// `DecodeError::CorruptedFile` if the pixel buffer doesn't match the
/// declared size.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Resize an image so its longest edge is at most `max_edge`, preserving
/// aspect ratio. Images that already fit are returned unchanged.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = calculate_fit_dimensions(image.width, image.height, max_edge);
    resize(image, new_width, new_height, filter)
}

/// Scale both dimensions by `ratio`, truncating to whole pixels (minimum 1).
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for a non-finite or non-positive ratio.
pub fn scale_by_ratio(
    image: &DecodedImage,
    ratio: f64,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(DecodeError::InvalidFormat);
    }

    let width = ((image.width as f64 * ratio) as u32).max(1);
    let height = ((image.height as f64 * ratio) as u32).max(1);
    resize(image, width, height, filter)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8); // R
                pixels.push(((y * 255) / height.max(1)) as u8); // G
                pixels.push(128); // B
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions_is_clone() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Lanczos3).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(resize(&img, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_mismatched_buffer() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0u8; 12],
        };
        assert!(matches!(
            resize(&img, 5, 5, FilterType::Nearest),
            Err(DecodeError::CorruptedFile(_))
        ));
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let img = create_test_image(600, 400);
        let resized = resize_to_fit(&img, 256, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 256);
        assert_eq!(resized.height, 171); // 400 * (256/600) ≈ 170.67
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let img = create_test_image(400, 600);
        let resized = resize_to_fit(&img, 256, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 171);
        assert_eq!(resized.height, 256);
    }

    #[test]
    fn test_resize_to_fit_already_smaller() {
        let img = create_test_image(100, 50);
        let resized = resize_to_fit(&img, 256, FilterType::Bilinear).unwrap();
        assert_eq!((resized.width, resized.height), (100, 50));
    }

    #[test]
    fn test_resize_to_fit_zero_max_edge_error() {
        let img = create_test_image(100, 50);
        assert!(resize_to_fit(&img, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_scale_by_ratio() {
        let img = create_test_image(100, 50);

        let half = scale_by_ratio(&img, 0.5, FilterType::Bilinear).unwrap();
        assert_eq!((half.width, half.height), (50, 25));

        let tiny = scale_by_ratio(&img, 0.001, FilterType::Nearest).unwrap();
        assert_eq!((tiny.width, tiny.height), (1, 1));
    }

    #[test]
    fn test_scale_by_ratio_invalid() {
        let img = create_test_image(10, 10);
        assert!(scale_by_ratio(&img, 0.0, FilterType::Bilinear).is_err());
        assert!(scale_by_ratio(&img, -1.0, FilterType::Bilinear).is_err());
        assert!(scale_by_ratio(&img, f64::NAN, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_calculate_fit_dimensions() {
        assert_eq!(calculate_fit_dimensions(6000, 4000, 2560), (2560, 1707));
        assert_eq!(calculate_fit_dimensions(4000, 6000, 2560), (1707, 2560));
        assert_eq!(calculate_fit_dimensions(4000, 4000, 256), (256, 256));
        assert_eq!(calculate_fit_dimensions(0, 0, 256), (0, 0));
    }
}
