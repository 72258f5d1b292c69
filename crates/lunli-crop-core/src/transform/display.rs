//! Display transform for the on-screen image.
//!
//! The source image is drawn into its letterboxed placement rectangle and
//! then transformed by a uniform scale about a pivot (the view center)
//! followed by a translation:
//!
//! ```text
//! p' = pivot + (p - pivot) * scale + translation
//! ```
//!
//! The inverse is used when cropping to map the on-screen crop rectangle back
//! into pre-transform view space:
//!
//! ```text
//! p = pivot + (p' - translation - pivot) / scale
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Scales below this magnitude are treated as singular.
pub const MIN_INVERTIBLE_SCALE: f64 = 1e-9;

/// Uniform scale plus translation applied to the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayTransform {
    pub scale: f64,
    pub translation: Point,
}

impl Default for DisplayTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl DisplayTransform {
    pub const IDENTITY: DisplayTransform = DisplayTransform {
        scale: 1.0,
        translation: Point::ORIGIN,
    };

    pub fn new(scale: f64, translation: Point) -> Self {
        Self { scale, translation }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Check whether the transform can be inverted.
    pub fn is_invertible(&self) -> bool {
        self.scale.is_finite()
            && self.scale.abs() >= MIN_INVERTIBLE_SCALE
            && self.translation.is_finite()
    }

    /// Map a pre-transform point to its on-screen position.
    pub fn map_point(&self, point: Point, pivot: Point) -> Point {
        Point::new(
            pivot.x + (point.x - pivot.x) * self.scale + self.translation.x,
            pivot.y + (point.y - pivot.y) * self.scale + self.translation.y,
        )
    }

    /// Map an on-screen point back to pre-transform view space.
    ///
    /// Returns `None` if the transform is singular.
    pub fn unmap_point(&self, point: Point, pivot: Point) -> Option<Point> {
        if !self.is_invertible() {
            return None;
        }

        Some(Point::new(
            pivot.x + (point.x - self.translation.x - pivot.x) / self.scale,
            pivot.y + (point.y - self.translation.y - pivot.y) / self.scale,
        ))
    }

    /// Bounding box of the four mapped corners of `rect`.
    pub fn map_rect(&self, rect: &Rect, pivot: Point) -> Rect {
        bounding_box(corners(rect).map(|p| self.map_point(p, pivot)))
    }

    /// Bounding box of the four corners of `rect` mapped through the inverse.
    ///
    /// Returns `None` if the transform is singular.
    pub fn unmap_rect(&self, rect: &Rect, pivot: Point) -> Option<Rect> {
        let [a, b, c, d] = corners(rect);
        Some(bounding_box([
            self.unmap_point(a, pivot)?,
            self.unmap_point(b, pivot)?,
            self.unmap_point(c, pivot)?,
            self.unmap_point(d, pivot)?,
        ]))
    }
}

fn corners(rect: &Rect) -> [Point; 4] {
    [
        Point::new(rect.left, rect.top),
        Point::new(rect.right, rect.top),
        Point::new(rect.right, rect.bottom),
        Point::new(rect.left, rect.bottom),
    ]
}

fn bounding_box(points: [Point; 4]) -> Rect {
    let mut rect = Rect::new(points[0].x, points[0].y, points[0].x, points[0].y);
    for p in &points[1..] {
        rect.left = rect.left.min(p.x);
        rect.top = rect.top.min(p.y);
        rect.right = rect.right.max(p.x);
        rect.bottom = rect.bottom.max(p.y);
    }
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIVOT: Point = Point { x: 500.0, y: 500.0 };

    #[test]
    fn test_identity_maps_to_self() {
        let t = DisplayTransform::IDENTITY;
        let p = Point::new(123.0, 456.0);
        assert_eq!(t.map_point(p, PIVOT), p);
        assert_eq!(t.unmap_point(p, PIVOT), Some(p));
        assert!(t.is_identity());
    }

    #[test]
    fn test_scale_about_pivot() {
        let t = DisplayTransform::new(2.0, Point::ORIGIN);
        // The pivot never moves under pure scaling
        assert_eq!(t.map_point(PIVOT, PIVOT), PIVOT);
        assert_eq!(t.map_point(Point::new(600.0, 500.0), PIVOT), Point::new(700.0, 500.0));
    }

    #[test]
    fn test_translation_applied_after_scale() {
        let t = DisplayTransform::new(2.0, Point::new(10.0, -20.0));
        let mapped = t.map_point(Point::new(600.0, 600.0), PIVOT);
        assert_eq!(mapped, Point::new(710.0, 680.0));
        assert_eq!(t.unmap_point(mapped, PIVOT), Some(Point::new(600.0, 600.0)));
    }

    #[test]
    fn test_singular_transform() {
        let zero = DisplayTransform::new(0.0, Point::ORIGIN);
        assert!(!zero.is_invertible());
        assert_eq!(zero.unmap_point(PIVOT, PIVOT), None);
        assert_eq!(zero.unmap_rect(&Rect::from_size(10.0, 10.0), PIVOT), None);

        let nan = DisplayTransform::new(f64::NAN, Point::ORIGIN);
        assert!(!nan.is_invertible());

        let tiny = DisplayTransform::new(1e-12, Point::ORIGIN);
        assert!(!tiny.is_invertible());

        let bad_translation = DisplayTransform::new(1.0, Point::new(f64::INFINITY, 0.0));
        assert!(!bad_translation.is_invertible());
    }

    #[test]
    fn test_unmap_rect_inverts_map_rect() {
        let t = DisplayTransform::new(0.5, Point::new(30.0, 40.0));
        let r = Rect::new(100.0, 200.0, 300.0, 500.0);
        let mapped = t.map_rect(&r, PIVOT);
        let back = t.unmap_rect(&mapped, PIVOT).unwrap();
        assert!((back.left - r.left).abs() < 1e-9);
        assert!((back.top - r.top).abs() < 1e-9);
        assert!((back.right - r.right).abs() < 1e-9);
        assert!((back.bottom - r.bottom).abs() < 1e-9);
    }

    #[test]
    fn test_negative_scale_bounding_box_is_ordered() {
        let t = DisplayTransform::new(-1.0, Point::ORIGIN);
        let mapped = t.map_rect(&Rect::new(400.0, 400.0, 450.0, 480.0), PIVOT);
        assert!(mapped.left < mapped.right);
        assert!(mapped.top < mapped.bottom);
        assert_eq!(mapped, Rect::new(550.0, 520.0, 600.0, 600.0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
