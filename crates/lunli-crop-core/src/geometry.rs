//! View-space geometry primitives used by the crop engine.
//!
//! # Coordinate System
//!
//! - Coordinates are in view pixels (`f64`)
//! - Origin is the top-left corner of the view
//! - x grows to the right, y grows downward

use serde::{Deserialize, Serialize};

/// A point in view space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check that both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned rectangle stored as its four edges.
///
/// A rectangle with `right <= left` or `bottom <= top` is considered empty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Rectangle of the given size centered on `center`.
    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        )
    }

    /// Smallest rectangle spanning two opposite corners, in any order.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// True when the rectangle has no area (including NaN edges).
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// Hit test with half-open edges: left/top inclusive, right/bottom exclusive.
    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.left
            && point.x < self.right
            && point.y >= self.top
            && point.y < self.bottom
    }

    /// Check whether `other` lies inside this rectangle, allowing each edge
    /// to overshoot by `tolerance`.
    pub fn contains_rect(&self, other: &Rect, tolerance: f64) -> bool {
        other.left >= self.left - tolerance
            && other.top >= self.top - tolerance
            && other.right <= self.right + tolerance
            && other.bottom <= self.bottom + tolerance
    }

    /// Overlapping region of two rectangles, or `None` if they don't overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);

        if left < right && top < bottom {
            Some(Rect::new(left, top, right, bottom))
        } else {
            None
        }
    }

    /// Largest rectangle with the given width/height ratio that fits inside
    /// this one, sharing its center.
    ///
    /// Returns `self` unchanged for an empty rectangle or an invalid ratio.
    pub fn fit_aspect(&self, ratio: f64) -> Rect {
        if self.is_empty() || !ratio.is_finite() || ratio <= 0.0 {
            return *self;
        }

        let (width, height) = (self.width(), self.height());
        let (fit_w, fit_h) = if width / height > ratio {
            // Too wide: height is the limiting edge
            (height * ratio, height)
        } else {
            (width, width / ratio)
        };

        Rect::from_center(self.center(), fit_w, fit_h)
    }

    /// Aspect-preserving placement of content inside a view, centered on the
    /// free axis.
    ///
    /// Wider content spans the full view width and is padded top/bottom;
    /// taller content spans the full height and is padded left/right.
    /// Degenerate inputs produce an empty rectangle.
    pub fn letterbox(
        content_width: f64,
        content_height: f64,
        view_width: f64,
        view_height: f64,
    ) -> Rect {
        let all_positive = [content_width, content_height, view_width, view_height]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !all_positive {
            return Rect::default();
        }

        let content_ratio = content_width / content_height;
        let view_ratio = view_width / view_height;

        if content_ratio > view_ratio {
            let display_height = view_width / content_ratio;
            Rect::new(
                0.0,
                (view_height - display_height) / 2.0,
                view_width,
                (view_height + display_height) / 2.0,
            )
        } else {
            let display_width = view_height * content_ratio;
            Rect::new(
                (view_width - display_width) / 2.0,
                0.0,
                (view_width + display_width) / 2.0,
                view_height,
            )
        }
    }
}

/// Resize handle of the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// All corners, clockwise from top-left.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// The diagonally opposite corner (the anchor while resizing).
    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomRight => Corner::TopLeft,
            Corner::BottomLeft => Corner::TopRight,
        }
    }

    /// Position of this corner on `rect`.
    pub fn of(self, rect: &Rect) -> Point {
        match self {
            Corner::TopLeft => Point::new(rect.left, rect.top),
            Corner::TopRight => Point::new(rect.right, rect.top),
            Corner::BottomRight => Point::new(rect.right, rect.bottom),
            Corner::BottomLeft => Point::new(rect.left, rect.bottom),
        }
    }

    /// Unit signs pointing from the opposite corner towards this one.
    pub fn outward(self) -> (f64, f64) {
        match self {
            Corner::TopLeft => (-1.0, -1.0),
            Corner::TopRight => (1.0, -1.0),
            Corner::BottomRight => (1.0, 1.0),
            Corner::BottomLeft => (-1.0, 1.0),
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
