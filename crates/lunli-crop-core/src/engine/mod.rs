//! Interactive crop engine.
//!
//! The engine models an image shown inside a fixed-size view with a crop
//! rectangle drawn on top of it. Gestures adjust either the displayed image
//! (pinch to scale, drag to pan) or the crop rectangle (drag to move, drag a
//! corner to resize). [`CropEngine::crop_image`] maps the rectangle back onto
//! the source pixels and extracts the region.
//!
//! # Coordinate Spaces
//!
//! - View space: view pixels, origin top-left. The crop rectangle lives here.
//! - Placement: the image letterboxed into the view before any gesture.
//! - Display: the placement mapped through the [`DisplayTransform`], pivoting
//!   on the view center.
//! - Source: integer pixels of the attached image.

mod config;
mod mode;
mod plan;

pub use config::{ConfigError, CropConfig};
pub use mode::{CropMode, ParseModeError};
pub use plan::{CropError, CropPlan};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decode::DecodedImage;
use crate::geometry::{Corner, Point, Rect};
use crate::transform::{DisplayTransform, PixelRect};

/// What a touch sequence is currently dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragTarget {
    /// A resize handle of the crop rectangle.
    Corner(Corner),
    /// The crop rectangle body.
    CropRect,
    /// The displayed image.
    Image,
}

/// Effective crop size limits for the current view, in view pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimits {
    pub min: f64,
    pub max_width: f64,
    pub max_height: f64,
}

/// State machine behind the crop screen.
#[derive(Debug, Clone)]
pub struct CropEngine {
    config: CropConfig,
    view_width: f64,
    view_height: f64,
    mode: CropMode,
    image: Option<Arc<DecodedImage>>,
    placement: Rect,
    transform: DisplayTransform,
    crop_rect: Rect,
    drag: Option<DragTarget>,
}

impl CropEngine {
    /// Create an engine with the default configuration.
    pub fn new(view_width: f64, view_height: f64) -> Self {
        let mut engine = Self {
            config: CropConfig::default(),
            view_width: 0.0,
            view_height: 0.0,
            mode: CropMode::default(),
            image: None,
            placement: Rect::default(),
            transform: DisplayTransform::IDENTITY,
            crop_rect: Rect::default(),
            drag: None,
        };
        engine.set_view_size(view_width, view_height);
        engine
    }

    pub fn with_config(
        config: CropConfig,
        view_width: f64,
        view_height: f64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut engine = Self::new(view_width, view_height);
        engine.config = config;
        engine.reset_geometry();
        Ok(engine)
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn mode(&self) -> CropMode {
        self.mode
    }

    pub fn view_size(&self) -> (f64, f64) {
        (self.view_width, self.view_height)
    }

    pub fn crop_rect(&self) -> Rect {
        self.crop_rect
    }

    /// Letterboxed image rectangle before the display transform.
    pub fn placement(&self) -> Rect {
        self.placement
    }

    /// Where the image is currently drawn on screen.
    pub fn display_rect(&self) -> Rect {
        self.transform.map_rect(&self.placement, self.pivot())
    }

    pub fn transform(&self) -> DisplayTransform {
        self.transform
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_deref()
    }

    pub fn drag_target(&self) -> Option<DragTarget> {
        self.drag
    }

    /// Effective size limits for the current view and mode.
    ///
    /// In ScreenRatio the minimum is lowered when no ratio-locked rectangle
    /// with both sides at least `min_crop_size` fits under the maximums.
    pub fn size_limits(&self) -> SizeLimits {
        let cap = self.config.max_crop_size.unwrap_or(f64::INFINITY);
        let max_width = cap.min(self.view_width);
        let max_height = cap.min(self.view_height);
        let mut min = self.config.min_crop_size.min(max_width).min(max_height);

        if let Some(ratio) = self.locked_ratio() {
            let widest = max_width.min(max_height * ratio);
            min = min.min(widest).min(widest / ratio);
        }

        SizeLimits {
            min,
            max_width,
            max_height,
        }
    }

    /// Corner handle under `point`, if any.
    ///
    /// A handle is hit when the point is within `corner_threshold` of it on
    /// both axes; the nearest one wins. Always `None` for modes without
    /// resize handles.
    pub fn corner_at(&self, point: Point) -> Option<Corner> {
        if !self.mode.resizable() || !point.is_finite() {
            return None;
        }

        let threshold = self.config.corner_threshold;
        Corner::ALL
            .into_iter()
            .filter_map(|corner| {
                let handle = corner.of(&self.crop_rect);
                let (dx, dy) = (point.x - handle.x, point.y - handle.y);
                (dx.abs() <= threshold && dy.abs() <= threshold)
                    .then_some((corner, dx * dx + dy * dy))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(corner, _)| corner)
    }

    /// Attach the image to crop and reset the view to the mode default.
    pub fn attach_image(&mut self, image: impl Into<Arc<DecodedImage>>) {
        let image = image.into();
        debug!(
            width = image.width,
            height = image.height,
            mode = %self.mode,
            "attaching image to crop engine"
        );
        self.image = Some(image);
        self.reset_geometry();
    }

    /// Detach the image, keeping mode and view size.
    pub fn detach_image(&mut self) -> Option<Arc<DecodedImage>> {
        let image = self.image.take();
        self.reset_geometry();
        image
    }

    /// Switch mode. User adjustments are discarded.
    pub fn set_mode(&mut self, mode: CropMode) {
        debug!(from = %self.mode, to = %mode, "crop mode changed");
        self.mode = mode;
        self.reset_geometry();
    }

    /// Resize the view. Non-finite or negative sizes become an empty view.
    pub fn set_view_size(&mut self, width: f64, height: f64) {
        self.view_width = sanitize_extent(width);
        self.view_height = sanitize_extent(height);
        self.reset_geometry();
    }

    pub fn set_config(&mut self, config: CropConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.reset_geometry();
        Ok(())
    }

    /// Pinch-zoom by `factor` around the `focal` point.
    pub fn on_scale(&mut self, factor: f64, focal: Point) {
        if self.image.is_none() || !factor.is_finite() || factor <= 0.0 || !focal.is_finite() {
            return;
        }

        let old = self.transform.scale;
        let new = (old * factor)
            .max(self.config.min_scale)
            .min(self.config.max_scale);
        if new == old {
            return;
        }

        // Keep the content under the focal point stationary
        let pivot = self.pivot();
        let keep = 1.0 - new / old;
        let t = self.transform.translation;
        let corrected = Point::new(
            t.x + (focal.x - pivot.x - t.x) * keep,
            t.y + (focal.y - pivot.y - t.y) * keep,
        );

        self.transform = DisplayTransform::new(new, self.clamp_translation(corrected, new));
    }

    /// Start a touch sequence and decide what it drags.
    pub fn on_touch_down(&mut self, point: Point) -> DragTarget {
        if self.image.is_none() || !point.is_finite() {
            return DragTarget::Image;
        }

        let target = if let Some(corner) = self.corner_at(point) {
            DragTarget::Corner(corner)
        } else if self.mode != CropMode::FullScreen && self.crop_rect.contains(point) {
            DragTarget::CropRect
        } else {
            DragTarget::Image
        };

        self.drag = Some(target);
        target
    }

    /// Continue the current touch sequence by `(dx, dy)` view pixels.
    pub fn on_pan(&mut self, dx: f64, dy: f64) {
        if self.image.is_none() || !dx.is_finite() || !dy.is_finite() {
            return;
        }

        match self.drag.unwrap_or(DragTarget::Image) {
            DragTarget::Image => self.pan_image(dx, dy),
            DragTarget::CropRect => self.move_crop_rect(dx, dy),
            DragTarget::Corner(corner) => self.on_corner_drag(corner, dx, dy),
        }
    }

    pub fn on_touch_up(&mut self) {
        self.drag = None;
    }

    /// Resize the crop rectangle by dragging `corner`; the opposite corner
    /// stays fixed.
    pub fn on_corner_drag(&mut self, corner: Corner, dx: f64, dy: f64) {
        if self.image.is_none() || !dx.is_finite() || !dy.is_finite() {
            return;
        }

        self.crop_rect = match self.mode {
            CropMode::Square => self.resize_square(corner, dx, dy),
            CropMode::ScreenRatio => self.resize_screen_ratio(corner, dx, dy),
            CropMode::FullScreen => return,
        };
    }

    /// Restore scale, translation and crop rectangle to the mode default.
    pub fn on_double_tap(&mut self) {
        if self.image.is_some() {
            self.reset_geometry();
        }
    }

    /// Resolve the crop rectangle to a region of the source image.
    pub fn plan_crop(&self) -> Result<CropPlan, CropError> {
        let image = self.image.as_ref().ok_or(CropError::NoImage)?;
        if !image.has_consistent_buffer() {
            return Err(CropError::CorruptImage {
                expected: image.expected_len(),
                actual: image.pixels.len(),
            });
        }

        if self.mode == CropMode::FullScreen {
            return Ok(CropPlan::full_frame(Arc::clone(image)));
        }
        if self.view_rect().is_empty() {
            return Err(CropError::EmptyView);
        }

        let unmapped = self
            .transform
            .unmap_rect(&self.crop_rect, self.pivot())
            .ok_or(CropError::SingularTransform {
                scale: self.transform.scale,
            })?;

        let placement = self.placement;
        if placement.is_empty() {
            return Err(CropError::DegeneratePlacement);
        }

        let clipped = unmapped
            .intersect(&placement)
            .ok_or(CropError::OutsideImage)?;
        let shaped = match self.mode.aspect_ratio(self.view_width, self.view_height) {
            Some(ratio) => clipped.fit_aspect(ratio),
            None => clipped,
        };

        let scale_x = image.width as f64 / placement.width();
        let scale_y = image.height as f64 / placement.height();
        let region = PixelRect::from_f64(
            ((shaped.left - placement.left) * scale_x).floor(),
            ((shaped.top - placement.top) * scale_y).floor(),
            (shaped.width() * scale_x).round(),
            (shaped.height() * scale_y).round(),
        )
        .clamp_to(image.width, image.height);

        let region = if self.mode == CropMode::Square {
            let side = region.width.min(region.height);
            PixelRect::new(region.x, region.y, side, side)
        } else {
            region
        };

        debug!(
            x = region.x,
            y = region.y,
            width = region.width,
            height = region.height,
            "planned crop"
        );
        Ok(CropPlan::region(Arc::clone(image), region))
    }

    /// Crop the attached image to the current rectangle.
    pub fn crop_image(&self) -> Result<DecodedImage, CropError> {
        match self.plan_crop() {
            Ok(plan) => Ok(plan.execute()),
            Err(err) => {
                warn!(error = %err, mode = %self.mode, "crop failed");
                Err(err)
            }
        }
    }

    /// View ratio when the mode locks the rectangle to it.
    fn locked_ratio(&self) -> Option<f64> {
        match self.mode {
            CropMode::ScreenRatio => self.mode.aspect_ratio(self.view_width, self.view_height),
            _ => None,
        }
    }

    fn view_rect(&self) -> Rect {
        Rect::from_size(self.view_width, self.view_height)
    }

    /// Transform pivot: the view center.
    fn pivot(&self) -> Point {
        self.view_rect().center()
    }

    fn reset_geometry(&mut self) {
        self.placement = match &self.image {
            Some(image) => Rect::letterbox(
                image.width as f64,
                image.height as f64,
                self.view_width,
                self.view_height,
            ),
            None => Rect::default(),
        };
        self.transform = DisplayTransform::IDENTITY;
        self.crop_rect = self.default_crop_rect();
        self.drag = None;

        debug!(
            mode = %self.mode,
            view_width = self.view_width,
            view_height = self.view_height,
            "crop geometry reset"
        );
    }

    fn default_crop_rect(&self) -> Rect {
        let view = self.view_rect();
        if view.is_empty() {
            return view;
        }

        let fraction = self.config.default_crop_fraction;
        let limits = self.size_limits();
        match self.mode {
            CropMode::Square => {
                let side = (fraction * self.view_width.min(self.view_height))
                    .max(limits.min)
                    .min(limits.max_width.min(limits.max_height));
                Rect::from_center(view.center(), side, side)
            }
            CropMode::ScreenRatio => {
                let rect = Rect::from_center(
                    view.center(),
                    fraction * self.view_width,
                    fraction * self.view_height,
                );
                self.lock_aspect(rect, self.view_width / self.view_height)
            }
            CropMode::FullScreen => view,
        }
    }

    /// Translation bound for the given scale, per axis.
    fn clamp_translation(&self, translation: Point, scale: f64) -> Point {
        let bound_x = self.config.pan_bound_factor * scale * self.view_width;
        let bound_y = self.config.pan_bound_factor * scale * self.view_height;
        Point::new(
            translation.x.max(-bound_x).min(bound_x),
            translation.y.max(-bound_y).min(bound_y),
        )
    }

    fn pan_image(&mut self, dx: f64, dy: f64) {
        let t = self.transform.translation;
        let moved = Point::new(t.x + dx, t.y + dy);
        self.transform.translation = self.clamp_translation(moved, self.transform.scale);
    }

    fn move_crop_rect(&mut self, dx: f64, dy: f64) {
        let rect = self.crop_rect;
        let (width, height) = (rect.width(), rect.height());
        let left = (rect.left + dx).max(0.0).min(self.view_width - width);
        let top = (rect.top + dy).max(0.0).min(self.view_height - height);
        self.crop_rect = Rect::new(left, top, left + width, top + height);
    }

    /// Space between `anchor` and the view edges in the corner's direction.
    fn room(&self, anchor: Point, sx: f64, sy: f64) -> (f64, f64) {
        let room_x = if sx > 0.0 {
            self.view_width - anchor.x
        } else {
            anchor.x
        };
        let room_y = if sy > 0.0 {
            self.view_height - anchor.y
        } else {
            anchor.y
        };
        (room_x.max(0.0), room_y.max(0.0))
    }

    fn resize_square(&self, corner: Corner, dx: f64, dy: f64) -> Rect {
        let rect = self.crop_rect;
        let (sx, sy) = corner.outward();
        let anchor = corner.opposite().of(&rect);
        let limits = self.size_limits();
        let (room_x, room_y) = self.room(anchor, sx, sy);

        // Dominant outward component drives both edges
        let (grow_x, grow_y) = (dx * sx, dy * sy);
        let growth = if grow_x.abs() >= grow_y.abs() {
            grow_x
        } else {
            grow_y
        };

        let max_side = limits
            .max_width
            .min(limits.max_height)
            .min(room_x)
            .min(room_y);
        let min_side = limits.min.min(max_side);
        let side = (rect.width() + growth).max(min_side).min(max_side);

        Rect::from_points(
            anchor,
            Point::new(anchor.x + sx * side, anchor.y + sy * side),
        )
    }

    fn resize_screen_ratio(&self, corner: Corner, dx: f64, dy: f64) -> Rect {
        let rect = self.crop_rect;
        let (sx, sy) = corner.outward();
        let anchor = corner.opposite().of(&rect);
        let moving = corner.of(&rect);
        let limits = self.size_limits();
        let (room_x, room_y) = self.room(anchor, sx, sy);

        let width = ((moving.x + dx - anchor.x) * sx)
            .max(limits.min)
            .min(room_x.min(limits.max_width));
        let height = ((moving.y + dy - anchor.y) * sy)
            .max(limits.min)
            .min(room_y.min(limits.max_height));

        let free = Rect::from_points(
            anchor,
            Point::new(anchor.x + sx * width, anchor.y + sy * height),
        );
        self.lock_aspect(free, self.view_width / self.view_height)
    }

    /// Re-proportion `rect` to `ratio` around its center, preserving area as
    /// far as the size limits allow, then shift it back inside the view.
    fn lock_aspect(&self, rect: Rect, ratio: f64) -> Rect {
        if !ratio.is_finite() || ratio <= 0.0 {
            return rect;
        }

        let limits = self.size_limits();
        let lo = limits.min.max(limits.min * ratio);
        let hi = limits.max_width.min(limits.max_height * ratio);

        let area = rect.width() * rect.height();
        let width = (area * ratio).sqrt().max(lo).min(hi);
        let height = width / ratio;

        let center = rect.center();
        let left = (center.x - width / 2.0)
            .max(0.0)
            .min(self.view_width - width);
        let top = (center.y - height / 2.0)
            .max(0.0)
            .min(self.view_height - height);
        Rect::new(left, top, left + width, top + height)
    }
}

fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
