//! 2D viewport transform between data space and display space
//!
//! `ViewportTransform` holds a uniform scale and a pan offset:
//! `display = data * scale + pan`. It does not flip or otherwise orient the
//! y-axis; a presentation layer that wants y-up applies that itself.

use crate::draw::geometry::{Bounds, MapPoint};
use serde::{Deserialize, Serialize};

/// Smallest data extent used by auto-fit, so degenerate bounds never divide by zero
pub const MIN_FIT_EXTENT: f64 = 1.0;
/// Scale is kept within `[MIN_SCALE, MAX_SCALE]`
pub const MIN_SCALE: f64 = 1e-9;
pub const MAX_SCALE: f64 = 1e9;

/// A point in display (pixel) space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayPoint {
    pub x: f64,
    pub y: f64,
}

impl DisplayPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the display area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DisplayPoint {
        DisplayPoint::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Uniform scale + pan mapping between data and display coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    scale: f64,
    pan: DisplayPoint,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportTransform {
    /// Identity transform: scale 1, no pan
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            pan: DisplayPoint::default(),
        }
    }

    /// Creates a transform from explicit state; the scale is clamped
    pub fn with_state(scale: f64, pan: DisplayPoint) -> Self {
        Self {
            scale: clamp_scale(scale, 1.0),
            pan,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pan(&self) -> DisplayPoint {
        self.pan
    }

    pub fn to_display(&self, p: MapPoint) -> DisplayPoint {
        DisplayPoint::new(p.x * self.scale + self.pan.x, p.y * self.scale + self.pan.y)
    }

    pub fn to_data(&self, p: DisplayPoint) -> MapPoint {
        MapPoint::new((p.x - self.pan.x) / self.scale, (p.y - self.pan.y) / self.scale)
    }

    /// Converts a pixel distance to a data-space distance at the current scale
    pub fn to_data_distance(&self, pixels: f64) -> f64 {
        pixels / self.scale
    }

    /// Fits `bounds` into the viewport with `margin_px` on every side.
    ///
    /// The x and y candidate scales are computed independently and the smaller
    /// one is used, so aspect ratio is preserved; the box is then centered.
    /// Zero-width or zero-height bounds are treated as [`MIN_FIT_EXTENT`] wide,
    /// and a viewport smaller than twice the margin still gets at least one
    /// pixel of room.
    pub fn auto_fit(&mut self, bounds: Bounds, viewport: ViewportSize, margin_px: f64) {
        let margin = if margin_px.is_finite() { margin_px.max(0.0) } else { 0.0 };
        let available_w = (viewport.width - 2.0 * margin).max(1.0);
        let available_h = (viewport.height - 2.0 * margin).max(1.0);
        let width = bounds.width().max(MIN_FIT_EXTENT);
        let height = bounds.height().max(MIN_FIT_EXTENT);

        let scale_x = available_w / width;
        let scale_y = available_h / height;
        self.scale = clamp_scale(scale_x.min(scale_y), self.scale);

        let center = bounds.center();
        let view_center = viewport.center();
        self.pan = DisplayPoint::new(
            view_center.x - center.x * self.scale,
            view_center.y - center.y * self.scale,
        );
    }

    /// Multiplies the scale by `factor` while keeping the data point under
    /// `anchor` fixed. Non-positive or non-finite factors are ignored.
    pub fn zoom(&mut self, factor: f64, anchor: DisplayPoint) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let anchored = self.to_data(anchor);
        self.scale = clamp_scale(self.scale * factor, self.scale);
        self.pan = DisplayPoint::new(
            anchor.x - anchored.x * self.scale,
            anchor.y - anchored.y * self.scale,
        );
    }

    /// Discrete zoom in around the viewport center
    pub fn zoom_in(&mut self, step: f64, viewport: ViewportSize) {
        self.zoom(step, viewport.center());
    }

    /// Discrete zoom out around the viewport center
    pub fn zoom_out(&mut self, step: f64, viewport: ViewportSize) {
        if step > 0.0 {
            self.zoom(1.0 / step, viewport.center());
        }
    }

    /// Translates the pan by a display-space delta; scale is unchanged
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.pan.x += dx;
            self.pan.y += dy;
        }
    }

    /// Data-space rectangle currently covered by the viewport
    pub fn visible_data_bounds(&self, viewport: ViewportSize) -> Bounds {
        let a = self.to_data(DisplayPoint::new(0.0, 0.0));
        let b = self.to_data(DisplayPoint::new(viewport.width, viewport.height));
        Bounds::new(a.x, a.y, b.x, b.y)
    }
}

fn clamp_scale(scale: f64, fallback: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_display_data_roundtrip() {
        let vt = ViewportTransform::with_state(2.5, DisplayPoint::new(-30.0, 12.0));
        let p = MapPoint::new(3.25, -7.5);
        let d = vt.to_display(p);
        assert_eq!(d, DisplayPoint::new(-21.875, -6.75));
        let back = vt.to_data(d);
        assert!(close(back.x, p.x) && close(back.y, p.y));
    }

    #[test]
    fn test_auto_fit_centers_with_margin() {
        let mut vt = ViewportTransform::new();
        let bounds = Bounds::new(0.0, 0.0, 10.0, 5.0);
        vt.auto_fit(bounds, ViewportSize::new(200.0, 200.0), 50.0);
        // x limits: 100 / 10, y: 100 / 5
        assert!(close(vt.scale(), 10.0));
        let min = vt.to_display(MapPoint::new(0.0, 0.0));
        let max = vt.to_display(MapPoint::new(10.0, 5.0));
        assert!(close(min.x, 50.0) && close(max.x, 150.0));
        assert!(close(min.y, 75.0) && close(max.y, 125.0));
    }

    #[test]
    fn test_auto_fit_degenerate_bounds() {
        let mut vt = ViewportTransform::new();
        let point = Bounds::new(4.0, 4.0, 4.0, 4.0);
        vt.auto_fit(point, ViewportSize::new(300.0, 200.0), 50.0);
        assert!(vt.scale().is_finite());
        assert!(close(vt.scale(), 100.0));
        let center = vt.to_display(MapPoint::new(4.0, 4.0));
        assert!(close(center.x, 150.0) && close(center.y, 100.0));
    }

    #[test]
    fn test_auto_fit_tiny_viewport_stays_finite() {
        let mut vt = ViewportTransform::new();
        vt.auto_fit(Bounds::new(0.0, 0.0, 10.0, 10.0), ViewportSize::new(20.0, 20.0), 50.0);
        assert!(vt.scale() > 0.0 && vt.scale().is_finite());
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut vt = ViewportTransform::with_state(3.0, DisplayPoint::new(10.0, -4.0));
        let anchor = DisplayPoint::new(123.0, 77.0);
        let before = vt.to_data(anchor);
        vt.zoom(2.0, anchor);
        let after = vt.to_data(anchor);
        assert!(close(vt.scale(), 6.0));
        assert!(close(before.x, after.x) && close(before.y, after.y));
    }

    #[test]
    fn test_zoom_ignores_invalid_factor() {
        let mut vt = ViewportTransform::with_state(3.0, DisplayPoint::new(1.0, 2.0));
        let original = vt;
        vt.zoom(0.0, DisplayPoint::new(5.0, 5.0));
        vt.zoom(-2.0, DisplayPoint::new(5.0, 5.0));
        vt.zoom(f64::NAN, DisplayPoint::new(5.0, 5.0));
        assert_eq!(vt, original);
    }

    #[test]
    fn test_zoom_in_then_out_restores_scale() {
        let size = ViewportSize::new(640.0, 480.0);
        let mut vt = ViewportTransform::with_state(1.5, DisplayPoint::new(20.0, 30.0));
        let center_data = vt.to_data(size.center());
        vt.zoom_in(1.2, size);
        assert!(close(vt.scale(), 1.8));
        vt.zoom_out(1.2, size);
        assert!(close(vt.scale(), 1.5));
        let after = vt.to_data(size.center());
        assert!(close(center_data.x, after.x) && close(center_data.y, after.y));
    }

    #[test]
    fn test_pan_by_translates_only() {
        let mut vt = ViewportTransform::with_state(2.0, DisplayPoint::new(0.0, 0.0));
        vt.pan_by(15.0, -5.0);
        assert_eq!(vt.pan(), DisplayPoint::new(15.0, -5.0));
        assert_eq!(vt.scale(), 2.0);
        assert_eq!(vt.to_display(MapPoint::new(1.0, 1.0)), DisplayPoint::new(17.0, -3.0));
    }

    #[test]
    fn test_visible_data_bounds() {
        let vt = ViewportTransform::with_state(10.0, DisplayPoint::new(100.0, 50.0));
        let visible = vt.visible_data_bounds(ViewportSize::new(200.0, 100.0));
        assert_eq!(visible, Bounds::new(-10.0, -5.0, 10.0, 5.0));
    }
}
