//! Placement configuration and the design-to-plot formula

use super::types::MapPoint;
use serde::{Deserialize, Serialize};

/// Smallest scale accepted for `design_scale` and `offset_scale`
const MIN_SCALE: f64 = 1e-6;

/// Parameters of one geometry build. Changing any field invalidates every
/// derived polygon and the spatial index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Design coordinates are divided by `design_scale * 1000` before flooring
    pub design_scale: f64,
    /// Offsets are divided by this before being added to the placement
    pub offset_scale: f64,
    /// Per-quadrant shift applied after scaling
    pub shot_separation: f64,
    /// Offset limit on x; 0 disables the check
    pub spec_x: f64,
    /// Offset limit on y; 0 disables the check
    pub spec_y: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            design_scale: 60.0,
            offset_scale: 1.0,
            shot_separation: 4.0,
            spec_x: 0.0,
            spec_y: 0.0,
        }
    }
}

impl PlacementConfig {
    /// Clamps every field into its valid range. Scales must be positive,
    /// separation and spec limits non-negative. Non-finite values fall back
    /// to the defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |value: f64, fallback: f64| {
            if !value.is_finite() {
                fallback
            } else {
                value.abs().max(MIN_SCALE)
            }
        };
        let non_negative = |value: f64, fallback: f64| {
            if value.is_finite() { value.max(0.0) } else { fallback }
        };
        Self {
            design_scale: positive(self.design_scale, defaults.design_scale),
            offset_scale: positive(self.offset_scale, defaults.offset_scale),
            shot_separation: non_negative(self.shot_separation, defaults.shot_separation),
            spec_x: non_negative(self.spec_x, defaults.spec_x),
            spec_y: non_negative(self.spec_y, defaults.spec_y),
        }
    }

    /// True when a raw offset exceeds an enabled spec limit
    pub fn is_out_of_spec(&self, offset: MapPoint) -> bool {
        (self.spec_x > 0.0 && offset.x.abs() > self.spec_x)
            || (self.spec_y > 0.0 && offset.y.abs() > self.spec_y)
    }
}

/// Places a raw design coordinate of a site in `shot`.
///
/// The coordinate is divided by `design_scale * 1000` and floored, then
/// shifted by `shot_separation` towards the shot's quadrant:
/// 1 = (+x,+y), 2 = (+x,-y), 3 = (-x,-y), 4 = (-x,+y). Other shots are not shifted.
pub fn place(raw: MapPoint, shot: i32, config: &PlacementConfig) -> MapPoint {
    let divisor = config.design_scale * 1000.0;
    let x = (raw.x / divisor).floor();
    let y = (raw.y / divisor).floor();
    let sep = config.shot_separation;
    let (dx, dy) = match shot {
        1 => (sep, sep),
        2 => (sep, -sep),
        3 => (-sep, -sep),
        4 => (-sep, sep),
        _ => (0.0, 0.0),
    };
    MapPoint::new(x + dx, y + dy)
}

/// [`place`] followed by adding `offset / offset_scale`
pub fn place_with_offset(raw: MapPoint, shot: i32, offset: MapPoint, config: &PlacementConfig) -> MapPoint {
    let base = place(raw, shot, config);
    MapPoint::new(
        base.x + offset.x / config.offset_scale,
        base.y + offset.y / config.offset_scale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(design_scale: f64, shot_separation: f64) -> PlacementConfig {
        PlacementConfig {
            design_scale,
            shot_separation,
            ..PlacementConfig::default()
        }
    }

    #[test]
    fn test_place_scales_and_floors() {
        let cfg = config(1.0, 0.0);
        assert_eq!(place(MapPoint::new(1000.0, 2000.0), 1, &cfg), MapPoint::new(1.0, 2.0));
        assert_eq!(place(MapPoint::new(1999.0, 2500.0), 1, &cfg), MapPoint::new(1.0, 2.0));
        // floor, not truncation towards zero
        assert_eq!(place(MapPoint::new(-500.0, -1500.0), 1, &cfg), MapPoint::new(-1.0, -2.0));
    }

    #[test]
    fn test_place_shifts_by_quadrant() {
        let cfg = config(1.0, 4.0);
        let raw = MapPoint::new(10_000.0, 20_000.0);
        assert_eq!(place(raw, 1, &cfg), MapPoint::new(14.0, 24.0));
        assert_eq!(place(raw, 2, &cfg), MapPoint::new(14.0, 16.0));
        assert_eq!(place(raw, 3, &cfg), MapPoint::new(6.0, 16.0));
        assert_eq!(place(raw, 4, &cfg), MapPoint::new(6.0, 24.0));
        assert_eq!(place(raw, 7, &cfg), MapPoint::new(10.0, 20.0));
    }

    #[test]
    fn test_place_with_offset_divides_by_offset_scale() {
        let cfg = PlacementConfig {
            design_scale: 1.0,
            offset_scale: 2.0,
            shot_separation: 0.0,
            ..PlacementConfig::default()
        };
        let p = place_with_offset(MapPoint::new(1000.0, 2000.0), 1, MapPoint::new(1.0, -3.0), &cfg);
        assert_eq!(p, MapPoint::new(1.5, 0.5));
    }

    #[test]
    fn test_sanitized_clamps_invalid_fields() {
        let cfg = PlacementConfig {
            design_scale: -2.0,
            offset_scale: 0.0,
            shot_separation: -1.0,
            spec_x: f64::NAN,
            spec_y: 3.0,
        }
        .sanitized();
        assert_eq!(cfg.design_scale, 2.0);
        assert_eq!(cfg.offset_scale, MIN_SCALE);
        assert_eq!(cfg.shot_separation, 0.0);
        assert_eq!(cfg.spec_x, 0.0);
        assert_eq!(cfg.spec_y, 3.0);
    }

    #[test]
    fn test_out_of_spec_respects_disabled_limits() {
        let cfg = PlacementConfig { spec_x: 1.0, spec_y: 0.0, ..PlacementConfig::default() };
        assert!(cfg.is_out_of_spec(MapPoint::new(-1.5, 0.0)));
        assert!(!cfg.is_out_of_spec(MapPoint::new(1.0, 100.0)));
    }
}
