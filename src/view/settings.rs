//! Interaction settings for the viewport

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Pixel margin kept around the data when auto-fitting
    pub margin_px: f64,
    /// Factor applied by one discrete zoom in (its inverse zooms out)
    pub zoom_step: f64,
    /// Pick radius in display pixels
    pub pick_threshold_px: f64,
    /// Grid spacing in data units
    pub grid_spacing: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            margin_px: 50.0,
            zoom_step: 1.2,
            pick_threshold_px: 10.0,
            grid_spacing: 1.0,
        }
    }
}

impl ViewSettings {
    /// Replaces out-of-range values with defaults
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            margin_px: if self.margin_px.is_finite() { self.margin_px.max(0.0) } else { defaults.margin_px },
            zoom_step: if self.zoom_step.is_finite() && self.zoom_step > 1.0 { self.zoom_step } else { defaults.zoom_step },
            pick_threshold_px: if self.pick_threshold_px.is_finite() {
                self.pick_threshold_px.max(0.0)
            } else {
                defaults.pick_threshold_px
            },
            grid_spacing: if self.grid_spacing.is_finite() && self.grid_spacing > 0.0 {
                self.grid_spacing
            } else {
                defaults.grid_spacing
            },
        }
    }
}
