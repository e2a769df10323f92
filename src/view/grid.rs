//! Grid line placement for the visible part of the data plane

use super::viewport::{ViewportSize, ViewportTransform};
use serde::Serialize;

/// Upper bound on lines per axis; denser grids are coarsened by 10x steps
pub const MAX_GRID_LINES: usize = 400;

/// Data-space positions of vertical (`xs`) and horizontal (`ys`) grid lines
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridLines {
    /// Spacing actually used, after any coarsening
    pub spacing: f64,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

/// Lines at multiples of `spacing` covering the visible area
pub fn grid_lines(viewport: &ViewportTransform, size: ViewportSize, spacing: f64) -> GridLines {
    if !(spacing.is_finite() && spacing > 0.0) {
        return GridLines::default();
    }
    let visible = viewport.visible_data_bounds(size);
    let extent = visible.width().max(visible.height());

    let mut spacing = spacing;
    while extent / spacing > MAX_GRID_LINES as f64 {
        spacing *= 10.0;
    }

    GridLines {
        spacing,
        xs: lines_between(visible.min_x, visible.max_x, spacing),
        ys: lines_between(visible.min_y, visible.max_y, spacing),
    }
}

fn lines_between(min: f64, max: f64, spacing: f64) -> Vec<f64> {
    let first = (min / spacing).ceil() as i64;
    let last = (max / spacing).floor() as i64;
    (first..=last).map(|i| i as f64 * spacing).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::DisplayPoint;

    #[test]
    fn test_grid_covers_visible_area() {
        // visible data area: x in [-2.5, 2.5], y in [-1.25, 1.25]
        let vt = ViewportTransform::with_state(40.0, DisplayPoint::new(100.0, 50.0));
        let grid = grid_lines(&vt, ViewportSize::new(200.0, 100.0), 1.0);
        assert_eq!(grid.spacing, 1.0);
        assert_eq!(grid.xs, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(grid.ys, vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_dense_grid_is_coarsened() {
        let vt = ViewportTransform::with_state(0.01, DisplayPoint::new(0.0, 0.0));
        let grid = grid_lines(&vt, ViewportSize::new(800.0, 600.0), 1.0);
        assert!(grid.spacing >= 100.0);
        assert!(grid.xs.len() <= MAX_GRID_LINES + 1);
    }

    #[test]
    fn test_invalid_spacing_gives_no_lines() {
        let grid = grid_lines(&ViewportTransform::new(), ViewportSize::default(), 0.0);
        assert!(grid.xs.is_empty() && grid.ys.is_empty());
    }
}
