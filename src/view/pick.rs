//! Pick query: what plotted point lies under a display coordinate

use super::viewport::{DisplayPoint, ViewportTransform};
use crate::draw::geometry::{MapPoint, PointMetadata, SpatialIndex};

/// A point accepted by [`PickQuery::pick_hit`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit<'a> {
    pub metadata: &'a PointMetadata,
    /// Plotted position in data space
    pub position: MapPoint,
    /// Distance from the query in data units
    pub distance: f64,
}

/// Composes the inverse viewport mapping with a nearest-point lookup
#[derive(Debug, Clone, Copy)]
pub struct PickQuery<'a> {
    index: &'a SpatialIndex,
    viewport: &'a ViewportTransform,
}

impl<'a> PickQuery<'a> {
    pub fn new(index: &'a SpatialIndex, viewport: &'a ViewportTransform) -> Self {
        Self { index, viewport }
    }

    /// Metadata of the nearest point if it lies within `threshold_px` pixels
    pub fn pick(&self, display: DisplayPoint, threshold_px: f64) -> Option<&'a PointMetadata> {
        self.pick_hit(display, threshold_px).map(|hit| hit.metadata)
    }

    /// The tolerance is given in pixels and converted to data units at the
    /// current scale, since the index works in data space.
    pub fn pick_hit(&self, display: DisplayPoint, threshold_px: f64) -> Option<PickHit<'a>> {
        let threshold = self.viewport.to_data_distance(threshold_px);
        let query = self.viewport.to_data(display);
        let nearest = self.index.nearest(query)?;
        if nearest.distance <= threshold {
            Some(PickHit {
                metadata: nearest.metadata,
                position: nearest.position,
                distance: nearest.distance,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::geometry::PointKind;

    fn index() -> SpatialIndex {
        let meta = |seq| PointMetadata {
            kind: PointKind::Theory,
            shot: 1,
            seq,
            site: i64::from(seq),
            unit: None,
            out_of_spec: false,
        };
        SpatialIndex::build(vec![
            (MapPoint::new(0.0, 0.0), meta(1)),
            (MapPoint::new(10.0, 0.0), meta(2)),
        ])
    }

    #[test]
    fn test_pick_threshold_in_pixels() {
        let index = index();
        // 10 px per data unit; point 2 sits at display (200, 100)
        let vt = ViewportTransform::with_state(10.0, DisplayPoint::new(100.0, 100.0));
        let query = PickQuery::new(&index, &vt);

        let hit = query.pick(DisplayPoint::new(205.0, 106.0), 10.0).expect("under 8 px away");
        assert_eq!(hit.seq, 2);
        assert!(query.pick(DisplayPoint::new(207.0, 108.0), 10.0).is_none());
    }

    #[test]
    fn test_pick_scales_with_zoom() {
        let index = index();
        let mut vt = ViewportTransform::new();
        // 1 px per unit: a 5 px radius covers 5 data units
        assert!(PickQuery::new(&index, &vt).pick(DisplayPoint::new(4.0, 0.0), 5.0).is_some());
        vt.zoom(10.0, DisplayPoint::new(0.0, 0.0));
        // same display position is now 0.4 data units from point 1
        let hit = PickQuery::new(&index, &vt).pick_hit(DisplayPoint::new(4.0, 0.0), 5.0).unwrap();
        assert!((hit.distance - 0.4).abs() < 1e-12);
        assert!(PickQuery::new(&index, &vt).pick(DisplayPoint::new(60.0, 0.0), 5.0).is_none());
    }

    #[test]
    fn test_pick_on_empty_index() {
        let empty = SpatialIndex::default();
        let vt = ViewportTransform::new();
        assert!(PickQuery::new(&empty, &vt).pick(DisplayPoint::new(0.0, 0.0), 100.0).is_none());
    }
}
