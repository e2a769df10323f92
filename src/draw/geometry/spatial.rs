//! Spatial indexing for hover and pick queries
//!
//! Plotted points are bulk-loaded into an R-tree once per geometry build.
//! Point metadata is kept in a parallel array indexed by the same slot the
//! tree entries carry, so the index knows nothing about drawing.

use super::types::{MapPoint, PointMetadata};
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// Relative tolerance on squared distance under which two candidates count as tied
const TIE_EPSILON: f64 = 1e-12;

/// R-tree entry: a point position and its slot in the metadata array
#[derive(Clone, Debug)]
pub struct IndexedPoint {
    pub position: [f64; 2],
    pub slot: usize,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Result of a nearest-point query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestHit<'a> {
    pub slot: usize,
    pub position: MapPoint,
    pub metadata: &'a PointMetadata,
    pub distance: f64,
}

/// Static nearest-neighbour index, rebuilt wholesale whenever geometry changes
#[derive(Debug, Default)]
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
    positions: Vec<MapPoint>,
    metadata: Vec<PointMetadata>,
}

impl SpatialIndex {
    /// Builds the index. Slots follow input order; that order decides ties.
    /// Non-finite positions keep their slot but are never returned.
    pub fn build(points: Vec<(MapPoint, PointMetadata)>) -> Self {
        let mut positions = Vec::with_capacity(points.len());
        let mut metadata = Vec::with_capacity(points.len());
        let mut entries = Vec::with_capacity(points.len());

        for (slot, (position, meta)) in points.into_iter().enumerate() {
            if position.x.is_finite() && position.y.is_finite() {
                entries.push(IndexedPoint {
                    position: [position.x, position.y],
                    slot,
                });
            } else {
                log::warn!("Point {} at ({}, {}) left out of spatial index", slot, position.x, position.y);
            }
            positions.push(position);
            metadata.push(meta);
        }

        Self {
            tree: RTree::bulk_load(entries),
            positions,
            metadata,
        }
    }

    /// Nearest indexed point to `query`, `None` when the index is empty.
    ///
    /// Among candidates tied within floating-point tolerance the lowest slot wins.
    pub fn nearest(&self, query: MapPoint) -> Option<NearestHit<'_>> {
        let mut candidates = self.tree.nearest_neighbor_iter_with_distance_2(&[query.x, query.y]);
        let (first, best_d2) = candidates.next()?;
        let tolerance = TIE_EPSILON * best_d2.max(1.0);

        let mut slot = first.slot;
        for (candidate, d2) in candidates {
            if d2 - best_d2 > tolerance {
                break;
            }
            slot = slot.min(candidate.slot);
        }

        Some(NearestHit {
            slot,
            position: self.positions[slot],
            metadata: &self.metadata[slot],
            distance: best_d2.sqrt(),
        })
    }

    /// Number of points, including any left out of the tree
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[MapPoint] {
        &self.positions
    }

    /// Metadata indexed identically to [`SpatialIndex::positions`]
    pub fn metadata(&self) -> &[PointMetadata] {
        &self.metadata
    }
}
