//! Immutable result of one geometry build
//!
//! A new build produces a whole new snapshot; nothing here is mutated after
//! construction, so a holder can swap one reference to move to new geometry.

use super::placement::PlacementConfig;
use super::spatial::SpatialIndex;
use super::types::*;
use crate::dataset::UnitKey;
use crate::error::ParseWarning;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Theory, actual and mean point maps plus the spatial index over all of them
#[derive(Debug, Default)]
pub struct GeometrySnapshot {
    config: PlacementConfig,
    theory: ShotMap<TheoryPoint>,
    actual: IndexMap<UnitKey, ShotMap<ActualPoint>>,
    mean: ShotMap<MeanPoint>,
    warnings: Vec<ParseWarning>,
    index: SpatialIndex,
}

/// Counts for status displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    pub shots: usize,
    pub units: usize,
    pub points: usize,
    pub warnings: usize,
}

impl GeometrySnapshot {
    /// The idle state: no geometry, empty index
    pub fn empty(config: PlacementConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Assembles a snapshot and indexes its points.
    ///
    /// Index slots run theory first (by shot, seq), then actual (by unit in
    /// first-seen order, shot, seq), then mean (by shot, seq).
    pub fn new(
        config: PlacementConfig,
        theory: ShotMap<TheoryPoint>,
        actual: IndexMap<UnitKey, ShotMap<ActualPoint>>,
        mean: ShotMap<MeanPoint>,
        warnings: Vec<ParseWarning>,
    ) -> Self {
        let mut points = Vec::new();

        for (&shot, ring) in &theory {
            for (&seq, point) in ring {
                points.push((point.position, PointMetadata {
                    kind: PointKind::Theory,
                    shot,
                    seq,
                    site: point.site,
                    unit: None,
                    out_of_spec: false,
                }));
            }
        }
        for (unit, shots) in &actual {
            for (&shot, ring) in shots {
                for (&seq, point) in ring {
                    points.push((point.position, PointMetadata {
                        kind: PointKind::Actual,
                        shot,
                        seq,
                        site: point.site,
                        unit: Some(unit.clone()),
                        out_of_spec: point.out_of_spec,
                    }));
                }
            }
        }
        for (&shot, ring) in &mean {
            for (&seq, point) in ring {
                points.push((point.position, PointMetadata {
                    kind: PointKind::Mean,
                    shot,
                    seq,
                    site: point.site,
                    unit: None,
                    out_of_spec: point.out_of_spec,
                }));
            }
        }

        Self {
            config,
            theory,
            actual,
            mean,
            warnings,
            index: SpatialIndex::build(points),
        }
    }

    /// Replaces the warning list, keeping all geometry
    pub(crate) fn with_warnings(mut self, warnings: Vec<ParseWarning>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn theory(&self) -> &ShotMap<TheoryPoint> {
        &self.theory
    }

    pub fn actual(&self) -> &IndexMap<UnitKey, ShotMap<ActualPoint>> {
        &self.actual
    }

    pub fn mean(&self) -> &ShotMap<MeanPoint> {
        &self.mean
    }

    /// Row-level warnings collected while building this snapshot
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    /// Flattened metadata, indexed identically to [`GeometrySnapshot::positions`]
    pub fn metadata(&self) -> &[PointMetadata] {
        self.index.metadata()
    }

    pub fn positions(&self) -> &[MapPoint] {
        self.index.positions()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Closed theory ring per shot; shots with a single point are omitted
    pub fn theory_polygons(&self) -> BTreeMap<i32, Polygon> {
        rings_to_polygons(&self.theory)
    }

    /// Closed actual rings per unit and shot, in unit first-seen order
    pub fn actual_polygons(&self) -> IndexMap<UnitKey, BTreeMap<i32, Polygon>> {
        self.actual
            .iter()
            .map(|(unit, shots)| (unit.clone(), rings_to_polygons(shots)))
            .filter(|(_, polygons)| !polygons.is_empty())
            .collect()
    }

    pub fn mean_polygons(&self) -> BTreeMap<i32, Polygon> {
        rings_to_polygons(&self.mean)
    }

    /// Bounds over every plotted point, `None` when there are none
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(
            self.positions()
                .iter()
                .copied()
                .filter(|p| p.x.is_finite() && p.y.is_finite()),
        )
    }

    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            shots: self.theory.len(),
            units: self.actual.len(),
            points: self.index.len(),
            warnings: self.warnings.len(),
        }
    }

    /// Looks up the stored point behind a metadata entry
    pub fn theory_point(&self, shot: i32, seq: i32) -> Option<&TheoryPoint> {
        self.theory.get(&shot)?.get(&seq)
    }

    pub fn actual_point(&self, unit: &UnitKey, shot: i32, seq: i32) -> Option<&ActualPoint> {
        self.actual.get(unit)?.get(&shot)?.get(&seq)
    }

    pub fn mean_point(&self, shot: i32, seq: i32) -> Option<&MeanPoint> {
        self.mean.get(&shot)?.get(&seq)
    }
}

fn rings_to_polygons<T: PlottedPoint>(rings: &ShotMap<T>) -> BTreeMap<i32, Polygon> {
    rings
        .iter()
        .filter_map(|(&shot, ring)| Polygon::from_ring(ring).map(|poly| (shot, poly)))
        .collect()
}
