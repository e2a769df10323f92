//! Geometry generation: measurement records to a [`GeometrySnapshot`]
//!
//! Four passes, each tolerant of gaps left by the others:
//! - `theory` - place every resolvable site's design coordinate
//! - `offsets` - gather POS_X1/POS_Y1 readings per unit and site
//! - `actual` - theory placement plus each unit's scaled offset
//! - `mean` - theory placement plus the per-site average offset

mod actual;
mod mean;
mod offsets;
mod theory;

use crate::dataset::{MeasurementRecord, MeasurementTable};
use crate::draw::geometry::{GeometrySnapshot, PlacementConfig};
use crate::error::Result;
use crate::mapping::SiteRegistry;
use std::time::Instant;

/// Builds a complete snapshot from raw records. Pure: the same inputs always
/// give the same snapshot, and nothing outside the return value is touched.
///
/// The config is sanitized first, so a bad scale never divides by zero.
pub fn rebuild(
    records: &[MeasurementRecord],
    registry: &SiteRegistry,
    config: &PlacementConfig,
) -> GeometrySnapshot {
    let start = Instant::now();
    let config = config.sanitized();
    let mut warnings = Vec::new();

    let placed = theory::place_sites(records, registry, &config, &mut warnings);
    let offsets = offsets::collect_offsets(records, &mut warnings);
    let actual = actual::build_actual(&offsets, &placed.sites, &config);
    let mean = mean::build_mean(&actual, &placed.sites, &config);

    warnings.sort_by_key(|w| w.row);
    let snapshot = GeometrySnapshot::new(config, placed.points, actual, mean, warnings);

    let summary = snapshot.summary();
    log::debug!(
        "Rebuilt geometry from {} records: {} shots, {} units, {} points, {} warnings in {:.2?}",
        records.len(),
        summary.shots,
        summary.units,
        summary.points,
        summary.warnings,
        start.elapsed()
    );
    snapshot
}

/// Validates and converts a table, then rebuilds.
///
/// A missing required column aborts before any geometry is built; row-level
/// problems from conversion end up in the snapshot's warnings.
pub fn rebuild_from_table(
    table: &MeasurementTable,
    registry: &SiteRegistry,
    config: &PlacementConfig,
) -> Result<GeometrySnapshot> {
    let dataset = table.to_dataset()?;
    let snapshot = rebuild(&dataset.records, registry, config);
    if dataset.warnings.is_empty() {
        return Ok(snapshot);
    }
    let mut warnings = dataset.warnings;
    warnings.extend_from_slice(snapshot.warnings());
    warnings.sort_by_key(|w| w.row);
    Ok(snapshot.with_warnings(warnings))
}
