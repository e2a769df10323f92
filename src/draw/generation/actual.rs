//! Actual pass: theory placement plus each unit's scaled offset

use super::offsets::UnitOffsets;
use super::theory::ResolvedSite;
use crate::dataset::UnitKey;
use crate::draw::geometry::{place_with_offset, ActualPoint, PlacementConfig, ShotMap};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Sites without a theory placement are left out of that unit's points; an
/// incomplete actual polygon is a normal state. Units left with no points
/// are dropped.
pub(super) fn build_actual(
    offsets: &UnitOffsets,
    sites: &BTreeMap<i64, ResolvedSite>,
    config: &PlacementConfig,
) -> IndexMap<UnitKey, ShotMap<ActualPoint>> {
    let mut actual = IndexMap::new();

    for (unit, site_offsets) in offsets {
        let mut shots: ShotMap<ActualPoint> = BTreeMap::new();
        for (&site, axis_offsets) in site_offsets {
            let Some(resolved) = sites.get(&site) else {
                log::info!("Site {} of unit {} has no theory placement, left out", site, unit);
                continue;
            };
            let offset = axis_offsets.as_point();
            shots.entry(resolved.address.shot).or_default().insert(
                resolved.address.seq,
                ActualPoint {
                    site,
                    offset,
                    position: place_with_offset(resolved.raw, resolved.address.shot, offset, config),
                    out_of_spec: config.is_out_of_spec(offset),
                },
            );
        }
        if shots.is_empty() {
            log::info!("Unit {} has no placeable sites", unit);
            continue;
        }
        actual.insert(unit.clone(), shots);
    }

    actual
}
