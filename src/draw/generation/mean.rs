//! Mean pass: per-site offsets averaged over every unit that measured the site

use super::theory::ResolvedSite;
use crate::dataset::UnitKey;
use crate::draw::geometry::{place_with_offset, ActualPoint, MapPoint, MeanPoint, PlacementConfig, ShotMap};
use indexmap::IndexMap;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct OffsetSum {
    x: f64,
    y: f64,
    units: usize,
}

/// Averages the unscaled offsets of the actual points, so a site is covered
/// exactly when it appears in at least one unit's actual points.
pub(super) fn build_mean(
    actual: &IndexMap<UnitKey, ShotMap<ActualPoint>>,
    sites: &BTreeMap<i64, ResolvedSite>,
    config: &PlacementConfig,
) -> ShotMap<MeanPoint> {
    let mut sums: BTreeMap<i64, OffsetSum> = BTreeMap::new();
    for point in actual.values().flat_map(|shots| shots.values()).flat_map(|ring| ring.values()) {
        let sum = sums.entry(point.site).or_default();
        sum.x += point.offset.x;
        sum.y += point.offset.y;
        sum.units += 1;
    }

    let mut mean: ShotMap<MeanPoint> = BTreeMap::new();
    for (site, sum) in sums {
        let Some(resolved) = sites.get(&site) else {
            continue;
        };
        let n = sum.units as f64;
        let offset = MapPoint::new(sum.x / n, sum.y / n);
        mean.entry(resolved.address.shot).or_default().insert(
            resolved.address.seq,
            MeanPoint {
                site,
                offset,
                units: sum.units,
                position: place_with_offset(resolved.raw, resolved.address.shot, offset, config),
                out_of_spec: config.is_out_of_spec(offset),
            },
        );
    }
    mean
}
