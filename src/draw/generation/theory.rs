//! Theory pass: place the design coordinate of every resolvable site

use crate::dataset::MeasurementRecord;
use crate::draw::geometry::{place, MapPoint, PlacementConfig, ShotMap, TheoryPoint};
use crate::error::{ParseWarning, WarningKind};
use crate::mapping::{SiteAddress, SiteRegistry};
use std::collections::{BTreeMap, HashSet};

/// A site that resolved in the registry and has a design coordinate
#[derive(Debug, Clone, Copy)]
pub(super) struct ResolvedSite {
    pub address: SiteAddress,
    pub raw: MapPoint,
}

pub(super) struct TheoryPass {
    pub points: ShotMap<TheoryPoint>,
    pub sites: BTreeMap<i64, ResolvedSite>,
}

/// Every record carries its site's design coordinate, so a site usually
/// appears many times; the last row wins.
/// Unresolved sites are reported once, at their first row.
pub(super) fn place_sites(
    records: &[MeasurementRecord],
    registry: &SiteRegistry,
    config: &PlacementConfig,
    warnings: &mut Vec<ParseWarning>,
) -> TheoryPass {
    let mut points: ShotMap<TheoryPoint> = BTreeMap::new();
    let mut sites = BTreeMap::new();
    let mut unresolved = HashSet::new();

    for record in records {
        let Some(address) = registry.lookup(record.site) else {
            if unresolved.insert(record.site) {
                log::warn!("Site {} not found in site mapping (row {})", record.site, record.row);
                warnings.push(ParseWarning::new(
                    record.row,
                    WarningKind::UnresolvedSite { site: record.site },
                ));
            }
            continue;
        };

        let raw = MapPoint::new(record.x, record.y);
        sites.insert(record.site, ResolvedSite { address, raw });
        points.entry(address.shot).or_default().insert(
            address.seq,
            TheoryPoint {
                site: record.site,
                raw,
                position: place(raw, address.shot, config),
            },
        );
    }

    TheoryPass { points, sites }
}
