//! Offset pass: collect position offsets per unit and site

use crate::dataset::{MeasurementRecord, OffsetAxis, UnitKey};
use crate::draw::geometry::MapPoint;
use crate::error::{ParseWarning, WarningKind};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashSet};

/// Offset readings of one site within one unit; either axis may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(super) struct AxisOffsets {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl AxisOffsets {
    fn set(&mut self, axis: OffsetAxis, value: f64) {
        match axis {
            OffsetAxis::X => self.x = Some(value),
            OffsetAxis::Y => self.y = Some(value),
        }
    }

    /// Missing axes read as 0
    pub fn as_point(&self) -> MapPoint {
        MapPoint::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }
}

/// `unit -> site -> offsets`, units in first-seen order
pub(super) type UnitOffsets = IndexMap<UnitKey, BTreeMap<i64, AxisOffsets>>;

/// Unrecognized parameter names are not errors; each distinct name is
/// reported once so a wide export doesn't flood the warning list.
pub(super) fn collect_offsets(records: &[MeasurementRecord], warnings: &mut Vec<ParseWarning>) -> UnitOffsets {
    let mut offsets = UnitOffsets::new();
    let mut ignored = HashSet::new();

    for record in records {
        let Some(param) = &record.param else {
            continue;
        };
        let Some(axis) = OffsetAxis::from_param_name(&param.name) else {
            if ignored.insert(param.name.as_str()) {
                log::debug!("Ignoring parameter '{}' (row {})", param.name, record.row);
                warnings.push(ParseWarning::new(
                    record.row,
                    WarningKind::UnrecognizedParam { name: param.name.clone() },
                ));
            }
            continue;
        };

        offsets
            .entry(record.unit.clone())
            .or_default()
            .entry(record.site)
            .or_default()
            .set(axis, param.value);
    }

    offsets
}
