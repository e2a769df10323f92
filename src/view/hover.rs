//! Hover text for picked points

use crate::draw::geometry::{GeometrySnapshot, PointKind, PointMetadata};

/// Describes a picked point using what the snapshot stored for it.
///
/// Theory points show the raw design coordinate, actual points their unit
/// and raw offsets, mean points the contributing unit count and mean offset.
pub fn describe_point(snapshot: &GeometrySnapshot, meta: &PointMetadata) -> String {
    let mut text = match meta.kind {
        PointKind::Theory => format!("Theory point - Shot {}, Seq {}", meta.shot, meta.seq),
        PointKind::Actual => format!("Actual point - Shot {}, Seq {}", meta.shot, meta.seq),
        PointKind::Mean => format!("Mean point - Shot {}, Seq {}", meta.shot, meta.seq),
    };
    text.push_str(&format!("\nSite: {}", meta.site));

    match meta.kind {
        PointKind::Theory => {
            if let Some(point) = snapshot.theory_point(meta.shot, meta.seq) {
                text.push_str(&format!("\nDesign: ({}, {})", point.raw.x, point.raw.y));
            }
        }
        PointKind::Actual => {
            let point = meta
                .unit
                .as_ref()
                .and_then(|unit| snapshot.actual_point(unit, meta.shot, meta.seq));
            if let Some(unit) = &meta.unit {
                text.push_str(&format!("\nGlass: {}", unit));
            }
            if let Some(point) = point {
                text.push_str(&format!("\nOffset: X={}, Y={}", point.offset.x, point.offset.y));
            }
        }
        PointKind::Mean => {
            if let Some(point) = snapshot.mean_point(meta.shot, meta.seq) {
                text.push_str(&format!("\nUnits: {}", point.units));
                text.push_str(&format!("\nMean offset: X={}, Y={}", point.offset.x, point.offset.y));
            }
        }
    }

    if meta.out_of_spec {
        text.push_str("\nOut of spec");
    }
    text
}
