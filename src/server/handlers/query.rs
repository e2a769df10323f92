//! Query handlers: GetGeometry, Pick

use crate::dataset::UnitKey;
use crate::draw::geometry::{MapPoint, PointMetadata, Polygon};
use crate::server::protocol::Response;
use crate::server::state::ServerState;
use crate::server::util::{parse_params, to_response};
use crate::view::{describe_point, DisplayPoint, PickQuery};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize)]
struct UnitPolygons {
    unit: UnitKey,
    label: String,
    polygons: BTreeMap<i32, Polygon>,
}

#[derive(Serialize)]
struct PlottedPointJson<'a> {
    position: MapPoint,
    #[serde(flatten)]
    metadata: &'a PointMetadata,
}

/// Handle GetGeometry request - every closed polygon plus the flattened point list
pub fn handle_get_geometry(state: &ServerState, id: Option<serde_json::Value>) -> Response {
    let snapshot = &state.snapshot;
    let actual_polygons = snapshot.actual_polygons();
    // UnitKey is a struct, so units travel as a list rather than a JSON object
    let actual: Vec<UnitPolygons> = actual_polygons
        .into_iter()
        .map(|(unit, polygons)| UnitPolygons { label: unit.to_string(), unit, polygons })
        .collect();
    let points: Vec<PlottedPointJson<'_>> = snapshot
        .positions()
        .iter()
        .zip(snapshot.metadata())
        .map(|(&position, metadata)| PlottedPointJson { position, metadata })
        .collect();

    let result = serde_json::json!({
        "theory": snapshot.theory_polygons(),
        "actual": actual,
        "mean": snapshot.mean_polygons(),
        "points": points,
        "bounds": snapshot.bounds(),
        "summary": snapshot.summary(),
        "warnings": snapshot.warnings(),
    });
    to_response(id, &result)
}

/// Handle Pick request - finds the plotted point under a display coordinate.
/// Returns null when nothing lies within the pick radius.
pub fn handle_pick(
    state: &ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct Params {
        x: f64,
        y: f64,
        threshold_px: Option<f64>,
    }

    let p: Params = match parse_params(id.clone(), params, "{x, y, threshold_px?}") {
        Ok(p) => p,
        Err(e) => return e,
    };

    let threshold = p.threshold_px.unwrap_or(state.view_settings.pick_threshold_px);
    let query = PickQuery::new(state.snapshot.index(), &state.viewport);
    match query.pick_hit(DisplayPoint::new(p.x, p.y), threshold) {
        Some(hit) => Response::success(id, serde_json::json!({
            "metadata": hit.metadata,
            "position": hit.position,
            "display": state.viewport.to_display(hit.position),
            "distance": hit.distance,
            "description": describe_point(&state.snapshot, hit.metadata),
        })),
        None => Response::success(id, serde_json::Value::Null),
    }
}
