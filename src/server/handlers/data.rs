//! Data handlers: LoadMapping, LoadDataset, SetConfig

use crate::dataset::MeasurementTable;
use crate::draw::geometry::PlacementConfig;
use crate::error::MapError;
use crate::mapping::SiteRegistry;
use crate::server::protocol::{error_codes, Response};
use crate::server::state::ServerState;
use crate::server::util::parse_params;
use crate::view::ViewSettings;
use serde::Deserialize;
use std::time::Instant;

/// Handle LoadMapping request - replaces the site registry from `Site,Shot,Seq` text
pub fn handle_load_mapping(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct Params {
        text: String,
    }

    let p: Params = match parse_params(id.clone(), params, "{text: string}") {
        Ok(p) => p,
        Err(e) => return e,
    };

    let load = match SiteRegistry::load_text(&p.text) {
        Ok(load) => load,
        Err(e) => return Response::error(id, error_codes::MAPPING_FAILED, e.to_string()),
    };

    let sites = load.registry.len();
    let snapshot = state.set_registry(load.registry, load.warnings);
    Response::success(id, serde_json::json!({
        "sites": sites,
        "warnings": &state.registry_warnings,
        "summary": snapshot.summary(),
    }))
}

/// Handle LoadDataset request - validates a measurement table and rebuilds geometry.
/// A batch with missing columns is rejected and the previous geometry stays current.
pub fn handle_load_dataset(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let table: MeasurementTable = match parse_params(id.clone(), params, "{columns: [string], rows: [[string]]}") {
        Ok(t) => t,
        Err(e) => return e,
    };

    let start = Instant::now();
    let row_count = table.rows.len();
    match state.load_dataset(table) {
        Ok(snapshot) => {
            log::info!(
                "Loaded dataset: {} rows, {} shots, {} units in {:.2?}",
                row_count,
                snapshot.summary().shots,
                snapshot.summary().units,
                start.elapsed()
            );
            Response::success(id, serde_json::json!({
                "summary": snapshot.summary(),
                "warnings": snapshot.warnings(),
            }))
        }
        Err(MapError::MissingColumns(missing)) => {
            log::warn!("Rejected dataset, missing columns: {}", missing.join(", "));
            Response::error(
                id,
                error_codes::MISSING_COLUMNS,
                MapError::MissingColumns(missing).to_string(),
            )
        }
        Err(e) => Response::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}

/// Handle SetConfig request - updates placement and/or view settings.
/// Out-of-range values are clamped, never rejected. A placement change
/// rebuilds from the retained dataset.
pub fn handle_set_config(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct Params {
        placement: Option<PlacementConfig>,
        view: Option<ViewSettings>,
    }

    let p: Params = match parse_params(id.clone(), params, "{placement?: object, view?: object}") {
        Ok(p) => p,
        Err(e) => return e,
    };

    if let Some(view) = p.view {
        state.view_settings = view.sanitized();
    }
    if let Some(placement) = p.placement {
        let sanitized = placement.sanitized();
        if sanitized != placement {
            log::warn!("Placement {:?} out of range, clamped to {:?}", placement, sanitized);
        }
        state.set_placement(sanitized);
    }

    Response::success(id, serde_json::json!({
        "placement": state.placement,
        "view": state.view_settings,
        "summary": state.snapshot.summary(),
    }))
}
