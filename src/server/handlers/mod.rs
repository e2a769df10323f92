//! Handler module declarations and request dispatch

pub mod data;
pub mod query;
pub mod view;

pub use data::*;
pub use query::*;
pub use view::*;

use super::protocol::{error_codes, Request, Response};
use super::state::ServerState;

/// Routes one request to its handler
pub fn handle_request(state: &mut ServerState, request: Request) -> Response {
    let Request { id, method, params } = request;
    match method.as_str() {
        "LoadMapping" => handle_load_mapping(state, id, params),
        "LoadDataset" => handle_load_dataset(state, id, params),
        "SetConfig" => handle_set_config(state, id, params),
        "GetGeometry" => handle_get_geometry(state, id),
        "SetViewport" => handle_set_viewport(state, id, params),
        "AutoFit" => handle_auto_fit(state, id),
        "Zoom" => handle_zoom(state, id, params),
        "ZoomIn" => handle_zoom_step(state, id, true),
        "ZoomOut" => handle_zoom_step(state, id, false),
        "Pan" => handle_pan(state, id, params),
        "Pick" => handle_pick(state, id, params),
        "GetGrid" => handle_get_grid(state, id),
        other => Response::error(id, error_codes::METHOD_NOT_FOUND, format!("Unknown method: {}", other)),
    }
}
