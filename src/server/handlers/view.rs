//! View handlers: SetViewport, AutoFit, Zoom, ZoomIn, ZoomOut, Pan, GetGrid

use crate::server::protocol::Response;
use crate::server::state::ServerState;
use crate::server::util::{parse_params, to_response};
use crate::view::{grid_lines, DisplayPoint, ViewportSize};
use serde::Deserialize;

fn viewport_response(state: &ServerState, id: Option<serde_json::Value>) -> Response {
    Response::success(id, serde_json::json!({
        "scale": state.viewport.scale(),
        "pan": state.viewport.pan(),
        "size": state.viewport_size,
    }))
}

/// Handle SetViewport request - records the display size and re-fits
pub fn handle_set_viewport(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let size: ViewportSize = match parse_params(id.clone(), params, "{width, height}") {
        Ok(s) => s,
        Err(e) => return e,
    };
    state.viewport_size = ViewportSize::new(size.width.max(0.0), size.height.max(0.0));
    state.fit_view();
    viewport_response(state, id)
}

/// Handle AutoFit request - resets the view to the snapshot bounds
pub fn handle_auto_fit(state: &mut ServerState, id: Option<serde_json::Value>) -> Response {
    if !state.fit_view() {
        log::debug!("AutoFit with no geometry, view unchanged");
    }
    viewport_response(state, id)
}

/// Handle Zoom request - zooms by `factor` keeping the display point (x, y) fixed
pub fn handle_zoom(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct Params {
        factor: f64,
        x: f64,
        y: f64,
    }

    let p: Params = match parse_params(id.clone(), params, "{factor, x, y}") {
        Ok(p) => p,
        Err(e) => return e,
    };
    state.viewport.zoom(p.factor, DisplayPoint::new(p.x, p.y));
    viewport_response(state, id)
}

/// Handle ZoomIn/ZoomOut requests - one zoom step around the viewport center
pub fn handle_zoom_step(state: &mut ServerState, id: Option<serde_json::Value>, zoom_in: bool) -> Response {
    let step = state.view_settings.zoom_step;
    if zoom_in {
        state.viewport.zoom_in(step, state.viewport_size);
    } else {
        state.viewport.zoom_out(step, state.viewport_size);
    }
    viewport_response(state, id)
}

/// Handle Pan request - translates the view by a display-space delta
pub fn handle_pan(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct Params {
        dx: f64,
        dy: f64,
    }

    let p: Params = match parse_params(id.clone(), params, "{dx, dy}") {
        Ok(p) => p,
        Err(e) => return e,
    };
    state.viewport.pan_by(p.dx, p.dy);
    viewport_response(state, id)
}

/// Handle GetGrid request - grid line positions for the visible area
pub fn handle_get_grid(state: &ServerState, id: Option<serde_json::Value>) -> Response {
    let grid = grid_lines(&state.viewport, state.viewport_size, state.view_settings.grid_spacing);
    to_response(id, &grid)
}
