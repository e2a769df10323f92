// Request dispatch through the JSON-line server state
use serde_json::{json, Value};
use site_offset_map::server::{error_codes, handle_request, Request, Response, ServerState};

fn call(state: &mut ServerState, method: &str, params: Value) -> Response {
    let request: Request = serde_json::from_value(json!({
        "id": 1,
        "method": method,
        "params": params,
    }))
    .expect("valid request");
    handle_request(state, request)
}

fn result(response: Response) -> Value {
    assert!(!response.is_error(), "unexpected error: {:?}", response.error);
    response.result.expect("result present")
}

fn dataset_params() -> Value {
    json!({
        "columns": ["GLASS_ID", "GLASS_END_TIME", "SITE_NAME", "X", "Y", "PARAM_NAME", "PARAM_VALUE"],
        "rows": [
            ["G1", "T1", "1", "1000", "2000", "POS_X1", "0.5"],
            ["G1", "T1", "1", "1000", "2000", "POS_Y1", "0.5"],
            ["G1", "T1", "2", "3000", "4000", "POS_X1", "0"],
            ["G1", "T1", "2", "3000", "4000", "POS_Y1", "0"],
        ],
    })
}

fn loaded_state() -> ServerState {
    let mut state = ServerState::new();
    result(call(&mut state, "SetConfig", json!({
        "placement": {"design_scale": 1.0, "offset_scale": 1.0, "shot_separation": 0.0},
    })));
    result(call(&mut state, "LoadMapping", json!({"text": "Site,Shot,Seq\n1,1,1\n2,1,2\n"})));
    result(call(&mut state, "LoadDataset", dataset_params()));
    state
}

#[test]
fn test_load_and_get_geometry() {
    let mut state = loaded_state();
    let geometry = result(call(&mut state, "GetGeometry", Value::Null));

    assert_eq!(geometry["theory"]["1"]["points"], json!([
        {"x": 1.0, "y": 2.0},
        {"x": 3.0, "y": 4.0},
        {"x": 1.0, "y": 2.0},
    ]));
    assert_eq!(geometry["actual"][0]["label"], json!("G1_T1"));
    assert_eq!(geometry["actual"][0]["polygons"]["1"]["points"][0], json!({"x": 1.5, "y": 2.5}));
    assert_eq!(geometry["summary"]["units"], json!(1));
    // two theory, two actual, two mean points
    assert_eq!(geometry["points"].as_array().map(Vec::len), Some(6));
}

#[test]
fn test_missing_columns_keep_previous_geometry() {
    let mut state = loaded_state();
    let before = state.snapshot.summary();

    let response = call(&mut state, "LoadDataset", json!({
        "columns": ["GLASS_ID", "GLASS_END_TIME", "SITE_NAME", "Y", "PARAM_NAME", "PARAM_VALUE"],
        "rows": [],
    }));
    let error = response.error.expect("batch rejected");
    assert_eq!(error.code, error_codes::MISSING_COLUMNS);
    assert!(error.message.contains('X'), "{}", error.message);
    assert_eq!(state.snapshot.summary(), before);
}

#[test]
fn test_pick_after_auto_fit() {
    let mut state = loaded_state();
    result(call(&mut state, "SetViewport", json!({"width": 800.0, "height": 600.0})));

    let target = state.viewport.to_display(site_offset_map::MapPoint::new(3.0, 4.0));
    let hit = result(call(&mut state, "Pick", json!({"x": target.x + 1.0, "y": target.y})));
    assert_eq!(hit["metadata"]["site"], json!(2));
    assert!(hit["description"].as_str().unwrap_or("").contains("Site: 2"));

    let miss = result(call(&mut state, "Pick", json!({"x": -500.0, "y": -500.0})));
    assert!(miss.is_null());
}

#[test]
fn test_zoom_and_pan_requests() {
    let mut state = loaded_state();
    let fitted = result(call(&mut state, "AutoFit", Value::Null));
    let scale = fitted["scale"].as_f64().expect("scale");

    let zoomed = result(call(&mut state, "ZoomIn", Value::Null));
    let zoomed_scale = zoomed["scale"].as_f64().expect("scale");
    assert!((zoomed_scale - scale * 1.2).abs() < 1e-9 * scale);

    let panned = result(call(&mut state, "Pan", json!({"dx": 10.0, "dy": -4.0})));
    assert_eq!(panned["scale"], zoomed["scale"]);
    let dx = panned["pan"]["x"].as_f64().unwrap_or_default() - zoomed["pan"]["x"].as_f64().unwrap_or_default();
    assert!((dx - 10.0).abs() < 1e-9);
}

#[test]
fn test_unknown_method_and_bad_params() {
    let mut state = ServerState::new();
    let response = call(&mut state, "Explode", Value::Null);
    assert_eq!(response.error.map(|e| e.code), Some(error_codes::METHOD_NOT_FOUND));

    let response = call(&mut state, "Zoom", json!({"factor": "big"}));
    assert_eq!(response.error.map(|e| e.code), Some(error_codes::INVALID_PARAMS));

}

#[test]
fn test_set_config_clamps_out_of_range_placement() {
    let mut state = loaded_state();
    let config = result(call(&mut state, "SetConfig", json!({
        "placement": {"design_scale": -2.0, "offset_scale": 1.0, "shot_separation": -3.0},
    })));

    assert_eq!(config["placement"]["design_scale"], json!(2.0));
    assert_eq!(config["placement"]["shot_separation"], json!(0.0));
    assert_eq!(state.placement.design_scale, 2.0);
    // the retained dataset was rebuilt with the clamped scale
    let theory = state.snapshot.theory_point(1, 2).map(|p| p.position);
    assert_eq!(theory, Some(site_offset_map::MapPoint::new(1.0, 2.0)));
}
