//! Utility functions for request handlers

use super::protocol::{error_codes, Response};
use serde::de::DeserializeOwned;

/// Deserializes request params, or builds the INVALID_PARAMS response to send back.
/// `expected` describes the param shape for the error message.
pub fn parse_params<T: DeserializeOwned>(
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
    expected: &str,
) -> Result<T, Response> {
    let value = params.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(value).map_err(|e| {
        Response::error(
            id,
            error_codes::INVALID_PARAMS,
            format!("Invalid params: expected {} ({})", expected, e),
        )
    })
}

/// Serializes a handler result, reporting failures as INTERNAL_ERROR
pub fn to_response<T: serde::Serialize>(id: Option<serde_json::Value>, result: &T) -> Response {
    match serde_json::to_value(result) {
        Ok(value) => Response::success(id, value),
        Err(e) => Response::error(id, error_codes::INTERNAL_ERROR, format!("Failed to serialize result: {}", e)),
    }
}
