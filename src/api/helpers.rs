//! Response builders shared by the API handlers.
//!
//! Every body carries a `status` field: `"success"` with the payload merged
//! in, or `"error"` with a `message`.

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

pub type ApiResponse = (StatusCode, Json<Value>);

/// Returns a 200 OK response with `payload`'s fields next to `status`.
#[must_use]
pub fn ok(payload: Value) -> ApiResponse {
    let mut body = json!({ "status": "success" });
    if let (Some(target), Value::Object(fields)) = (body.as_object_mut(), payload) {
        target.extend(fields);
    }
    (StatusCode::OK, Json(body))
}

/// Returns a 200 OK response with a human-readable message.
#[must_use]
pub fn ok_message(message: &str) -> ApiResponse {
    ok(json!({ "message": message }))
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status: StatusCode, message: &str) -> ApiResponse {
    (
        status,
        Json(json!({ "status": "error", "message": message })),
    )
}
