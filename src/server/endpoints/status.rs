//! Liveness and welcome endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// GET /
pub async fn get_welcome() -> Response {
    (
        StatusCode::OK,
        Json(json!({ "message": "Welcome to Tickter!" })),
    )
        .into_response()
}

/// GET /health
pub async fn get_health() -> Response {
    (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
}
