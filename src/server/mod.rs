use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::server::endpoints::{ingest, status};
use crate::types::AppState;

mod endpoints;
mod types;
mod upload;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Admin ingestion router; the body limit leaves headroom over the file
    // ceiling for multipart framing.
    let admin_router = Router::new()
        .route("/upload-timetable", post(ingest::post_upload_timetable))
        .route("/upload-calendar", post(ingest::post_upload_calendar))
        .layer(DefaultBodyLimit::max(upload::MAX_UPLOAD_BYTES + 64 * 1024));

    Router::new()
        .route("/", get(status::get_welcome))
        .route("/health", get(status::get_health))
        .nest("/api/v1/admin", admin_router)
        .with_state(app_state)
}
