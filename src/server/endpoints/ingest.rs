//! API endpoints for timetable and calendar ingestion.
//!
//! The handlers are deliberately thin: validate the uploaded file, run one
//! extraction round trip, map the output onto row shapes, persist, report.
//! A failure at any stage is terminal for the request; nothing is retried.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::db::PersistenceError;
use crate::extraction::{self, generate_correlation_id, ExtractionError};
use crate::server::types::ApiErrorType;
use crate::server::upload::{self, UploadError, UploadKind};
use crate::types::AppState;

/// An upload pulled out of the multipart body.
struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    bytes: axum::body::Bytes,
}

/// Reads the named file field from the multipart body. Other fields are
/// skipped without error.
async fn read_file_field(
    mut multipart: Multipart,
    field_name: &str,
) -> Result<Option<UploadedFile>, UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Multipart(e.to_string()))?;

        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}

/// Size and allow-list checks; resolves the media type that tags the payload
/// sent to the extractor.
fn validate_upload(kind: UploadKind, file: &UploadedFile) -> Result<&'static str, UploadError> {
    upload::check_size(file.bytes.len())?;
    upload::resolve_media_type(kind, &file.file_name, file.content_type.as_deref())
}

/// Converts input-validation failures to API responses. Always 400.
fn upload_error_to_response(error: UploadError) -> Response {
    ApiErrorType::from((StatusCode::BAD_REQUEST, error.to_string().as_str(), None))
        .into_response()
}

/// Converts extraction failures to API responses.
fn extraction_error_to_response(error: ExtractionError) -> Response {
    let (status, message) = match &error {
        ExtractionError::Timeout { .. } => {
            (StatusCode::GATEWAY_TIMEOUT, "Document extraction timed out")
        }
        _ if error.is_call_failure() => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Extraction service call failed",
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to parse extracted document data",
        ),
    };

    ApiErrorType::from((status, message, Some(error.to_string()))).into_response()
}

/// Converts persistence failures to API responses.
fn persistence_error_to_response(error: PersistenceError) -> Response {
    ApiErrorType::from((
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to save extracted data",
        Some(error.to_string()),
    ))
    .into_response()
}

/// POST /api/v1/admin/upload-timetable
///
/// Accepts one image in the `timetable` field, extracts one or more
/// timetable documents from it, and persists each as a parent row plus its
/// period rows. Documents are persisted sequentially; a mid-batch failure
/// leaves earlier documents in place.
pub async fn post_upload_timetable(
    State(s): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    info!("POST /api/v1/admin/upload-timetable");

    let file = match read_file_field(multipart, "timetable").await {
        Ok(Some(file)) => file,
        Ok(None) => return upload_error_to_response(UploadError::MissingFile("timetable image")),
        Err(e) => return upload_error_to_response(e),
    };

    let media_type = match validate_upload(UploadKind::TimetableImage, &file) {
        Ok(media_type) => media_type,
        Err(e) => return upload_error_to_response(e),
    };

    let correlation_id = generate_correlation_id();
    info!(
        correlation_id = %correlation_id,
        file_name = %file.file_name,
        file_bytes = file.bytes.len(),
        media_type = %media_type,
        "Processing timetable upload"
    );

    let docs = match extraction::extract_timetables(
        &s.extractor,
        media_type,
        &file.bytes,
        &correlation_id,
    )
    .await
    {
        Ok(docs) => docs,
        Err(e) => {
            error!(correlation_id = %correlation_id, error = %e, "Timetable extraction failed");
            return extraction_error_to_response(e);
        }
    };

    let mapped = extraction::map_timetables(&docs);
    if let Err(e) = s.ingest_db.insert_timetables(&mapped) {
        error!(correlation_id = %correlation_id, error = %e, "Timetable persistence failed");
        return persistence_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Timetable uploaded and parsed successfully",
            "data": {
                "count": docs.len(),
                "documents": docs,
            }
        })),
    )
        .into_response()
}

/// POST /api/v1/admin/upload-calendar
///
/// Accepts one PDF in the `calendar` field, extracts its events, and
/// persists them in one bulk insert.
pub async fn post_upload_calendar(
    State(s): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    info!("POST /api/v1/admin/upload-calendar");

    let file = match read_file_field(multipart, "calendar").await {
        Ok(Some(file)) => file,
        Ok(None) => return upload_error_to_response(UploadError::MissingFile("calendar PDF")),
        Err(e) => return upload_error_to_response(e),
    };

    let media_type = match validate_upload(UploadKind::CalendarPdf, &file) {
        Ok(media_type) => media_type,
        Err(e) => return upload_error_to_response(e),
    };

    let correlation_id = generate_correlation_id();
    info!(
        correlation_id = %correlation_id,
        file_name = %file.file_name,
        file_bytes = file.bytes.len(),
        "Processing calendar upload"
    );

    let events = match extraction::extract_calendar_events(
        &s.extractor,
        media_type,
        &file.bytes,
        &correlation_id,
    )
    .await
    {
        Ok(events) => events,
        Err(e) => {
            error!(correlation_id = %correlation_id, error = %e, "Calendar extraction failed");
            return extraction_error_to_response(e);
        }
    };

    let rows = extraction::map_calendar_events(&events);
    if let Err(e) = s.ingest_db.insert_calendar_events(&rows) {
        error!(correlation_id = %correlation_id, error = %e, "Calendar persistence failed");
        return persistence_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Calendar uploaded and parsed successfully",
            "data": {
                "count": events.len(),
                "events": events,
            }
        })),
    )
        .into_response()
}
