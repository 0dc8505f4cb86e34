//! File and attachment routes.
//!
//! Uploads arrive as the raw request body. The stored name comes from the
//! `filename` query parameter, then the `X-Filename` header, then a
//! timestamped fallback.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use time::OffsetDateTime;
use tracing::{error, warn};

use crate::blob::BlobError;
use crate::error::ApiError;
use crate::services::files::{self, FileEntry, UploadError, UploadKind};
use crate::state::AppState;

const FILENAME_HEADER: &str = "x-filename";

#[derive(Deserialize)]
pub struct UploadQuery {
    pub filename: Option<String>,
}

pub(crate) fn upload_error_to_status(err: &UploadError) -> StatusCode {
    match err {
        UploadError::NoFile
        | UploadError::InvalidName(_)
        | UploadError::TypeNotAllowed
        | UploadError::Blob(BlobError::InvalidKey(_)) => StatusCode::BAD_REQUEST,
        UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        UploadError::Workbook(_) | UploadError::Blob(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_error(err: &UploadError) -> ApiError {
    let status = upload_error_to_status(err);
    if status.is_server_error() {
        error!(error = %err, "file request failed");
    }
    ApiError::from_error(status, err)
}

fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "E_FILE_NOT_FOUND", "File not found")
}

// =============================================================================
// FILES
// =============================================================================

/// `GET /api/files`: reference files grouped by category.
pub async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<FileEntry>>, ApiError> {
    let entries = files::list(&state, UploadKind::File).await.map_err(|e| api_error(&e))?;
    Ok(Json(entries))
}

/// `POST /api/files`, `POST /api/upload`: store a reference file.
pub async fn upload_file(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    upload(&state, UploadKind::File, query, &headers, body).await
}

/// `DELETE /api/files/{name}`: remove a reference file from any category.
pub async fn delete_file(State(state): State<AppState>, Path(name): Path<String>) -> Result<Json<Value>, ApiError> {
    remove(&state, UploadKind::File, &name).await
}

// =============================================================================
// ATTACHMENTS
// =============================================================================

/// `GET /api/attachments`
pub async fn list_attachments(State(state): State<AppState>) -> Result<Json<Vec<FileEntry>>, ApiError> {
    let entries = files::list(&state, UploadKind::Attachment).await.map_err(|e| api_error(&e))?;
    Ok(Json(entries))
}

/// `POST /api/attachments`
pub async fn upload_attachment(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    upload(&state, UploadKind::Attachment, query, &headers, body).await
}

/// `DELETE /api/attachments/{name}`
pub async fn delete_attachment(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    remove(&state, UploadKind::Attachment, &name).await
}

// =============================================================================
// CONTENT
// =============================================================================

/// `GET /api/ai/file-content/{name}`: text of a stored file for use as
/// generation reference data.
pub async fn file_content(State(state): State<AppState>, Path(name): Path<String>) -> Result<Json<Value>, ApiError> {
    let content = files::file_content(&state, &name)
        .await
        .map_err(|e| api_error(&e))?
        .ok_or_else(not_found)?;
    Ok(Json(json!({ "success": true, "content": content.content, "type": content.content_type })))
}

// =============================================================================
// HELPERS
// =============================================================================

async fn upload(
    state: &AppState,
    kind: UploadKind,
    query: UploadQuery,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    let bytes = body.map_err(|rejection| {
        let err = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge { limit: kind.max_bytes() }
        } else {
            UploadError::NoFile
        };
        warn!(error = %rejection, "upload body rejected");
        api_error(&err).with_success_flag()
    })?;

    let header = headers.get(FILENAME_HEADER).and_then(|v| v.to_str().ok());
    let name = files::resolve_filename(query.filename.as_deref(), header, OffsetDateTime::now_utc());
    let entry = files::upload(state, kind, &name, bytes.to_vec())
        .await
        .map_err(|e| api_error(&e).with_success_flag())?;
    Ok(Json(json!({ "success": true, "file": entry })))
}

async fn remove(state: &AppState, kind: UploadKind, name: &str) -> Result<Json<Value>, ApiError> {
    if files::delete(state, kind, name).await.map_err(|e| api_error(&e))? {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(not_found())
    }
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
