//! Notes, page-notes and status routes.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::error;

use crate::blob::BlobError;
use crate::error::ApiError;
use crate::services::documents::{self, DocumentError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct NotesBody {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Deserialize)]
pub struct PageNotesBody {
    #[serde(default)]
    pub page: Value,
    #[serde(default)]
    pub notes: Value,
}

#[derive(Deserialize)]
pub struct StatusBody {
    #[serde(default)]
    pub page: Value,
    #[serde(default)]
    pub status: Value,
}

pub(crate) fn document_error_to_status(err: &DocumentError) -> StatusCode {
    match err {
        DocumentError::PageRequired | DocumentError::Blob(BlobError::InvalidKey(_)) => StatusCode::BAD_REQUEST,
        DocumentError::Blob(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_error(err: &DocumentError) -> ApiError {
    let status = document_error_to_status(err);
    if status.is_server_error() {
        error!(error = %err, "document request failed");
    }
    ApiError::from_error(status, err)
}

/// `GET /api/notes`: shared notes text.
pub async fn get_notes(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let content = documents::load_notes(&state).await.map_err(|e| api_error(&e))?;
    Ok(Json(json!({ "content": content })))
}

/// `POST /api/notes`: replace the shared notes.
pub async fn save_notes(State(state): State<AppState>, Json(body): Json<NotesBody>) -> Result<Json<Value>, ApiError> {
    documents::save_notes(&state, body.content.as_deref().unwrap_or_default())
        .await
        .map_err(|e| api_error(&e))?;
    Ok(Json(json!({ "success": true })))
}

/// `GET /api/page-notes`: every page's notes, or `{notes}` for `?page=`.
/// Both forms read `{}` until page notes have been saved once.
pub async fn get_page_notes(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    match query.page.filter(|p| !p.is_empty()) {
        Some(page) => {
            let notes = documents::page_note(&state, &page).await.map_err(|e| api_error(&e))?;
            Ok(Json(notes.map_or_else(|| json!({}), |notes| json!({ "notes": notes }))))
        }
        None => {
            let all = documents::load_page_notes(&state).await.map_err(|e| api_error(&e))?;
            Ok(Json(Value::Object(all)))
        }
    }
}

/// `POST /api/page-notes`: set one page's notes.
pub async fn save_page_notes(
    State(state): State<AppState>,
    Json(body): Json<PageNotesBody>,
) -> Result<Json<Value>, ApiError> {
    let page = page_key(&body.page);
    documents::save_page_note(&state, &page, body.notes)
        .await
        .map_err(|e| api_error(&e))?;
    Ok(Json(json!({ "success": true })))
}

/// `GET /api/status`: every page's status.
pub async fn get_status(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let statuses = documents::load_statuses(&state).await.map_err(|e| api_error(&e))?;
    Ok(Json(Value::Object(statuses)))
}

/// `POST /api/status`: set one page's status; echoes the full map.
pub async fn save_status(State(state): State<AppState>, Json(body): Json<StatusBody>) -> Result<Json<Value>, ApiError> {
    let page = page_key(&body.page);
    let statuses = documents::save_status(&state, &page, body.status)
        .await
        .map_err(|e| api_error(&e))?;
    Ok(Json(json!({ "success": true, "statuses": statuses })))
}

/// Map key for a posted page id. Strings and numbers are accepted; anything
/// falsy or structured yields `""`, which the service rejects.
fn page_key(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
#[path = "documents_test.rs"]
mod tests;
