//! Document service: shared notes, per-page notes and per-page status.
//!
//! DESIGN
//! ======
//! Each document is one blob under a fixed key. Notes are plain text; page
//! notes and status are JSON objects keyed by page id. Updates to the JSON
//! documents load the whole object, set one key and write it back, holding
//! `AppState::document_lock` so concurrent posts within this process are not
//! lost. Writers in other processes still race; the store has no
//! conditional write.

use serde_json::{Map, Value};
use tracing::info;

use crate::blob::BlobError;
use crate::error::ErrorCode;
use crate::state::AppState;

pub const NOTES_KEY: &str = "proxa-notes.txt";
pub const PAGE_NOTES_KEY: &str = "proxa-page-notes.json";
pub const STATUS_KEY: &str = "proxa-status.json";

/// A JSON document keyed by page id.
pub type PageMap = Map<String, Value>;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Blob(#[from] BlobError),
    #[error("Page ID required")]
    PageRequired,
}

impl ErrorCode for DocumentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Blob(e) => e.error_code(),
            Self::PageRequired => "E_PAGE_REQUIRED",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Blob(e) => e.retryable(),
            Self::PageRequired => false,
        }
    }
}

// =============================================================================
// NOTES
// =============================================================================

/// Shared notes text; empty when nothing has been saved.
///
/// # Errors
///
/// Returns `Blob` if the store read fails.
pub async fn load_notes(state: &AppState) -> Result<String, DocumentError> {
    let bytes = state.blobs.get(NOTES_KEY).await?;
    Ok(bytes.map(|b| String::from_utf8_lossy(&b).into_owned()).unwrap_or_default())
}

/// Overwrite the shared notes.
///
/// # Errors
///
/// Returns `Blob` if the store write fails.
pub async fn save_notes(state: &AppState, content: &str) -> Result<(), DocumentError> {
    state.blobs.put(NOTES_KEY, content.as_bytes().to_vec()).await?;
    info!(bytes = content.len(), "notes saved");
    Ok(())
}

// =============================================================================
// PAGE NOTES
// =============================================================================

/// Every page's notes; empty when nothing has been saved.
///
/// # Errors
///
/// Returns `Blob` on a failed read or a document that is not a JSON object.
pub async fn load_page_notes(state: &AppState) -> Result<PageMap, DocumentError> {
    load_page_map(state, PAGE_NOTES_KEY).await
}

/// Notes for one page, or `None` when no page notes have ever been saved.
/// Missing or empty entries in a stored document read as `""`.
///
/// # Errors
///
/// Returns `Blob` on a failed read or a corrupt document.
pub async fn page_note(state: &AppState, page: &str) -> Result<Option<Value>, DocumentError> {
    let Some(mut notes) = read_page_map(state, PAGE_NOTES_KEY).await? else {
        return Ok(None);
    };
    Ok(Some(notes.remove(page).filter(is_truthy).unwrap_or_else(|| Value::String(String::new()))))
}

/// Set one page's notes, keeping every other page.
///
/// # Errors
///
/// Returns `PageRequired` for an empty page id, `Blob` on store failure.
pub async fn save_page_note(state: &AppState, page: &str, notes: Value) -> Result<(), DocumentError> {
    update_page_map(state, PAGE_NOTES_KEY, page, notes).await?;
    info!(page, "page notes saved");
    Ok(())
}

// =============================================================================
// STATUS
// =============================================================================

/// Every page's status; empty when nothing has been saved.
///
/// # Errors
///
/// Returns `Blob` on a failed read or a corrupt document.
pub async fn load_statuses(state: &AppState) -> Result<PageMap, DocumentError> {
    load_page_map(state, STATUS_KEY).await
}

/// Set one page's status and return the full updated map.
///
/// # Errors
///
/// Returns `PageRequired` for an empty page id, `Blob` on store failure.
pub async fn save_status(state: &AppState, page: &str, status: Value) -> Result<PageMap, DocumentError> {
    let statuses = update_page_map(state, STATUS_KEY, page, status).await?;
    info!(page, "status saved");
    Ok(statuses)
}

// =============================================================================
// HELPERS
// =============================================================================

async fn load_page_map(state: &AppState, key: &str) -> Result<PageMap, DocumentError> {
    Ok(read_page_map(state, key).await?.unwrap_or_default())
}

async fn read_page_map(state: &AppState, key: &str) -> Result<Option<PageMap>, DocumentError> {
    let Some(bytes) = state.blobs.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_slice::<PageMap>(&bytes)
        .map(Some)
        .map_err(|_| BlobError::Decode { key: key.to_owned(), expected: "JSON object" }.into())
}

async fn update_page_map(state: &AppState, key: &str, page: &str, value: Value) -> Result<PageMap, DocumentError> {
    if page.is_empty() {
        return Err(DocumentError::PageRequired);
    }
    let _guard = state.document_lock.lock().await;
    let mut map = load_page_map(state, key).await?;
    map.insert(page.to_owned(), value);
    let bytes = serde_json::to_vec(&map)
        .map_err(|_| BlobError::Decode { key: key.to_owned(), expected: "JSON object" })?;
    state.blobs.put(key, bytes).await?;
    Ok(map)
}

/// Client-side truthiness: null, false, zero and `""` read as unset.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
#[path = "documents_test.rs"]
mod tests;
