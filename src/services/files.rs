//! File service: reference files and record attachments.
//!
//! DESIGN
//! ======
//! Uploads are stored in the blob store under a prefix chosen by kind:
//! reference files go to `files/<category>/<name>` with the category picked
//! from the extension, attachments go to `attachments/<name>`. Names are kept
//! as uploaded, so a second upload with the same name replaces the first.
//!
//! Each kind has its own extension allow-list and size limit. Listing and
//! delete look only at the kind's own prefix.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::info;

use crate::blob::{BlobError, BlobMeta};
use crate::error::ErrorCode;
use crate::state::AppState;

const MB: usize = 1024 * 1024;

// =============================================================================
// KINDS & CATEGORIES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Reference material shown in the file panel.
    File,
    /// Supporting data attached to a record.
    Attachment,
}

impl UploadKind {
    #[must_use]
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Self::File => &["pdf", "xlsx", "xls", "csv", "pptx", "ppt", "key", "doc", "docx"],
            Self::Attachment => &["pdf", "xlsx", "xls", "csv", "png", "jpg", "jpeg", "gif"],
        }
    }

    #[must_use]
    pub fn max_bytes(self) -> usize {
        match self {
            Self::File => 50 * MB,
            Self::Attachment => 10 * MB,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::File => "files/",
            Self::Attachment => "attachments/",
        }
    }

    /// Every key a file called `name` could be stored under, in lookup order.
    fn candidate_keys(self, name: &str) -> Vec<String> {
        match self {
            Self::File => FileCategory::SEARCH_ORDER.iter().map(|c| c.key_for(name)).collect(),
            Self::Attachment => vec![format!("attachments/{name}")],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileCategory {
    Presentations,
    Spreadsheets,
    Documents,
    Other,
}

impl FileCategory {
    /// Listing order.
    pub const ALL: [Self; 4] = [Self::Presentations, Self::Spreadsheets, Self::Documents, Self::Other];

    /// Content lookup order: data sources first.
    const SEARCH_ORDER: [Self; 4] = [Self::Spreadsheets, Self::Documents, Self::Presentations, Self::Other];

    #[must_use]
    pub fn for_extension(ext: &str) -> Self {
        match ext {
            "pptx" | "ppt" | "key" => Self::Presentations,
            "xlsx" | "xls" | "csv" => Self::Spreadsheets,
            "pdf" => Self::Documents,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Presentations => "presentations",
            Self::Spreadsheets => "spreadsheets",
            Self::Documents => "documents",
            Self::Other => "other",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }

    fn key_for(self, name: &str) -> String {
        format!("files/{}/{name}", self.as_str())
    }
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    NoFile,
    #[error("Invalid filename: {0:?}")]
    InvalidName(String),
    #[error("File type not allowed")]
    TypeNotAllowed,
    #[error("File too large (max {} MB)", .limit / MB)]
    TooLarge { limit: usize },
    #[error("Workbook could not be read: {0}")]
    Workbook(String),
    #[error(transparent)]
    Blob(#[from] BlobError),
}

impl ErrorCode for UploadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoFile => "E_NO_FILE",
            Self::InvalidName(_) => "E_INVALID_FILENAME",
            Self::TypeNotAllowed => "E_FILE_TYPE",
            Self::TooLarge { .. } => "E_FILE_TOO_LARGE",
            Self::Workbook(_) => "E_WORKBOOK",
            Self::Blob(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Blob(e) if e.retryable())
    }
}

/// One stored file as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub url: String,
    pub path: String,
    pub size: String,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    pub date: String,
}

impl FileEntry {
    fn from_meta(meta: &BlobMeta, category: Option<FileCategory>) -> Self {
        let name = meta.file_name().to_owned();
        Self {
            file_type: extension(&name).unwrap_or_default(),
            url: meta.url.clone(),
            path: meta.url.clone(),
            size: format_file_size(meta.size),
            category: category.map(FileCategory::as_str),
            date: format_date(meta.uploaded_at),
            name,
        }
    }
}

/// Reference data handed to the generation endpoint: text for CSV, a map of
/// sheet name to CSV text for workbooks, a placeholder for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileContent {
    pub content: Value,
    #[serde(rename = "type")]
    pub content_type: String,
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Store an upload.
///
/// # Errors
///
/// Returns `NoFile` for an empty body, `InvalidName` for names that are not
/// a single path segment, `TypeNotAllowed` or `TooLarge` when the kind's
/// limits reject it, and `Blob` on store failure.
pub async fn upload(state: &AppState, kind: UploadKind, name: &str, bytes: Vec<u8>) -> Result<FileEntry, UploadError> {
    if bytes.is_empty() {
        return Err(UploadError::NoFile);
    }
    validate_name(name)?;
    let ext = extension(name).ok_or(UploadError::TypeNotAllowed)?;
    if !kind.allowed_extensions().contains(&ext.as_str()) {
        return Err(UploadError::TypeNotAllowed);
    }
    if bytes.len() > kind.max_bytes() {
        return Err(UploadError::TooLarge { limit: kind.max_bytes() });
    }

    let (key, category) = match kind {
        UploadKind::File => {
            let category = FileCategory::for_extension(&ext);
            (category.key_for(name), Some(category))
        }
        UploadKind::Attachment => (format!("attachments/{name}"), None),
    };
    let meta = state.blobs.put(&key, bytes).await?;
    info!(%key, bytes = meta.size, "upload stored");
    Ok(FileEntry::from_meta(&meta, category))
}

/// Every stored file of `kind`. Reference files are grouped by category.
///
/// # Errors
///
/// Returns `Blob` if the store listing fails.
pub async fn list(state: &AppState, kind: UploadKind) -> Result<Vec<FileEntry>, UploadError> {
    let prefix = kind.prefix();
    let metas = state.blobs.list(prefix).await?;

    let mut entries: Vec<(Option<FileCategory>, FileEntry)> = metas
        .iter()
        .filter_map(|meta| {
            let rest = meta.pathname.strip_prefix(prefix)?;
            match kind {
                UploadKind::Attachment => (!rest.contains('/')).then(|| (None, FileEntry::from_meta(meta, None))),
                UploadKind::File => {
                    let (dir, name) = rest.split_once('/')?;
                    let category = FileCategory::parse(dir)?;
                    (!name.contains('/')).then(|| (Some(category), FileEntry::from_meta(meta, Some(category))))
                }
            }
        })
        .collect();
    entries.sort_by(|(ca, a), (cb, b)| ca.cmp(cb).then_with(|| a.name.cmp(&b.name)));
    Ok(entries.into_iter().map(|(_, entry)| entry).collect())
}

/// Delete a stored file by name. Returns `false` when no such file exists.
///
/// # Errors
///
/// Returns `InvalidName` for names that are not a single path segment and
/// `Blob` on store failure.
pub async fn delete(state: &AppState, kind: UploadKind, name: &str) -> Result<bool, UploadError> {
    validate_name(name)?;
    for key in kind.candidate_keys(name) {
        if state.blobs.delete(&key).await? {
            info!(%key, "upload deleted");
            return Ok(true);
        }
    }
    Ok(false)
}

/// Readable content of a stored file, searching reference files before
/// attachments. CSV is returned as text and `.xlsx`/`.xls` workbooks as one
/// CSV text per sheet; anything else as a placeholder.
///
/// # Errors
///
/// Returns `InvalidName` for names that are not a single path segment,
/// `Workbook` for a spreadsheet that cannot be parsed, and `Blob` on store
/// failure.
pub async fn file_content(state: &AppState, name: &str) -> Result<Option<FileContent>, UploadError> {
    validate_name(name)?;
    let keys = UploadKind::File
        .candidate_keys(name)
        .into_iter()
        .chain(UploadKind::Attachment.candidate_keys(name));

    for key in keys {
        let Some(bytes) = state.blobs.get(&key).await? else {
            continue;
        };
        let ext = extension(name);
        let content = match ext.as_deref() {
            Some("csv") => FileContent {
                content: Value::String(String::from_utf8_lossy(&bytes).into_owned()),
                content_type: "csv".into(),
            },
            Some("xlsx" | "xls") => {
                FileContent { content: Value::Object(workbook_csv(bytes)?), content_type: "xlsx".into() }
            }
            _ => FileContent {
                content: Value::String(format!("[Binary file: {name}]")),
                content_type: ext.map(|e| format!(".{e}")).unwrap_or_default(),
            },
        };
        return Ok(Some(content));
    }
    Ok(None)
}

// =============================================================================
// WORKBOOKS
// =============================================================================

/// Every sheet of a workbook as CSV text, keyed by sheet name.
///
/// # Errors
///
/// Returns `Workbook` when the bytes are not a readable spreadsheet.
pub fn workbook_csv(bytes: Vec<u8>) -> Result<Map<String, Value>, UploadError> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| UploadError::Workbook(e.to_string()))?;
    let mut sheets = Map::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name).map_err(|e| UploadError::Workbook(e.to_string()))?;
        let csv = range
            .rows()
            .map(|row| row.iter().map(csv_cell).collect::<Vec<_>>().join(","))
            .collect::<Vec<_>>()
            .join("\n");
        sheets.insert(name, Value::String(csv));
    }
    Ok(sheets)
}

/// One CSV field. Fields holding a delimiter, quote or line break are
/// quoted with inner quotes doubled.
fn csv_cell(cell: &Data) -> String {
    let text = match cell {
        Data::Bool(true) => "TRUE".to_owned(),
        Data::Bool(false) => "FALSE".to_owned(),
        other => other.to_string(),
    };
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Pick the upload name: query parameter, then header, then a timestamped
/// fallback. Percent-encoded names are decoded; undecodable ones are kept.
#[must_use]
pub fn resolve_filename(query: Option<&str>, header: Option<&str>, now: OffsetDateTime) -> String {
    let raw = query
        .filter(|s| !s.is_empty())
        .or_else(|| header.filter(|s| !s.is_empty()))
        .map_or_else(|| format!("file-{}", now.unix_timestamp_nanos() / 1_000_000), str::to_owned);
    match percent_decode_str(&raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}

/// Lower-cased extension without the dot. Dotfiles have none.
#[must_use]
pub fn extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    (!stem.is_empty() && !ext.is_empty()).then(|| ext.to_ascii_lowercase())
}

/// `512 B`, `1.5 KB`, `2.0 MB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < KB * KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / (KB * KB) as f64)
    }
}

/// `Mar 7, 2025`.
#[must_use]
pub fn format_date(at: OffsetDateTime) -> String {
    at.format(format_description!("[month repr:short] [day padding:none], [year]"))
        .unwrap_or_default()
}

fn validate_name(name: &str) -> Result<(), UploadError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
        || name.starts_with(".tmp-");
    if bad { Err(UploadError::InvalidName(name.to_owned())) } else { Ok(()) }
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
