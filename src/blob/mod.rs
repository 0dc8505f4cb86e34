//! Blob store: keyed byte storage behind the document and file endpoints.
//!
//! DESIGN
//! ======
//! Keys are slash-separated relative paths (`proxa-notes.txt`,
//! `files/documents/q3.pdf`). A read returns the bytes or `None`; a write
//! replaces the whole value under its key. There is no partial update and
//! no versioning. Listing is by key prefix.
//!
//! Two backends implement [`BlobStore`]: [`fs::FsBlobStore`] for deployments
//! and [`memory::MemoryBlobStore`] for tests and throwaway instances.

pub mod fs;
pub mod memory;

use time::OffsetDateTime;

use crate::error::ErrorCode;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("blob I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("blob {key} is not valid {expected}")]
    Decode { key: String, expected: &'static str },
    #[error("invalid blob key: {0:?}")]
    InvalidKey(String),
}

impl ErrorCode for BlobError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_BLOB_IO",
            Self::Decode { .. } => "E_BLOB_DECODE",
            Self::InvalidKey(_) => "E_BLOB_KEY",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Listing entry for a stored blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobMeta {
    /// Full key, e.g. `files/documents/q3.pdf`.
    pub pathname: String,
    /// Public URL the blob can be fetched from.
    pub url: String,
    pub size: u64,
    pub uploaded_at: OffsetDateTime,
}

impl BlobMeta {
    /// Last path segment of the key.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.pathname.rsplit('/').next().unwrap_or(&self.pathname)
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Provider-neutral blob storage. Enables swapping backends in tests.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch a blob. `Ok(None)` when nothing is stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BlobError>;

    /// Store `bytes` under `key`, replacing any previous value.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<BlobMeta, BlobError>;

    /// Every blob whose key starts with `prefix`, sorted by key.
    async fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, BlobError>;

    /// Remove a blob. Returns whether anything was removed.
    async fn delete(&self, key: &str) -> Result<bool, BlobError>;
}

// =============================================================================
// HELPERS
// =============================================================================

/// Reject keys that are empty, absolute, or escape the store.
///
/// # Errors
///
/// Returns `InvalidKey` describing the offending key.
pub fn validate_key(key: &str) -> Result<(), BlobError> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.contains('\0')
        || key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");
    if bad { Err(BlobError::InvalidKey(key.to_owned())) } else { Ok(()) }
}

/// Public URL for `key` under `base` (trailing slash tolerated).
#[must_use]
pub fn public_url(base: &str, key: &str) -> String {
    let base = base.trim_end_matches('/');
    let encoded: Vec<String> = key
        .split('/')
        .map(|seg| percent_encoding::utf8_percent_encode(seg, PATH_SEGMENT).to_string())
        .collect();
    format!("{base}/{}", encoded.join("/"))
}

/// Characters escaped inside one URL path segment.
const PATH_SEGMENT: &percent_encoding::AsciiSet =
    &percent_encoding::CONTROLS.add(b' ').add(b'"').add(b'#').add(b'%').add(b'/').add(b'<').add(b'>').add(b'?').add(b'`').add(b'{').add(b'}');

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
