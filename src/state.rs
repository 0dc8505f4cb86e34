//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the blob store every document and file endpoint reads through, the
//! optional LLM client, the lock that serializes read-modify-write
//! updates of the JSON documents, and the static root the audit scans.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::blob::BlobStore;
use crate::config::{DEFAULT_LLM_MAX_TOKENS, DEFAULT_STATIC_DIR};
use crate::llm::types::LlmChat;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub blobs: Arc<dyn BlobStore>,
    /// Optional LLM client. `None` if no API key is configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    pub llm_max_tokens: u32,
    /// Held across load-merge-save of page notes and status.
    pub document_lock: Arc<Mutex<()>>,
    /// Front-end root the design-system audit scans.
    pub static_dir: PathBuf,
}

impl AppState {
    #[must_use]
    pub fn new(blobs: Arc<dyn BlobStore>, llm: Option<Arc<dyn LlmChat>>) -> Self {
        Self {
            blobs,
            llm,
            llm_max_tokens: DEFAULT_LLM_MAX_TOKENS,
            document_lock: Arc::new(Mutex::new(())),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }

    #[must_use]
    pub fn with_llm_max_tokens(mut self, max_tokens: u32) -> Self {
        self.llm_max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn with_static_dir(mut self, static_dir: PathBuf) -> Self {
        self.static_dir = static_dir;
        self
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
