//! LLM: Anthropic-backed chat for the content generation endpoint.
//!
//! DESIGN
//! ======
//! Configured entirely from environment variables (see [`config::LlmConfig`]).
//! Handlers depend on the [`types::LlmChat`] trait, never on the concrete
//! client, so tests substitute a mock. When no key is configured the server
//! runs without a client and generation reports that AI is not configured.

pub mod anthropic;
pub mod config;
pub mod types;

use config::LlmConfig;
use types::{ChatResponse, LlmChat, LlmError, Message};

// =============================================================================
// CLIENT
// =============================================================================

pub struct LlmClient {
    inner: anthropic::AnthropicClient,
    model: String,
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the HTTP client cannot be constructed.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = anthropic::AnthropicClient::new(config.api_key, config.timeouts)?;
        Ok(Self { inner, model: config.model })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, max_tokens: u32, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        self.inner.chat(&self.model, max_tokens, system, messages).await
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
