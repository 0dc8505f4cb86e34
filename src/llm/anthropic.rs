//! Anthropic Messages API client.
//!
//! One request per call to `/v1/messages`, no streaming and no retries.
//! Everything that inspects a response body is a pure function so the wire
//! format is tested without the network.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::LlmTimeouts;
use super::types::{ChatResponse, ContentBlock, LlmError, Message};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const REQUEST_ID_HEADER: &str = "request-id";

pub struct AnthropicClient {
    http: reqwest::Client,
}

impl AnthropicClient {
    /// Build a client that sends `api_key` and the pinned API version on
    /// every request.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the key is not a valid header value or
    /// the TLS client cannot be constructed.
    pub fn new(api_key: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let mut key = HeaderValue::from_str(&api_key).map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", key);
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }

    /// # Errors
    ///
    /// Returns `ApiRequest` on transport failure, `ApiResponse` with the
    /// provider's error message on a non-success status, and `ApiParse` on
    /// an unreadable body.
    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let request = MessagesRequest { model, max_tokens, system, messages };
        let response = self
            .http
            .post(API_URL)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_owned();
        let text = response.text().await.map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if !status.is_success() {
            return Err(LlmError::ApiResponse { status: status.as_u16(), body: provider_message(&text) });
        }

        let parsed = parse_response(&text)?;
        debug!(
            %request_id,
            model = %parsed.model,
            input_tokens = parsed.input_tokens,
            output_tokens = parsed.output_tokens,
            "llm call complete"
        );
        Ok(parsed)
    }
}

// =============================================================================
// WIRE FORMAT
// =============================================================================

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    model: String,
    #[serde(default)]
    stop_reason: Option<String>,
    usage: Usage,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

/// Text blocks of a success body; thinking and unrecognized blocks are
/// dropped.
fn parse_response(json: &str) -> Result<ChatResponse, LlmError> {
    let body: MessagesResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    Ok(ChatResponse {
        content: body.content.into_iter().filter(|b| matches!(b, ContentBlock::Text { .. })).collect(),
        model: body.model,
        stop_reason: body.stop_reason,
        input_tokens: body.usage.input_tokens,
        output_tokens: body.usage.output_tokens,
    })
}

/// `"<type>: <message>"` from an error body, or the raw body when it is not
/// the provider's error envelope.
fn provider_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => format!("{}: {}", envelope.error.kind, envelope.error.message),
        Err(_) => body.trim().to_owned(),
    }
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
