//! Generation service: turns an editor prompt plus field context into a
//! single LLM call and returns the suggested text.
//!
//! DESIGN
//! ======
//! The system prompt is assembled from the field the user is editing (type,
//! name, tone), optional formatting instructions, optional reference data and
//! the field's current value. Earlier turns of the editor conversation are
//! replayed before the new prompt. The response's first text block is the
//! suggestion; nothing else from the response is exposed.

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::llm::types::{LlmChat, LlmError, Message, Role};

const MINIMAL_SYSTEM_PROMPT: &str = "You are an AI assistant. Respond concisely and helpfully.";
const RESPONSE_RULE: &str = "Respond with ONLY the data/content requested, formatted appropriately for the field type. \
                             Do not include explanations unless asked.";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("AI not configured. ANTHROPIC_API_KEY not set.")]
    NotConfigured,
    #[error("Prompt is required")]
    EmptyPrompt,
    #[error("{0}")]
    Llm(#[from] LlmError),
    #[error("AI returned no text")]
    EmptyResponse,
}

impl ErrorCode for GenerateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "E_AI_NOT_CONFIGURED",
            Self::EmptyPrompt => "E_EMPTY_PROMPT",
            Self::Llm(e) => e.error_code(),
            Self::EmptyResponse => "E_EMPTY_RESPONSE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Llm(e) if e.retryable())
    }
}

/// Body of a generation request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub context: Option<PromptContext>,
    #[serde(default)]
    pub messages: Vec<ClientMessage>,
}

/// A prior turn as sent by the editor.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

/// What the user is editing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptContext {
    pub field_type: Option<String>,
    pub field_name: Option<String>,
    pub tone: Option<String>,
    pub preset_instructions: Option<String>,
    pub custom_instructions: Option<String>,
    pub attachment: Option<AttachmentData>,
    pub current_table_data: Option<TableData>,
    pub current_content: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttachmentData {
    pub name: String,
    /// CSV text, or a sheet-name → CSV map for workbooks.
    pub content: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TableData {
    pub labels: Vec<Value>,
    pub series: Vec<TableSeries>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TableSeries {
    pub name: String,
    pub data: Vec<Value>,
}

// =============================================================================
// GENERATION
// =============================================================================

/// Run one generation request.
///
/// # Errors
///
/// Returns `NotConfigured` without a client, `EmptyPrompt` for a missing
/// prompt, `Llm` when the provider call fails, and `EmptyResponse` when the
/// reply carries no text.
pub async fn generate(
    llm: Option<&dyn LlmChat>,
    max_tokens: u32,
    request: GenerateRequest,
) -> Result<String, GenerateError> {
    let llm = llm.ok_or(GenerateError::NotConfigured)?;
    let prompt = request.prompt.filter(|p| !p.is_empty()).ok_or(GenerateError::EmptyPrompt)?;

    let system = build_system_prompt(request.context.as_ref());
    let mut messages: Vec<Message> = request
        .messages
        .into_iter()
        .map(|m| Message { role: Role::from_client(&m.role), content: m.content })
        .collect();
    messages.push(Message::user(prompt));

    let response = llm.chat(max_tokens, &system, &messages).await.inspect_err(|e| {
        warn!(error = %e, "generation call failed");
    })?;
    info!(
        turns = messages.len(),
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "generation complete"
    );
    response.first_text().map(str::to_owned).ok_or(GenerateError::EmptyResponse)
}

/// Assemble the system prompt for a field context.
#[must_use]
pub fn build_system_prompt(context: Option<&PromptContext>) -> String {
    let Some(ctx) = context else {
        return MINIMAL_SYSTEM_PROMPT.to_owned();
    };

    let mut parts: Vec<String> = vec![
        "You are an AI assistant helping with data management in a business application.".into(),
        String::new(),
        format!("Field type: {}", or_default(ctx.field_type.as_deref(), "text")),
        format!("Field name: {}", or_default(ctx.field_name.as_deref(), "Content")),
        format!("Tone: {}", or_default(ctx.tone.as_deref(), "professional")),
    ];

    if let Some(preset) = non_empty(ctx.preset_instructions.as_deref()) {
        parts.extend([String::new(), "IMPORTANT formatting requirements:".into(), preset.to_owned()]);
    }
    if let Some(custom) = non_empty(ctx.custom_instructions.as_deref()) {
        parts.extend([String::new(), "Additional instructions:".into(), custom.to_owned()]);
    }

    parts.push(String::new());
    if let Some(attachment) = &ctx.attachment {
        let content = attachment_text(&attachment.content);
        parts.push(format!("Available reference data:\n--- {} ---\n{content}", attachment.name));
    }

    if let Some(table) = &ctx.current_table_data {
        parts.push(String::new());
        parts.push("Current data table:".into());
        let labels: Vec<String> = table.labels.iter().map(display_value).collect();
        parts.push(format!("Columns: {}", labels.join(", ")));
        for series in &table.series {
            let data: Vec<String> = series.data.iter().map(locale_value).collect();
            parts.push(format!("{}: {}", series.name, data.join(", ")));
        }
    }

    if let Some(current) = ctx.current_content.as_ref().filter(|v| is_present(v)) {
        let pretty = serde_json::to_string_pretty(current).unwrap_or_default();
        parts.push(String::new());
        parts.push(format!("Current content:\n{pretty}"));
    }

    parts.push(String::new());
    parts.push(RESPONSE_RULE.into());
    parts.join("\n")
}

// =============================================================================
// HELPERS
// =============================================================================

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    non_empty(value).unwrap_or(default)
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A JSON value as it reads inside a joined list.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn attachment_text(content: &Value) -> String {
    match content {
        Value::Object(_) | Value::Array(_) => {
            serde_json::to_string_pretty(content).unwrap_or_else(|_| content.to_string())
        }
        other => display_value(other),
    }
}

fn locale_value(value: &Value) -> String {
    match value.as_f64() {
        Some(n) => format_locale_number(n),
        None => display_value(value),
    }
}

/// `1234567.891` → `1,234,567.891`: comma grouping, at most three decimals.
#[must_use]
pub fn format_locale_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }
    if n.is_infinite() {
        return if n > 0.0 { "∞".into() } else { "-∞".into() };
    }

    let fixed = format!("{:.3}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac.is_empty();
    let sign = if n < 0.0 && !is_zero { "-" } else { "" };
    if frac.is_empty() { format!("{sign}{grouped}") } else { format!("{sign}{grouped}.{frac}") }
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
