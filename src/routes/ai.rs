//! Content generation route.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};
use tracing::error;

use crate::error::ApiError;
use crate::services::generate::{self, GenerateError, GenerateRequest};
use crate::state::AppState;

pub(crate) fn generate_error_to_status(err: &GenerateError) -> StatusCode {
    match err {
        GenerateError::EmptyPrompt => StatusCode::BAD_REQUEST,
        GenerateError::NotConfigured | GenerateError::Llm(_) | GenerateError::EmptyResponse => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// `POST /api/ai/generate`: one suggestion for the field in `context`.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<Value>, ApiError> {
    let suggestion = generate::generate(state.llm.as_deref(), state.llm_max_tokens, request)
        .await
        .map_err(|e| {
            let status = generate_error_to_status(&e);
            if matches!(e, GenerateError::Llm(_) | GenerateError::EmptyResponse) {
                error!(error = %e, "AI generation failed");
            }
            ApiError::from_error(status, &e).with_success_flag()
        })?;
    Ok(Json(json!({ "success": true, "suggestion": suggestion })))
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
