//! Design-system audit routes.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};
use tracing::error;

use crate::error::ApiError;
use crate::services::audit::{self, Audit, AuditError};
use crate::state::AppState;

fn api_error(err: &AuditError) -> ApiError {
    error!(error = %err, "audit failed");
    ApiError::from_error(StatusCode::INTERNAL_SERVER_ERROR, err)
}

/// `GET /api/audit`: fresh scan of the static root.
pub async fn get_audit(State(state): State<AppState>) -> Result<Json<Audit>, ApiError> {
    let audit = audit::run(state.static_dir.clone()).await.map_err(|e| api_error(&e))?;
    Ok(Json(audit))
}

/// `POST /api/audit/run`: scan and rewrite `AUDIT-REPORT.md`.
pub async fn run_audit(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let audit = audit::run_and_report(state.static_dir.clone()).await.map_err(|e| api_error(&e))?;
    Ok(Json(json!({ "success": true, "audit": audit })))
}

#[cfg(test)]
#[path = "audit_test.rs"]
mod tests;
