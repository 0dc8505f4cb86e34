//! Error codes and the JSON error body shared by every route.
//!
//! Service errors implement [`ErrorCode`] so handlers can attach a grepable
//! code and a retry hint to the `{ "error": ... }` body without matching on
//! each variant twice.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Grepable error code and retryable flag for structured error bodies.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// A failed API call: status plus `{ error, code }` body.
///
/// Upload and generation endpoints report `success: false` alongside the
/// error, matching their success bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub code: &'static str,
    pub retryable: bool,
    pub with_success_flag: bool,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), code, retryable: false, with_success_flag: false }
    }

    /// Build from a service error, keeping its display text and code.
    #[must_use]
    pub fn from_error<E: ErrorCode>(status: StatusCode, err: &E) -> Self {
        Self {
            status,
            message: err.to_string(),
            code: err.error_code(),
            retryable: err.retryable(),
            with_success_flag: false,
        }
    }

    #[must_use]
    pub fn with_success_flag(mut self) -> Self {
        self.with_success_flag = true;
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.message, "code": self.code });
        if self.retryable {
            body["retryable"] = json!(true);
        }
        if self.with_success_flag {
            body["success"] = json!(false);
        }
        (self.status, Json(body)).into_response()
    }
}
