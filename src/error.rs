//! Application error type and its HTTP representation.
//!
//! Every user-facing failure is rendered as:
//!
//! ```json
//! { "status": "error", "code": "forbidden", "message": "..." }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    code: &'static str,
    message: String,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    Forbidden { message: String, details: Value },
    NotFound { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status and machine-readable code for this error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Forbidden { .. } => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Validation { message, .. }
            | AppError::Unauthorized { message, .. }
            | AppError::Forbidden { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Internal { message, .. } => message,
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::Validation { details, .. }
            | AppError::Unauthorized { details, .. }
            | AppError::Forbidden { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();

        if status.is_server_error() {
            tracing::error!(code, message = %self, details = %self.details(), "Request failed");
        } else {
            tracing::debug!(code, message = %self, "Request rejected");
        }

        let body = ErrorBody {
            status: "error",
            code,
            message: self.message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Invalid request body", json!({ "fields": e.to_string() }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unauthorized("x", json!({})).status().0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::forbidden("x", json!({})).status().0,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal("x", json!({})).status().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::forbidden("Not your link", json!({ "code": "abc" }));
        assert_eq!(err.to_string(), "Not your link");
        assert_eq!(err.details()["code"], "abc");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::not_found("Unknown link", json!({})).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
