//! Unified error handling
//!
//! Application-level error type and response envelope:
//! - [`AppError`] - HTTP-facing error enum
//! - [`AppResponse`] - API response structure
//!
//! # Error code scheme
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E0xxx  | Business | E0003 not found |
//! | E9xxx  | System   | E9002 storage error |
//!
//! # Usage
//!
//! ```ignore
//! // Return an error
//! Err(AppError::NotFound("order abc".to_string()))
//!
//! // Return a successful response
//! Ok(ok(data))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::orders::OrderError;

/// Unified API response envelope
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code (E0000 means success)
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// HTTP-facing application error
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Business errors (4xx) ==========
    #[error("Resource not found: {0}")]
    /// Missing resource (404)
    NotFound(String),

    #[error("Conflict: {0}")]
    /// State machine violation or concurrent update (409)
    Conflict(String),

    #[error("Validation failed: {0}")]
    /// Pricing/options validation failure (400)
    Validation(String),

    #[error("Invalid request: {0}")]
    /// Malformed request (400)
    Invalid(String),

    // ========== System errors (5xx) ==========
    #[error("Storage error: {0}")]
    /// Storage failure (500)
    Storage(String),

    #[error("Internal server error: {0}")]
    /// Internal error (500)
    Internal(String),
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.as_str()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.as_str()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.as_str()),
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg.as_str()),

            AppError::Storage(msg) => {
                error!(target: "storage", error = %msg, "Storage error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9002", "Storage error")
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error",
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message: message.to_string(),
            data: None,
        });

        (status, body).into_response()
    }
}

impl From<OrderError> for AppError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(msg) => AppError::NotFound(msg),
            OrderError::InvalidTransition(err) => AppError::Conflict(err.to_string()),
            OrderError::Conflict { .. } => AppError::Conflict(e.to_string()),
            OrderError::InvalidState { .. } => AppError::Conflict(e.to_string()),
            OrderError::InvalidOrder(err) => AppError::Validation(err.to_string()),
            OrderError::Storage(err) => AppError::Storage(err.to_string()),
        }
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{OrderStatus, TransitionError};

    #[test]
    fn test_order_error_status_mapping() {
        let not_found = AppError::from(OrderError::NotFound("order x".to_string()));
        assert!(matches!(not_found, AppError::NotFound(_)));

        let transition = AppError::from(OrderError::InvalidTransition(TransitionError {
            from: OrderStatus::Pending,
            to: OrderStatus::Ready,
        }));
        assert!(matches!(transition, AppError::Conflict(_)));

        let conflict = AppError::from(OrderError::Conflict {
            expected: OrderStatus::Pending,
            actual: OrderStatus::Confirmed,
        });
        assert!(matches!(conflict, AppError::Conflict(_)));
    }
}
