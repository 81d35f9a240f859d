//! # API Error Types
//!
//! The error shape clients see: a machine-readable code plus a
//! human-readable message, serialized as JSON with a matching HTTP status.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError / DbError (lower layers)                                    │
//! │       │                                                                 │
//! │       ▼  From impls                                                     │
//! │  ApiError { code, message }                                            │
//! │       │                                                                 │
//! │       ▼  IntoResponse                                                   │
//! │  HTTP status + {"code": "NOT_FOUND", "message": "..."}                 │
//! │                                                                         │
//! │  Internal details (SQL, file paths) are logged, never sent to          │
//! │  clients.                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use dhaba_core::CoreError;
use dhaba_db::DbError;

// =============================================================================
// Error Code
// =============================================================================

/// Machine-readable error codes, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    Conflict,
    DatabaseError,
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// =============================================================================
// API Error
// =============================================================================

/// The error payload returned to clients.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            code: ErrorCode::NotFound,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError {
            code: ErrorCode::Conflict,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

// =============================================================================
// Conversions From Lower Layers
// =============================================================================

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::not_found(err.to_string()),

            DbError::UniqueViolation { .. } => ApiError::conflict(err.to_string()),

            // Capacity problem, not a client mistake
            DbError::OrderNumberExhausted { .. } => {
                error!(error = %err, "Order number space exhausted");
                ApiError {
                    code: ErrorCode::Internal,
                    message: err.to_string(),
                }
            }

            // Storage failures: log the detail, return a generic message
            other => {
                error!(error = %other, "Database error");
                ApiError {
                    code: ErrorCode::DatabaseError,
                    message: "A database error occurred".to_string(),
                }
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MenuItemNotFound(_) | CoreError::TransactionNotFound(_) => {
                ApiError::not_found(err.to_string())
            }

            CoreError::EmptyOrder
            | CoreError::OrderTooLarge { .. }
            | CoreError::QuantityTooLarge { .. }
            | CoreError::Validation(_) => ApiError::validation(err.to_string()),

            CoreError::Render(msg) => {
                error!(error = %msg, "Report rendering failed");
                ApiError {
                    code: ErrorCode::Internal,
                    message: "Report rendering failed".to_string(),
                }
            }
        }
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================
