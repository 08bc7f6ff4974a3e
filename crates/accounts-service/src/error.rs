//! API error types and responses.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use accounts_core::ValidationError;
use accounts_store::{AllocatorError, StoreError};

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request - malformed body or failed validation.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Conflict - the allocated id is already in use.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store could not serve the request.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::Conflict(msg) => msg,
            Self::StoreUnavailable(msg) => {
                tracing::error!(error = %msg, "Store unavailable");
                "Store unavailable".to_string()
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                "An internal error occurred".to_string()
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("Invalid JSON: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(msg) => Self::StoreUnavailable(msg),
            StoreError::Serialization(_)
            | StoreError::NotFound { .. }
            | StoreError::WrongType { .. }
            | StoreError::Record(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<AllocatorError> for ApiError {
    fn from(err: AllocatorError) -> Self {
        match err {
            AllocatorError::Store(err) => err.into(),
            AllocatorError::NotInitialized | AllocatorError::InvalidCounter(_) => {
                Self::StoreUnavailable(err.to_string())
            }
        }
    }
}
