//! Unified API error handling with fixed status/message mappings.
//!
//! Domain errors are tagged variants translated centrally here; no handler
//! builds its own error response and no internal detail reaches a client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::account::AccountError;
use crate::auth::AuthError;
use crate::employee::EmployeeError;
use crate::uploads::UploadError;

/// API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input fields.
    #[error("{0}")]
    Validation(String),

    /// Resource already exists.
    #[error("{0}")]
    Duplicate(String),

    /// Unknown username or wrong secret; deliberately one message for both
    /// so the response never confirms whether an account exists.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, forged, or expired session token.
    #[error("Invalid or missing token")]
    Unauthorized,

    /// Referenced resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Infrastructure failure. Detail stays server-side.
    #[error("Server error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Duplicate(_) | Self::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub msg: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log errors appropriately; client errors are routine
        match &self {
            ApiError::Internal(source) => {
                error!(error = ?source, "Internal server error");
            }
            other => {
                debug!(status = %status, msg = %other, "Client error");
            }
        }

        let body = ErrorResponse {
            msg: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Duplicate => Self::duplicate("User already exists"),
            AccountError::Storage(e) => Self::Internal(e),
        }
    }
}

impl From<EmployeeError> for ApiError {
    fn from(err: EmployeeError) -> Self {
        match err {
            EmployeeError::DuplicateEmail => Self::duplicate("Email already exists"),
            EmployeeError::NotFound => Self::not_found("Employee not found"),
            EmployeeError::Storage(e) => Self::Internal(e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::TokenExpired => {
                Self::Unauthorized
            }
            AuthError::Internal(msg) => Self::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::UnsupportedFormat | UploadError::InvalidFilename => {
                Self::Validation(err.to_string())
            }
            UploadError::Io(e) => Self::Internal(e),
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
