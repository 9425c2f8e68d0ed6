//! Authentication errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// Single outward-facing message for every authorization failure.
///
/// Missing, malformed, forged, and expired tokens must be indistinguishable
/// to the client; the variants below exist for server-side logging only.
pub const UNAUTHORIZED_MSG: &str = "Invalid or missing token";

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No session cookie on the request.
    #[error("missing session token")]
    MissingToken,

    /// Malformed token or signature mismatch.
    #[error("invalid session token")]
    InvalidToken,

    /// Structurally valid token past its expiry.
    #[error("session token expired")]
    TokenExpired,

    /// Internal error.
    #[error("internal auth error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct AuthErrorBody {
    msg: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::TokenExpired => {
                debug!(cause = %self, "Rejected unauthenticated request");
                (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MSG)
            }
            AuthError::Internal(detail) => {
                error!(detail = %detail, "Internal auth error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        };

        let body = Json(AuthErrorBody {
            msg: msg.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::MissingToken.to_string(), "missing session token");
        assert_eq!(
            AuthError::TokenExpired.to_string(),
            "session token expired"
        );
    }

    #[tokio::test]
    async fn test_token_failures_share_one_response() {
        let mut bodies = Vec::new();
        for err in [
            AuthError::MissingToken,
            AuthError::InvalidToken,
            AuthError::TokenExpired,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
            bodies.push(body);
        }
        assert_eq!(bodies[0], bodies[1]);
        assert_eq!(bodies[1], bodies[2]);
    }
}
