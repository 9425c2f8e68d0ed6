//! Authorization gate and session token codec.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use super::claims::Claims;
use super::config::{AuthConfig, ConfigValidationError};
use super::cookie::SESSION_COOKIE;
use super::error::AuthError;

/// Extract a named cookie value from a Cookie header.
fn token_from_cookie_header<'a>(cookie_header: &'a str, cookie_name: &str) -> Option<&'a str> {
    cookie_header.split(';').map(str::trim).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        if name.trim() == cookie_name {
            Some(value.trim())
        } else {
            None
        }
    })
}

/// Authentication state shared across handlers.
///
/// Holds the signing keys, built exactly once at startup. The keys are never
/// rotated at runtime.
#[derive(Clone)]
pub struct AuthState {
    config: Arc<AuthConfig>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthState {
    /// Create new auth state from config.
    ///
    /// Resolves `env:VAR_NAME` syntax in jwt_secret at construction time. A
    /// missing or too-short secret is a startup error, never a per-request
    /// condition.
    pub fn new(mut config: AuthConfig) -> Result<Self, ConfigValidationError> {
        config.validate()?;

        let secret = config
            .resolve_jwt_secret()?
            .ok_or(ConfigValidationError::MissingJwtSecret)?;
        config.jwt_secret = Some(secret.clone());

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            config: Arc::new(config),
        })
    }

    /// Whether the server runs in production deployment mode.
    pub fn production_mode(&self) -> bool {
        self.config.production_mode
    }

    /// Get allowed CORS origins from config.
    pub fn allowed_origins(&self) -> &[String] {
        &self.config.allowed_origins
    }

    /// Issue a session token for an account.
    pub fn issue_token(&self, account_id: i64, username: &str) -> Result<String, AuthError> {
        let claims = Claims::new(account_id, username);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Verify a session token.
    ///
    /// Expiry is distinguished from structural/signature failures here for
    /// logging; every variant maps to the same response outward.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    debug!("session token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    debug!("session token rejected: {e}");
                    AuthError::InvalidToken
                }
            })
    }
}

/// Authenticated principal extracted from a verified session token.
///
/// Exists only for the duration of one request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub account_id: i64,
    pub username: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

/// Authorization gate.
///
/// Reads the session cookie, verifies it, and injects [`CurrentUser`] into
/// request extensions. The gate never touches the credential store and never
/// extends or renews the token.
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let cookie_token = req
        .headers()
        .get(axum::http::header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookie_header| token_from_cookie_header(cookie_header, SESSION_COOKIE));

    let Some(token) = cookie_token else {
        return Err(AuthError::MissingToken);
    };

    let claims = auth.verify_token(token)?;
    let account_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| AuthError::InvalidToken)?;

    req.extensions_mut().insert(CurrentUser {
        account_id,
        username: claims.username,
    });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AuthState {
        AuthState::new(AuthConfig {
            jwt_secret: Some("test-secret-key-for-jwt-testing-minimum-32-chars".to_string()),
            ..AuthConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_token_from_cookie_header() {
        assert_eq!(
            token_from_cookie_header("token=abc.def.ghi", "token"),
            Some("abc.def.ghi")
        );
        assert_eq!(
            token_from_cookie_header("other=1; token=xyz; theme=dark", "token"),
            Some("xyz")
        );
        assert_eq!(token_from_cookie_header("other=1; theme=dark", "token"), None);
        assert_eq!(token_from_cookie_header("", "token"), None);
        // Empty value is extracted; verification rejects it downstream.
        assert_eq!(token_from_cookie_header("token=", "token"), Some(""));
    }

    #[test]
    fn test_issue_and_verify_token() {
        let auth = test_state();
        let token = auth.issue_token(7, "alice").unwrap();
        assert!(!token.is_empty());

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_verify_garbage_token() {
        let auth = test_state();
        assert!(matches!(
            auth.verify_token("invalid.token.here"),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(auth.verify_token(""), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_verify_wrong_secret() {
        let auth1 = test_state();
        let auth2 = AuthState::new(AuthConfig {
            jwt_secret: Some("another-secret-key-for-testing-minimum-32ch".to_string()),
            ..AuthConfig::default()
        })
        .unwrap();

        let token = auth1.issue_token(1, "alice").unwrap();
        assert!(matches!(
            auth2.verify_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_expired_token() {
        let auth = test_state();
        // Well past the default validation leeway.
        let claims = Claims::with_ttl(1, "alice", -3600);
        let token = encode(&Header::default(), &claims, &auth.encoding_key).unwrap();

        assert!(matches!(
            auth.verify_token(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_missing_secret_is_construction_error() {
        let result = AuthState::new(AuthConfig::default());
        assert!(matches!(
            result,
            Err(ConfigValidationError::MissingJwtSecret)
        ));
    }
}
