//! Session token claims.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Fixed session lifetime: two days.
pub const SESSION_TTL_SECS: i64 = 2 * 24 * 60 * 60;

/// JWT payload for a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - account row id.
    pub sub: String,
    /// Username at issuance time.
    pub username: String,
    /// Issued At - token issuance time (Unix timestamp).
    pub iat: i64,
    /// Expiration - token expiry time (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Claims for a new session with the standard TTL.
    pub fn new(account_id: i64, username: impl Into<String>) -> Self {
        Self::with_ttl(account_id, username, SESSION_TTL_SECS)
    }

    /// Claims with an explicit TTL in seconds.
    pub fn with_ttl(account_id: i64, username: impl Into<String>, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: account_id.to_string(),
            username: username.into(),
            iat: now,
            exp: now + ttl_secs,
        }
    }

    /// Whether the expiry has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}
