//! Password hashing.

use anyhow::{Context, Result};
use tracing::warn;

/// Hash a secret using bcrypt.
pub fn hash_password(secret: &str) -> Result<String> {
    // Use a lower cost factor for development speed
    let cost = if cfg!(debug_assertions) { 4 } else { 10 };
    bcrypt::hash(secret, cost).context("Failed to hash password")
}

/// Verify a secret against a stored bcrypt hash.
///
/// Fails closed: a malformed stored hash verifies as a mismatch rather than
/// surfacing an error the caller could distinguish.
pub fn verify_password(secret: &str, hash: &str) -> bool {
    match bcrypt::verify(secret, hash) {
        Ok(matches) => matches,
        Err(err) => {
            warn!("password verification against stored hash failed: {err}");
            false
        }
    }
}
