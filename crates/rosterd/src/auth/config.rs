//! Authentication configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret, or `env:VAR_NAME` indirection.
    /// REQUIRED - the server refuses to start without it.
    pub jwt_secret: Option<String>,

    /// Production deployment mode. Enables the `Secure` cookie attribute and
    /// strict CORS behavior.
    pub production_mode: bool,

    /// Allowed CORS origins. If empty in production mode, cross-origin
    /// requests are denied.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            // No default secret - must be explicitly configured
            jwt_secret: None,
            production_mode: false,
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl AuthConfig {
    /// Resolve the signing secret, expanding `env:VAR_NAME` syntax.
    /// Returns the resolved secret or None if not configured.
    pub fn resolve_jwt_secret(&self) -> Result<Option<String>, ConfigValidationError> {
        match &self.jwt_secret {
            None => Ok(None),
            Some(value) => {
                if let Some(var_name) = value.strip_prefix("env:") {
                    match std::env::var(var_name) {
                        Ok(secret) if !secret.is_empty() => Ok(Some(secret)),
                        Ok(_) => Err(ConfigValidationError::EnvVarEmpty(var_name.to_string())),
                        Err(_) => Err(ConfigValidationError::EnvVarNotFound(var_name.to_string())),
                    }
                } else {
                    Ok(Some(value.clone()))
                }
            }
        }
    }

    /// Validate the configuration.
    ///
    /// The signing secret is a startup requirement in every mode; sessions
    /// cannot be issued or verified without it.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let secret = self.resolve_jwt_secret()?;

        let Some(secret) = secret else {
            return Err(ConfigValidationError::MissingJwtSecret);
        };

        if secret.len() < 32 {
            return Err(ConfigValidationError::JwtSecretTooShort);
        }

        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("auth.jwt_secret is required: the server cannot sign or verify sessions without it")]
    MissingJwtSecret,

    #[error("auth.jwt_secret must be at least 32 bytes")]
    JwtSecretTooShort,

    #[error("environment variable {0} referenced by auth.jwt_secret is not set")]
    EnvVarNotFound(String),

    #[error("environment variable {0} referenced by auth.jwt_secret is empty")]
    EnvVarEmpty(String),
}
