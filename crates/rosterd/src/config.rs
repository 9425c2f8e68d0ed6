//! Application configuration.
//!
//! Loaded once at startup from an optional TOML file layered under
//! `ROSTERD__`-prefixed environment overrides; never reloaded.

use std::path::PathBuf;

use serde::Deserialize;

use crate::auth::AuthConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file path. Defaults to `<data dir>/rosterd/roster.db`.
    pub path: Option<PathBuf>,
}

/// Upload storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    /// Directory for stored images. Defaults to `<data dir>/rosterd/uploads`.
    pub dir: Option<PathBuf>,
    /// Request body cap in megabytes, covering image uploads.
    pub max_upload_size_mb: usize,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            max_upload_size_mb: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.uploads.max_upload_size_mb, 10);
        assert!(config.auth.jwt_secret.is_none());
        assert!(config.database.path.is_none());
    }

    #[test]
    fn test_partial_toml_deserializes() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                port = 8080

                [auth]
                jwt_secret = "configured-secret-of-at-least-32-bytes!"
                production_mode = true
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.auth.production_mode);
        assert!(config.auth.jwt_secret.is_some());
    }
}
