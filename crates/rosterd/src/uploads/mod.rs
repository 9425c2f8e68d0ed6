//! Employee image storage.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bytes::Bytes;
use chrono::Utc;
use image::ImageFormat;
use thiserror::Error;
use tracing::{instrument, warn};

/// Content types accepted for employee images.
const ALLOWED_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Upload errors.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Payload is not a jpeg or png, regardless of what the client declared.
    #[error("Only jpg and png files allowed")]
    UnsupportedFormat,

    /// Filename reduced to nothing after sanitization.
    #[error("Invalid filename")]
    InvalidFilename,

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

/// Local store for uploaded employee images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory images are stored in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the declared content type is an accepted image type.
    pub fn allowed_content_type(content_type: &str) -> bool {
        ALLOWED_CONTENT_TYPES.contains(&content_type)
    }

    /// Store an uploaded image and return the generated filename.
    ///
    /// The client-supplied name is sanitized and prefixed with a timestamp
    /// plus a random suffix so concurrent uploads of the same name never
    /// collide. Bytes are sniffed so a mislabelled payload is rejected even
    /// when its declared content type checks out.
    #[instrument(skip(self, data), fields(original = %original_name, bytes = data.len()))]
    pub async fn save(&self, original_name: &str, data: Bytes) -> Result<String, UploadError> {
        match image::guess_format(&data) {
            Ok(ImageFormat::Jpeg) | Ok(ImageFormat::Png) => {}
            _ => {
                warn!("rejected upload whose payload is not jpeg or png");
                return Err(UploadError::UnsupportedFormat);
            }
        }

        let sanitized = sanitize_filename(original_name).ok_or(UploadError::InvalidFilename)?;
        let stored_name = format!(
            "{}-{}-{}",
            Utc::now().timestamp_millis(),
            nanoid::nanoid!(6),
            sanitized
        );

        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("creating uploads directory: {}", self.root.display()))?;

        let dest = self.root.join(&stored_name);
        tokio::fs::write(&dest, &data)
            .await
            .with_context(|| format!("writing uploaded image: {}", dest.display()))?;

        Ok(stored_name)
    }
}

/// Strip path components from a client-supplied filename and replace
/// whitespace, keeping only a conservative character set.
fn sanitize_filename(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next()?;

    let cleaned: String = base
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return None;
    }

    Some(cleaned)
}
