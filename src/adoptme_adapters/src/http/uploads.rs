use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use axum::extract::multipart::MultipartError;
use chrono::Utc;
use regex::Regex;
use thiserror::Error;

use crate::config::IMAGE_ROUTE;

static UNSAFE_FILE_NAME_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9._-]+").expect("static regex should not panic")
});

const FALLBACK_FILE_NAME: &str = "image";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Where uploaded pet images are written. Files are served back under [`IMAGE_ROUTE`].
#[derive(Debug, Clone)]
pub struct ImageStore {
    directory: PathBuf,
}

impl ImageStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Writes the file as `<unix-millis>-<sanitised name>` and returns its public path.
    #[tracing::instrument(name = "Saving uploaded image", skip(self, bytes), fields(size = bytes.len()))]
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, UploadError> {
        tokio::fs::create_dir_all(&self.directory).await?;

        let file_name = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(original_name)
        );
        tokio::fs::write(self.directory.join(&file_name), bytes).await?;

        Ok(format!("{IMAGE_ROUTE}/{file_name}"))
    }

    /// Deletes a file previously returned by [`ImageStore::save`].
    #[tracing::instrument(name = "Removing uploaded image", skip(self))]
    pub async fn remove(&self, public_path: &str) -> Result<(), UploadError> {
        let file_name = public_path
            .strip_prefix(IMAGE_ROUTE)
            .map(|name| name.trim_start_matches('/'))
            .unwrap_or(public_path);
        tokio::fs::remove_file(self.directory.join(sanitize_file_name(file_name))).await?;
        Ok(())
    }
}

/// Keeps the last path component and replaces anything outside `[A-Za-z0-9._-]`.
pub fn sanitize_file_name(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned = UNSAFE_FILE_NAME_CHARS.replace_all(base, "_");
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        FALLBACK_FILE_NAME.to_owned()
    } else {
        cleaned.to_owned()
    }
}
