//! Loading and saving the spec document
//!
//! The document is read in full at the start of a run and rewritten in full
//! only when the caller decides it changed. Writes go to a sibling temp file
//! first and are renamed into place, so a reader never sees a half-written
//! document.

use crate::error::SpecError;
use crate::types::ProjectSpec;
use std::path::{Path, PathBuf};

/// File-backed spec storage
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecStore;

impl SpecStore {
    /// Create new store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Check that a spec file exists
    pub async fn exists(&self, path: impl AsRef<Path>) -> bool {
        tokio::fs::metadata(path.as_ref())
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// Read and validate a spec document
    ///
    /// # Errors
    /// - `SpecError::NotFound` if the file does not exist
    /// - `SpecError::Malformed` if it is not a valid spec document
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<ProjectSpec, SpecError> {
        let path = path.as_ref();
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SpecError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(SpecError::io_error(path, e)),
        };

        let spec = serde_json::from_str(&text).map_err(|source| SpecError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "spec loaded");
        Ok(spec)
    }

    /// Write a spec document in full
    ///
    /// # Errors
    /// `SpecError::Io` if the temp file cannot be written or renamed.
    pub async fn save(&self, path: impl AsRef<Path>, spec: &ProjectSpec) -> Result<(), SpecError> {
        let path = path.as_ref();
        let mut text = serde_json::to_string_pretty(spec).map_err(|source| SpecError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        text.push('\n');

        let tmp = temp_path(path);
        tokio::fs::write(&tmp, text)
            .await
            .map_err(|e| SpecError::io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| SpecError::io_error(path, e))?;

        tracing::info!(path = %path.display(), "spec saved");
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
