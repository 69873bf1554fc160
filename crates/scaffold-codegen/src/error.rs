//! Error types for writing generated artifacts

use std::path::PathBuf;

/// Artifact write errors
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// Directory creation, temp write or rename failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Target file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Artifact path escapes the project directory
    #[error("artifact path escapes project directory: {0}")]
    UnsafePath(String),
}

impl CodegenError {
    /// Create write error
    #[inline]
    #[must_use]
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
