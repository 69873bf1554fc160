//! Error types for spec handling
//!
//! Mutation never fails; these cover the document boundary:
//! - Loading and saving the spec file
//! - Decoding and validating its contents

use std::path::PathBuf;

/// Spec document errors
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// Spec file does not exist
    #[error("spec not found: {}", .0.display())]
    NotFound(PathBuf),

    /// IO error reading or writing the spec file
    #[error("io error on {}: {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON or does not match the spec shape
    #[error("malformed spec {}: {source}", path.display())]
    Malformed {
        /// Spec file
        path: PathBuf,
        /// Decode error
        #[source]
        source: serde_json::Error,
    },

    /// Document decoded but violates a structural invariant
    #[error("invalid spec: {0}")]
    Invalid(String),

    /// Type token outside String/Boolean/Integer/Long
    #[error("unknown field type: '{0}'")]
    UnknownFieldType(String),
}

impl SpecError {
    /// Create invalid-spec error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if the spec simply does not exist
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
