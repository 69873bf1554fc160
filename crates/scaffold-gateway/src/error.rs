//! Error types for the gateway
//!
//! Every variant maps to exactly one HTTP status. Authentication and
//! precondition failures are raised before any side effect.

use crate::auth::AuthError;
use std::path::PathBuf;
use warp::http::StatusCode;

/// Gateway errors
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Missing or invalid request signature
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Body is not a valid trigger request
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Spec path is absolute or leaves the workspace
    #[error("invalid spec path: {0}")]
    InvalidSpecPath(String),

    /// Spec file does not exist
    #[error("spec not found: {}", .0.display())]
    SpecNotFound(PathBuf),

    /// Configuration file unreadable
    #[error("failed to read config {}: {source}", path.display())]
    ConfigIo {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for this schema
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration values are inconsistent
    #[error("invalid config: {0}")]
    Config(String),

    /// Tracing subscriber could not be installed
    #[error("telemetry setup failed: {0}")]
    Telemetry(String),

    /// Translator could not be constructed
    #[error(transparent)]
    Translator(#[from] scaffold_interpreter::TranslateError),
}

impl GatewayError {
    /// Create bad request error
    #[inline]
    #[must_use]
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// HTTP status for this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Auth(_) => StatusCode::UNAUTHORIZED,
            GatewayError::BadRequest(_)
            | GatewayError::InvalidSpecPath(_)
            | GatewayError::SpecNotFound(_) => StatusCode::BAD_REQUEST,
            GatewayError::ConfigIo { .. }
            | GatewayError::ConfigParse(_)
            | GatewayError::Config(_)
            | GatewayError::Telemetry(_)
            | GatewayError::Translator(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
