//! Error types for the translator
//!
//! These never reach pipeline callers; the translator logs them and
//! degrades to an empty instruction list.

/// Completion service errors
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// HTTP client could not be constructed
    #[error("http client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport, status or decoding failure
    #[error("completion request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// Service replied without any text
    #[error("completion service returned no text")]
    EmptyCompletion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_completion_display() {
        assert_eq!(
            TranslateError::EmptyCompletion.to_string(),
            "completion service returned no text"
        );
    }
}
