//! Error types for verification

/// Verification failures
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The program could not be started
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// Command line that failed
        command: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The program exited unsuccessfully or was killed by a signal
    #[error("`{command}` failed ({})", exit_label(*exit_code))]
    BuildFailure {
        /// Command line that failed
        command: String,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
        /// Exit code; `None` when terminated by a signal
        exit_code: Option<i32>,
    },
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl VerifyError {
    /// Exit code of a build failure
    #[inline]
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            VerifyError::BuildFailure { exit_code, .. } => *exit_code,
            VerifyError::Spawn { .. } => None,
        }
    }

    /// Last `lines` lines of captured stderr, falling back to stdout
    #[must_use]
    pub fn output_tail(&self, lines: usize) -> String {
        match self {
            VerifyError::BuildFailure { stdout, stderr, .. } => {
                let source = if stderr.trim().is_empty() { stdout } else { stderr };
                tail(source, lines)
            }
            VerifyError::Spawn { source, .. } => source.to_string(),
        }
    }
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.trim_end().lines().collect();
    all[all.len().saturating_sub(lines)..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(stdout: &str, stderr: &str) -> VerifyError {
        VerifyError::BuildFailure {
            command: "./gradlew build".to_string(),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code: Some(1),
        }
    }

    #[test]
    fn display_includes_exit() {
        assert_eq!(failure("", "").to_string(), "`./gradlew build` failed (exit code 1)");
        let signalled = VerifyError::BuildFailure {
            command: "x".to_string(),
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
        };
        assert_eq!(signalled.to_string(), "`x` failed (terminated by signal)");
    }

    #[test]
    fn tail_prefers_stderr() {
        let err = failure("out", "a\nb\nc\n");
        assert_eq!(err.output_tail(2), "b\nc");
        assert_eq!(failure("x\ny", "  ").output_tail(5), "x\ny");
    }
}
