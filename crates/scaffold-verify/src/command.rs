//! External command description and execution

use crate::error::VerifyError;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// Program plus arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCommand {
    /// Program name or path
    pub program: String,
    /// Arguments in order
    pub args: Vec<String>,
}

/// Captured result of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl VerifyCommand {
    /// Create command
    #[must_use]
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Batch scripts run through `cmd /c`
    #[must_use]
    pub fn needs_shell(&self) -> bool {
        let lower = self.program.to_ascii_lowercase();
        lower.ends_with(".bat") || lower.ends_with(".cmd")
    }

    /// Program and arguments as actually spawned
    #[must_use]
    pub fn argv(&self) -> (String, Vec<String>) {
        if self.needs_shell() {
            let mut args = vec!["/c".to_string(), self.program.clone()];
            args.extend(self.args.iter().cloned());
            ("cmd".to_string(), args)
        } else {
            (self.program.clone(), self.args.clone())
        }
    }

    /// Run to completion in `cwd`, capturing output
    ///
    /// # Errors
    /// - `VerifyError::Spawn` if the program cannot be started
    /// - `VerifyError::BuildFailure` on non-zero exit or signal death
    pub async fn run(&self, cwd: &Path) -> Result<CommandOutput, VerifyError> {
        let (program, args) = self.argv();
        tracing::info!(command = %self, cwd = %cwd.display(), "running command");

        let output = tokio::process::Command::new(resolve_program(&program, cwd))
            .args(&args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| VerifyError::Spawn {
                command: self.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            tracing::debug!(command = %self, "command succeeded");
            Ok(CommandOutput { stdout, stderr })
        } else {
            let exit_code = output.status.code();
            tracing::warn!(command = %self, ?exit_code, "command failed");
            Err(VerifyError::BuildFailure {
                command: self.to_string(),
                stdout,
                stderr,
                exit_code,
            })
        }
    }
}

/// Relative paths such as `./gradlew` resolve against `cwd`; bare names use `PATH`
fn resolve_program(program: &str, cwd: &Path) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
        cwd.join(path)
    } else {
        path.to_path_buf()
    }
}

impl Display for VerifyCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_files_are_wrapped() {
        let cmd = VerifyCommand::new("gradlew.BAT", ["build"]);
        assert!(cmd.needs_shell());
        assert_eq!(
            cmd.argv(),
            (
                "cmd".to_string(),
                vec!["/c".to_string(), "gradlew.BAT".to_string(), "build".to_string()]
            )
        );
    }

    #[test]
    fn relative_programs_resolve_against_cwd() {
        let cwd = Path::new("/work/demo");
        assert_eq!(resolve_program("./gradlew", cwd), cwd.join("./gradlew"));
        assert_eq!(resolve_program("gradle", cwd), PathBuf::from("gradle"));
    }

    #[test]
    fn plain_programs_are_not_wrapped() {
        let cmd = VerifyCommand::new("./gradlew", ["build", "-x", "test"]);
        assert!(!cmd.needs_shell());
        assert_eq!(cmd.argv().0, "./gradlew");
        assert_eq!(cmd.to_string(), "./gradlew build -x test");
    }
}
