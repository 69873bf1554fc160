//! Verification runners
//!
//! A runner executes the configured build command inside the generated
//! project. Only the exit status decides pass or fail; the captured output
//! is kept for reporting.

use crate::command::VerifyCommand;
use crate::config::VerifyConfig;
use crate::error::VerifyError;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of a passing verification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Command line that ran; empty when skipped
    pub command: String,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Whether the bootstrap step ran first
    pub bootstrapped: bool,
    /// Wall time of the build command
    pub elapsed: Duration,
    /// Whether verification was skipped
    pub skipped: bool,
}

impl VerifyReport {
    /// Report for a skipped verification
    #[must_use]
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

/// Checks a generated project tree
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Verify the project at `project_dir`
    ///
    /// # Errors
    /// `VerifyError` when the check cannot run or does not pass.
    async fn verify(&self, project_dir: &Path) -> Result<VerifyReport, VerifyError>;
}

/// Verifier that always passes
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipVerifier;

#[async_trait]
impl Verifier for SkipVerifier {
    async fn verify(&self, project_dir: &Path) -> Result<VerifyReport, VerifyError> {
        tracing::debug!(project_dir = %project_dir.display(), "verification skipped");
        Ok(VerifyReport::skipped())
    }
}

/// Step that prepares the project before the first build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap {
    /// Project-relative file whose presence means bootstrap is done
    pub marker: String,
    /// Command to run when the marker is missing
    pub command: VerifyCommand,
}

/// Runs the build command as a child process
#[derive(Debug, Clone)]
pub struct VerificationRunner {
    command: VerifyCommand,
    bootstrap: Option<Bootstrap>,
}

impl VerificationRunner {
    /// Create runner for a command
    #[inline]
    #[must_use]
    pub fn new(command: VerifyCommand) -> Self {
        Self {
            command,
            bootstrap: None,
        }
    }

    /// Add a bootstrap step
    #[inline]
    #[must_use]
    pub fn with_bootstrap(mut self, bootstrap: Bootstrap) -> Self {
        self.bootstrap = Some(bootstrap);
        self
    }

    /// Build runner from config; bootstrap needs both marker and program
    #[must_use]
    pub fn from_config(config: &VerifyConfig) -> Self {
        let runner = Self::new(VerifyCommand::new(
            config.program.clone(),
            config.args.iter().cloned(),
        ));
        match (&config.bootstrap_marker, &config.bootstrap_program) {
            (Some(marker), Some(program)) => runner.with_bootstrap(Bootstrap {
                marker: marker.clone(),
                command: VerifyCommand::new(program.clone(), config.bootstrap_args.iter().cloned()),
            }),
            _ => runner,
        }
    }

    /// Get build command
    #[inline]
    #[must_use]
    pub fn command(&self) -> &VerifyCommand {
        &self.command
    }

    async fn ensure_bootstrapped(&self, project_dir: &Path) -> Result<bool, VerifyError> {
        let Some(bootstrap) = &self.bootstrap else {
            return Ok(false);
        };
        if tokio::fs::try_exists(project_dir.join(&bootstrap.marker))
            .await
            .unwrap_or(false)
        {
            return Ok(false);
        }
        tracing::info!(marker = %bootstrap.marker, "marker missing, bootstrapping");
        bootstrap.command.run(project_dir).await?;
        Ok(true)
    }
}

#[async_trait]
impl Verifier for VerificationRunner {
    async fn verify(&self, project_dir: &Path) -> Result<VerifyReport, VerifyError> {
        let bootstrapped = self.ensure_bootstrapped(project_dir).await?;

        let started = Instant::now();
        let output = self.command.run(project_dir).await?;
        let elapsed = started.elapsed();

        tracing::info!(
            command = %self.command,
            elapsed_ms = elapsed.as_millis() as u64,
            "verification passed"
        );
        Ok(VerifyReport {
            command: self.command.to_string(),
            stdout: output.stdout,
            stderr: output.stderr,
            bootstrapped,
            elapsed,
            skipped: false,
        })
    }
}

/// Verifier for a config: a runner when enabled, otherwise `SkipVerifier`
#[must_use]
pub fn verifier_for(config: &VerifyConfig) -> Arc<dyn Verifier> {
    if config.enabled {
        Arc::new(VerificationRunner::from_config(config))
    } else {
        Arc::new(SkipVerifier)
    }
}
