//! One unit of work: interpret, mutate, generate, write, verify
//!
//! Steps run strictly in sequence while the spec lock is held; the project
//! lock is added around write and verify. A failure after writing leaves
//! the written files and the saved spec in place.

use crate::locks::PathLocks;
use crate::notifier::{Delivery, Notifier};
use scaffold_codegen::{ArtifactWriter, CodegenError, Generator};
use scaffold_interpreter::Interpreter;
use scaffold_spec::{apply_all, SpecError, SpecStore};
use scaffold_verify::{Verifier, VerifyError};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Lines of build output carried into a failure message
const OUTPUT_TAIL_LINES: usize = 20;

/// Input of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Correlation id, echoed in logs and replies
    pub run_id: Uuid,
    /// Resolved spec file
    pub spec_path: PathBuf,
    /// Caller text
    pub instruction: String,
    /// Where to report the outcome
    pub callback_url: Option<String>,
}

impl RunRequest {
    /// Create request with a fresh run id
    #[must_use]
    pub fn new(spec_path: impl Into<PathBuf>, instruction: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            spec_path: spec_path.into(),
            instruction: instruction.into(),
            callback_url: None,
        }
    }

    /// Set callback URL
    #[inline]
    #[must_use]
    pub fn with_callback(mut self, url: Option<String>) -> Self {
        self.callback_url = url;
        self
    }
}

/// Result of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Outcome {
    /// Project regenerated and verified
    #[serde(rename = "ok", rename_all = "camelCase")]
    Success {
        /// Project name from the spec
        project_name: String,
        /// Generated project directory
        project_dir: PathBuf,
        /// Whether the spec file was rewritten
        changed: bool,
        /// Instructions that changed the spec
        applied: usize,
        /// Digest of the generated artifact set
        digest: String,
    },
    /// Run stopped with an error
    #[serde(rename = "error")]
    Failure {
        /// Human-readable reason
        message: String,
    },
}

impl Outcome {
    /// Create failure outcome
    #[inline]
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Whether the run succeeded
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Notification text
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Outcome::Success {
                project_name,
                project_dir,
                changed,
                applied,
                ..
            } => {
                let spec_note = if *changed {
                    format!("{applied} change(s) applied")
                } else {
                    "spec unchanged".to_string()
                };
                format!(
                    "{project_name}: build passed ({spec_note}), generated at {}",
                    project_dir.display()
                )
            }
            Outcome::Failure { message } => format!("run failed: {message}"),
        }
    }
}

/// Pipeline step failures
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Spec load, validation or save failed
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Artifacts could not be written
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    /// Build command failed
    #[error(transparent)]
    Verify(#[from] VerifyError),
}

impl PipelineError {
    fn into_outcome(self) -> Outcome {
        match self {
            PipelineError::Verify(e @ VerifyError::BuildFailure { .. }) => {
                let tail = e.output_tail(OUTPUT_TAIL_LINES);
                if tail.is_empty() {
                    Outcome::failure(format!("verification {e}"))
                } else {
                    Outcome::failure(format!("verification {e}\n{tail}"))
                }
            }
            other => Outcome::failure(other.to_string()),
        }
    }
}

/// Runs requests end to end
#[derive(Clone)]
pub struct Pipeline {
    store: SpecStore,
    interpreter: Interpreter,
    writer: ArtifactWriter,
    verifier: Arc<dyn Verifier>,
    notifier: Arc<dyn Notifier>,
    locks: PathLocks,
    output_root: PathBuf,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("output_root", &self.output_root)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Create pipeline
    #[must_use]
    pub fn new(
        interpreter: Interpreter,
        verifier: Arc<dyn Verifier>,
        notifier: Arc<dyn Notifier>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store: SpecStore::new(),
            interpreter,
            writer: ArtifactWriter::new(),
            verifier,
            notifier,
            locks: PathLocks::new(),
            output_root: output_root.into(),
        }
    }

    /// Share a lock table with other pipelines
    #[inline]
    #[must_use]
    pub fn with_locks(mut self, locks: PathLocks) -> Self {
        self.locks = locks;
        self
    }

    /// Get output root
    #[inline]
    #[must_use]
    pub fn output_root(&self) -> &std::path::Path {
        &self.output_root
    }

    /// Get lock table
    #[inline]
    #[must_use]
    pub fn locks(&self) -> &PathLocks {
        &self.locks
    }

    /// Run without notifying
    pub async fn run(&self, request: &RunRequest) -> Outcome {
        let span = tracing::info_span!("pipeline", run_id = %request.run_id);
        async {
            let _spec_guard = self.locks.lock(&request.spec_path).await;
            Self::finish(self.execute(request).await)
        }
        .instrument(span)
        .await
    }

    /// Run, then report the outcome through the notifier
    ///
    /// The spec lock is held until the notification attempt returns.
    pub async fn run_and_notify(&self, request: &RunRequest) -> Outcome {
        let span = tracing::info_span!("pipeline", run_id = %request.run_id);
        async {
            let _spec_guard = self.locks.lock(&request.spec_path).await;
            let outcome = Self::finish(self.execute(request).await);
            match self
                .notifier
                .notify(request.callback_url.as_deref(), &outcome)
                .await
            {
                Ok(Delivery::Sent(url)) => tracing::debug!(%url, "outcome delivered"),
                Ok(Delivery::NoTarget) => {}
                Err(e) => tracing::warn!(error = %e, "notification failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }

    fn finish(result: Result<Outcome, PipelineError>) -> Outcome {
        match result {
            Ok(outcome) => {
                tracing::info!("run succeeded");
                outcome
            }
            Err(e) => {
                tracing::error!(error = %e, "run failed");
                e.into_outcome()
            }
        }
    }

    /// Steps after the spec lock is taken
    async fn execute(&self, request: &RunRequest) -> Result<Outcome, PipelineError> {
        let spec = self.store.load(&request.spec_path).await?;
        spec.validate()?;

        let interpretation = self.interpreter.interpret_request(&request.instruction).await;
        let instructions = interpretation.instructions();

        let mutation = apply_all(spec, &instructions);
        mutation.spec.validate()?;
        if mutation.changed {
            self.store.save(&request.spec_path, &mutation.spec).await?;
        }
        tracing::info!(
            instructions = instructions.len(),
            applied = mutation.applied,
            changed = mutation.changed,
            "spec updated"
        );

        let project_dir = self.output_root.join(&mutation.spec.project_name);
        let _project_guard = self.locks.lock(&project_dir).await;

        let artifacts = Generator::generate_project(&mutation.spec);
        let digest = artifacts.digest();
        self.writer.write(&project_dir, &artifacts).await?;

        let report = self.verifier.verify(&project_dir).await?;
        tracing::info!(
            skipped = report.skipped,
            bootstrapped = report.bootstrapped,
            "verification passed"
        );

        Ok(Outcome::Success {
            project_name: mutation.spec.project_name,
            project_dir,
            changed: mutation.changed,
            applied: mutation.applied,
            digest,
        })
    }
}
