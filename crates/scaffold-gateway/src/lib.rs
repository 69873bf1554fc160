//! Scaffold Gateway - signed triggers and the run pipeline
//!
//! Wires the workspace together:
//! - Authenticates Ed25519-signed requests
//! - Runs interpret -> mutate -> generate -> write -> verify under per-path locks
//! - Reports outcomes to a callback URL
//!
//! # Example
//!
//! ```rust,ignore
//! use scaffold_gateway::{build_state, routes, GatewayConfig};
//!
//! # async fn example() -> Result<(), scaffold_gateway::GatewayError> {
//! let config = GatewayConfig::load("scaffold.toml")?;
//! let state = build_state(&config)?;
//! warp::serve(routes(state)).run(config.server.bind).await;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod auth;
pub mod config;
pub mod error;
pub mod locks;
pub mod notifier;
pub mod pipeline;
pub mod server;
pub mod telemetry;

pub use auth::{AuthError, SignatureVerifier};
pub use config::{GatewayConfig, LogFormat};
pub use error::GatewayError;
pub use locks::PathLocks;
pub use notifier::{Delivery, HttpNotifier, LogNotifier, Notifier, NotifyConfig, NotifyError};
pub use pipeline::{Outcome, Pipeline, PipelineError, RunRequest};
pub use server::{routes, AppState};

use scaffold_interpreter::{CompletionTranslator, DisabledTranslator, Interpreter, Translator};
use std::sync::Arc;

/// Interpreter for the configured translator
///
/// # Errors
/// `GatewayError::Translator` if the HTTP client cannot be built.
pub fn build_interpreter(config: &GatewayConfig) -> Result<Interpreter, GatewayError> {
    let translator: Arc<dyn Translator> = if config.translator.enabled {
        Arc::new(CompletionTranslator::new(config.translator.clone())?)
    } else {
        Arc::new(DisabledTranslator)
    };
    Ok(Interpreter::new(translator))
}

/// Pipeline with the configured translator, verifier and notifier
///
/// # Errors
/// `GatewayError::Translator` or `GatewayError::Config` if a client cannot be built.
pub fn build_pipeline(config: &GatewayConfig) -> Result<Pipeline, GatewayError> {
    let notifier = HttpNotifier::new(&config.notify)
        .map_err(|e| GatewayError::Config(format!("notifier: {e}")))?;
    Ok(Pipeline::new(
        build_interpreter(config)?,
        scaffold_verify::verifier_for(&config.verify),
        Arc::new(notifier),
        config.paths.resolved_output_root(),
    ))
}

/// Route state for a validated config
///
/// # Errors
/// Missing or invalid public key, or a client that cannot be built.
pub fn build_state(config: &GatewayConfig) -> Result<Arc<AppState>, GatewayError> {
    config.validate()?;
    let state = AppState::new(
        config.auth.verifier()?,
        Arc::new(build_pipeline(config)?),
        &config.paths,
    )
    .with_max_body_bytes(config.server.max_body_bytes);
    Ok(Arc::new(state))
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
