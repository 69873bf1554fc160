//! Scaffold Verify - build/test checks for generated projects
//!
//! Runs an external command (by default the Gradle wrapper) in the project
//! directory. A non-zero exit is a build failure carrying the captured
//! output; the pipeline reports it and does not roll anything back.

#![warn(unreachable_pub)]

pub mod command;
pub mod config;
pub mod error;
pub mod runner;

pub use command::{CommandOutput, VerifyCommand};
pub use config::VerifyConfig;
pub use error::VerifyError;
pub use runner::{verifier_for, Bootstrap, SkipVerifier, VerificationRunner, Verifier, VerifyReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
