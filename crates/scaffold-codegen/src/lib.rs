//! Scaffold Codegen - Spring Boot sources from a project spec
//!
//! Each module yields six artifacts:
//! - JPA entity, Spring Data repository, service, MVC controller
//! - Thymeleaf list and edit pages
//!
//! The project adds a home controller, a home page and a shared stylesheet.
//! Output is deterministic; [`ArtifactSet::digest`] fingerprints a run.
//!
//! # Example
//!
//! ```rust,ignore
//! use scaffold_codegen::{ArtifactWriter, Generator};
//!
//! # async fn example(spec: scaffold_spec::ProjectSpec) -> Result<(), scaffold_codegen::CodegenError> {
//! let set = Generator::generate_project(&spec);
//! ArtifactWriter::new().write("out/demo-service", &set).await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod artifact;
pub mod context;
pub mod error;
pub mod generator;
mod templates;
pub mod writer;

pub use artifact::{ArtifactKey, ArtifactSet, GeneratedArtifact, GlobalArtifact, Layer};
pub use context::GenerationContext;
pub use error::CodegenError;
pub use generator::Generator;
pub use writer::ArtifactWriter;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
