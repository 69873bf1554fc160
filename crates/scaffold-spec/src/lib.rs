//! Scaffold Spec - the project specification at the heart of the agent
//!
//! Holds everything the pipeline needs to know about a project before any
//! source is generated:
//! - The data model (`ProjectSpec`, `ModuleSpec`, `Field`, `FieldType`)
//! - Naming rules shared by the mutator and the generator
//! - Structured edit instructions and the pure mutator that applies them
//! - Loading and saving the JSON spec document
//!
//! # Example
//!
//! ```rust,ignore
//! use scaffold_spec::{apply_all, Instruction, SpecStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SpecStore::new();
//! let spec = store.load("specs/app.json").await?;
//!
//! let mutation = apply_all(spec, &[Instruction::add_field("reservation", "phone", None)]);
//! if mutation.changed {
//!     store.save("specs/app.json", &mutation.spec).await?;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod instruction;
pub mod mutator;
pub mod naming;
pub mod store;
pub mod types;

pub use error::SpecError;
pub use instruction::Instruction;
pub use mutator::{apply, apply_all, Mutation};
pub use store::SpecStore;
pub use types::{Field, FieldType, ModuleSpec, ProjectSpec};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with project specifications
    pub use crate::{
        apply, apply_all, Field, FieldType, Instruction, ModuleSpec, Mutation, ProjectSpec,
        SpecError, SpecStore,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
