//! Scaffold Interpreter - text to structured spec edits
//!
//! Turns caller text into `Instruction`s:
//! - A small grammar, tried as an ordered table of matchers
//! - A translator fallback that asks an external completion service to
//!   rewrite prose into grammar lines
//!
//! The interpreter is permissive: lines it cannot understand are dropped,
//! and translator failures degrade to an empty list.
//!
//! # Example
//!
//! ```rust,ignore
//! use scaffold_interpreter::{interpret, Interpreter};
//!
//! # async fn example() {
//! let instr = interpret("add field phone to module reservation");
//! assert!(instr.is_some());
//!
//! let out = Interpreter::offline().interpret_request("add module todo with fields title").await;
//! assert_eq!(out.instructions().len(), 1);
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod prompt;
pub mod translator;

pub use error::TranslateError;
pub use grammar::interpret;
pub use interpreter::{Interpretation, Interpreter};
pub use translator::{CompletionTranslator, DisabledTranslator, Translator, TranslatorConfig};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for interpreting requests
    pub use crate::{interpret, Interpretation, Interpreter, Translator, TranslatorConfig};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
