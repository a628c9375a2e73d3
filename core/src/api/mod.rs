//! Public API.
//!
//! This module ties the pipeline together: an [`Engine`] lexes, parses and
//! compiles source text into a [`CompiledProgram`], which runs on the VM.
//! Stage errors are converted into [`Error`] and [`Diagnostic`] at this
//! boundary.
//!
//! # Example
//!
//! ```
//! use stackc_core::api::{Engine, EngineOptions, Error};
//!
//! let engine = Engine::new(EngineOptions::default());
//!
//! let program = engine.compile("a = 10; if (a > 5) b = 1; else b = 0;").unwrap();
//! let variables = program.run().unwrap();
//! assert_eq!(variables["b"], 1.0);
//!
//! match engine.compile("a = ;") {
//!     Err(Error::Compilation { diagnostics, .. }) => assert_eq!(diagnostics.len(), 1),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

pub mod engine;
pub mod error;
pub mod options;
pub mod program;


pub use engine::Engine;
pub use error::{Diagnostic, Error, Severity};
pub use options::EngineOptions;
pub use program::CompiledProgram;
