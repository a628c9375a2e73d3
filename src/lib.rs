//! stackc - a small expression language compiled to stack bytecode
//!
//! # Overview
//!
//! Programs are sequences of assignments and `if`/`else` statements over
//! numeric and boolean expressions. Source text goes through a lexer and a
//! recursive-descent parser, is lowered to labeled stack instructions, and
//! runs on a two-pass stack virtual machine. The result of a run is the final
//! value of every assigned variable.
//!
//! # Quick Start
//!
//! ```
//! use stackc::{Engine, EngineOptions};
//!
//! let engine = Engine::new(EngineOptions::default());
//! let program = engine.compile("a = 10; if (a > 5) b = 2 ^ 3 ^ 2; else b = 0;").unwrap();
//!
//! let variables = program.run().unwrap();
//! assert_eq!(variables["b"], 512.0);
//! ```
//!
//! # Errors
//!
//! Compilation errors carry [`Diagnostic`]s with source spans and can be
//! rendered with [`render_error`]:
//!
//! ```
//! use stackc::{Engine, EngineOptions, render_error_to_string_no_color};
//!
//! let engine = Engine::new(EngineOptions::default());
//! let err = engine.compile("x = (1 + 2;").unwrap_err();
//! let rendered = render_error_to_string_no_color(&err);
//! assert!(rendered.contains("expected ')' after expression"));
//! ```

mod error_renderer;

// Re-export public API from stackc_core
pub use stackc_core::api::{CompiledProgram, Diagnostic, Engine, EngineOptions, Error, Severity};

// Re-export the pipeline stages
pub use stackc_core::Variables;
pub use stackc_core::evaluator::{EvalError, EvaluatorOptions, UndefinedVariablePolicy};
pub use stackc_core::parser::ParserOptions;
pub use stackc_core::vm::{Code, Instruction, RuntimeError};
pub use stackc_core::{ast, compiler, evaluator, lexer, parser, visualizer, vm};

pub use error_renderer::{render_error, render_error_to, render_error_to_string_no_color};
