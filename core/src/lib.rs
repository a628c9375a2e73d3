//! Core pipeline of the stackc language: lexer, parser, bytecode compiler,
//! stack virtual machine, plus a reference AST evaluator and a DOT renderer.
//!
//! ```
//! use stackc_core::{compiler::BytecodeCompiler, lexer, parser, vm::VM};
//!
//! let tokens = lexer::tokenize("x = 3 + 4 * (2 - 1);").unwrap();
//! let parsed = parser::parse(tokens);
//! assert!(parsed.errors.is_empty());
//!
//! let code = BytecodeCompiler::compile_statements(&parsed.statements);
//! let variables = VM::execute(&code).unwrap();
//! assert_eq!(variables["x"], 7.0);
//! ```

pub mod api;
pub mod ast;
pub mod compiler;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod syntax;
pub mod visualizer;
pub mod vm;

/// Final variable bindings produced by a run, ordered by name.
pub type Variables = std::collections::BTreeMap<String, f64>;

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_if_lowering() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
