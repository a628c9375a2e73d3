//! Tree-walking AST evaluator.
//!
//! An alternative back end to the bytecode VM: it walks the AST directly and
//! produces the same variable store, sharing its operator implementations
//! with the VM. Handy for checking the compiler and for the CLI's `--eval`
//! mode.
//!
//! ## Design Principles
//!
//! - **Never panic**: All adversarial inputs must be handled gracefully
//! - **Stack-safe**: Depth tracking prevents stack overflow from deeply nested
//!   trees built by hand
//! - **Strict by default**: reading an unassigned variable is an error unless
//!   [`UndefinedVariablePolicy::DefaultToZero`] is selected
//!
//! ## Example
//!
//! ```
//! use stackc_core::{lexer, parser};
//! use stackc_core::evaluator::{Evaluator, EvaluatorOptions};
//!
//! let parsed = parser::parse(lexer::tokenize("a = 2; b = a ^ 3;").unwrap());
//! let variables = Evaluator::new(EvaluatorOptions::default())
//!     .eval_program(&parsed.statements)
//!     .unwrap();
//! assert_eq!(variables["b"], 8.0);
//! ```

mod error;
mod eval;
pub(crate) mod operators;


pub use error::EvalError;
pub use eval::Evaluator;

/// What the evaluator does when an expression reads a variable that was never
/// assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndefinedVariablePolicy {
    /// Fail with [`EvalError::UndefinedVariable`], like the VM.
    #[default]
    Error,
    /// Read the variable as `0.0` and log a warning.
    DefaultToZero,
}

/// Configuration options for evaluation.
///
/// # Example
///
/// ```
/// use stackc_core::evaluator::{EvaluatorOptions, UndefinedVariablePolicy};
///
/// let options = EvaluatorOptions {
///     undefined_variables: UndefinedVariablePolicy::DefaultToZero,
///     ..EvaluatorOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct EvaluatorOptions {
    pub undefined_variables: UndefinedVariablePolicy,

    /// Maximum evaluation depth (for recursion protection).
    ///
    /// Default: 1000
    pub max_depth: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            undefined_variables: UndefinedVariablePolicy::default(),
            max_depth: 1000,
        }
    }
}

/// Evaluate a program with default options.
pub fn eval(statements: &[crate::ast::Node]) -> Result<crate::Variables, EvalError> {
    Evaluator::new(EvaluatorOptions::default()).eval_program(statements)
}
