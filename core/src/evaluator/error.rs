//! Evaluation errors.
//!
//! Every error aborts the whole program; the variable store at the point of
//! failure is discarded.

use thiserror::Error;

/// Error raised by the tree-walking evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Read of a variable that was never assigned, under
    /// [`UndefinedVariablePolicy::Error`](crate::evaluator::UndefinedVariablePolicy::Error).
    #[error("variable '{name}' is not defined")]
    UndefinedVariable { name: String },

    #[error("division by zero")]
    DivisionByZero,

    /// Evaluation recursion depth exceeded.
    #[error("evaluation depth {depth} exceeds maximum of {max_depth}")]
    MaxDepthExceeded { depth: usize, max_depth: usize },

    /// A statement node (`Assign`, `If`, `Program`) used where a value is
    /// required. The parser never builds such trees.
    #[error("{node} does not produce a value")]
    NotAnExpression { node: &'static str },
}
