use thiserror::Error;

use crate::api::{Diagnostic, Severity};
use crate::syntax::Span;

/// A statement that could not be derived from the grammar.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    /// Span of the offending token.
    pub span: Span,
    pub line: usize,
    pub column: usize,
}

/// Specific kinds of syntax errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("invalid number literal '{text}'")]
    InvalidNumber { text: String },
    #[error("nesting depth exceeds maximum of {max_depth} levels")]
    MaxDepthExceeded { max_depth: usize },
}

impl SyntaxError {
    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, help) = match &self.kind {
            SyntaxErrorKind::UnexpectedToken { expected, .. } if expected == "'='" => (
                "P001",
                Some("a statement is either `name = expression;` or an `if`"),
            ),
            SyntaxErrorKind::UnexpectedToken { .. } => ("P001", None),
            SyntaxErrorKind::InvalidNumber { .. } => ("P002", Some("Check the number format")),
            SyntaxErrorKind::MaxDepthExceeded { .. } => {
                ("P003", Some("Reduce nesting or simplify the expression"))
            }
        };

        Diagnostic {
            severity: Severity::Error,
            message: self.kind.to_string(),
            span: self.span.clone(),
            help: help.map(String::from),
            code: Some(code.to_string()),
        }
    }
}
