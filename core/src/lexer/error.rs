use thiserror::Error;

use crate::api::{Diagnostic, Severity};
use crate::syntax::Span;

/// Lexing stops at the first error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("unterminated block comment")]
    UnterminatedComment,
}

impl LexError {
    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, help) = match &self.kind {
            LexErrorKind::UnexpectedCharacter('&') => ("L001", Some("logical and is written '&&'")),
            LexErrorKind::UnexpectedCharacter('|') => ("L001", Some("logical or is written '||'")),
            LexErrorKind::UnexpectedCharacter('.') => {
                ("L001", Some("numbers need digits on both sides of '.'"))
            }
            LexErrorKind::UnexpectedCharacter(_) => ("L001", None),
            LexErrorKind::UnterminatedComment => ("L002", Some("close the comment with '*/'")),
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
