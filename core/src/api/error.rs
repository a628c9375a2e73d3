//! Public error types for the API.
//!
//! Stage errors (lexer, parser, VM, evaluator) are converted to these types at
//! the API boundary. Compilation problems become [`Diagnostic`]s carrying the
//! source span, which the root crate renders with ariadne.

use core::fmt;

use crate::evaluator::EvalError;
use crate::syntax::Span;
use crate::vm::RuntimeError;

/// Public error type for all engine operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The source did not lex or parse.
    ///
    /// Holds one diagnostic for a lexical error, or one per malformed
    /// statement, plus the source they point into.
    Compilation {
        diagnostics: Vec<Diagnostic>,
        source: String,
    },

    /// The VM stopped with a runtime error.
    Runtime(RuntimeError),

    /// The AST evaluator stopped with an error.
    Evaluation(EvalError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Compilation { diagnostics, .. } => {
                let error_count = diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Error)
                    .count();
                write!(f, "Compilation failed with {} error(s)", error_count)
            }
            Error::Runtime(err) => write!(f, "Runtime error: {}", err),
            Error::Evaluation(err) => write!(f, "Evaluation error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Compilation { .. } => None,
            Error::Runtime(err) => Some(err),
            Error::Evaluation(err) => Some(err),
        }
    }
}

/// A diagnostic message (error, warning, or info) with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Optional error code (e.g., "P001") for documentation lookup.
    pub code: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref help) = self.help {
            write!(f, "\nhelp: {}", help)?;
        }
        Ok(())
    }
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - compilation cannot succeed.
    Error,
    /// Warning - suspicious code that might be wrong.
    Warning,
    /// Info - informational message.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

// ============================================================================
// Conversion from internal errors
// ============================================================================

impl From<RuntimeError> for Error {
    fn from(err: RuntimeError) -> Self {
        Error::Runtime(err)
    }
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        Error::Evaluation(err)
    }
}
