use thiserror::Error;

use crate::vm::{Instruction, Label};

/// Fatal error raised while resolving labels or executing instructions.
///
/// `pc` is the index of the offending instruction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("variable '{name}' is not defined (at instruction {pc})")]
    UndefinedVariable { name: String, pc: usize },

    #[error("division by zero (at instruction {pc})")]
    DivisionByZero { pc: usize },

    #[error("stack underflow executing {instruction} (at instruction {pc})")]
    StackUnderflow { pc: usize, instruction: Instruction },

    #[error("jump to undefined label '{label}' (at instruction {pc})")]
    UnresolvedLabel { label: Label, pc: usize },

    #[error("label '{label}' defined twice (at instructions {first} and {second})")]
    DuplicateLabel {
        label: Label,
        first: usize,
        second: usize,
    },
}

impl RuntimeError {
    /// Index of the instruction that failed.
    pub fn pc(&self) -> usize {
        match self {
            RuntimeError::UndefinedVariable { pc, .. }
            | RuntimeError::DivisionByZero { pc }
            | RuntimeError::StackUnderflow { pc, .. }
            | RuntimeError::UnresolvedLabel { pc, .. } => *pc,
            RuntimeError::DuplicateLabel { second, .. } => *second,
        }
    }
}
