//! Instruction set of the stack machine.
//!
//! Every value on the operand stack is an `f64`; booleans are `1.0` and
//! `0.0`. Control flow uses symbolic [`Label`]s which the VM resolves to
//! instruction indices before running anything.
//!
//! # Stack Discipline
//!
//! Stack effect notation: `[..., left, right] -> [..., result]`. Binary
//! instructions pop the right operand first, then the left one.

use core::fmt;

use crate::syntax::{BinaryOp, UnaryOp};

/// Name of a position in the instruction sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub String);

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    // ========================================================================
    // Stack & Variables
    // ========================================================================
    /// Stack: [...] -> [..., value]
    PushNumber(f64),
    /// Fails if the variable was never stored.
    /// Stack: [...] -> [..., value]
    PushVar(String),
    /// Stack: [..., value] -> [...]
    Store(String),

    // ========================================================================
    // Arithmetic
    // ========================================================================
    /// Stack: [..., left, right] -> [..., left + right]
    Add,
    Sub,
    Mul,
    /// Fails when the right operand is zero.
    Div,
    Pow,
    /// IEEE remainder; `x % 0` is NaN.
    Mod,
    /// Stack: [..., value] -> [..., -value]
    Neg,

    // ========================================================================
    // Comparison & Logic (results are 1.0 or 0.0)
    // ========================================================================
    /// Stack: [..., value] -> [..., value == 0]
    Not,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    /// Both operands are already evaluated; no short circuit.
    And,
    Or,

    // ========================================================================
    // Control Flow
    // ========================================================================
    /// Unconditional jump.
    Jump(Label),
    /// Stack: [..., condition] -> [...]; jumps when condition is 0.
    JumpIfFalse(Label),
    /// Marks a jump target. No-op when executed.
    Label(Label),
}

impl Instruction {
    pub fn binary(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Add => Instruction::Add,
            BinaryOp::Sub => Instruction::Sub,
            BinaryOp::Mul => Instruction::Mul,
            BinaryOp::Div => Instruction::Div,
            BinaryOp::Mod => Instruction::Mod,
            BinaryOp::Pow => Instruction::Pow,
            BinaryOp::Eq => Instruction::Eq,
            BinaryOp::Neq => Instruction::Neq,
            BinaryOp::Lt => Instruction::Lt,
            BinaryOp::Lte => Instruction::Lte,
            BinaryOp::Gt => Instruction::Gt,
            BinaryOp::Gte => Instruction::Gte,
            BinaryOp::And => Instruction::And,
            BinaryOp::Or => Instruction::Or,
        }
    }

    pub fn unary(op: UnaryOp) -> Self {
        match op {
            UnaryOp::Neg => Instruction::Neg,
            UnaryOp::Not => Instruction::Not,
        }
    }

    /// The operator applied by a two-operand instruction.
    pub fn binary_op(&self) -> Option<BinaryOp> {
        Some(match self {
            Instruction::Add => BinaryOp::Add,
            Instruction::Sub => BinaryOp::Sub,
            Instruction::Mul => BinaryOp::Mul,
            Instruction::Div => BinaryOp::Div,
            Instruction::Mod => BinaryOp::Mod,
            Instruction::Pow => BinaryOp::Pow,
            Instruction::Eq => BinaryOp::Eq,
            Instruction::Neq => BinaryOp::Neq,
            Instruction::Lt => BinaryOp::Lt,
            Instruction::Lte => BinaryOp::Lte,
            Instruction::Gt => BinaryOp::Gt,
            Instruction::Gte => BinaryOp::Gte,
            Instruction::And => BinaryOp::And,
            Instruction::Or => BinaryOp::Or,
            _ => return None,
        })
    }

    /// The label this instruction jumps to, if it is a jump.
    pub fn jump_target(&self) -> Option<&Label> {
        match self {
            Instruction::Jump(label) | Instruction::JumpIfFalse(label) => Some(label),
            _ => None,
        }
    }

    /// Values popped and pushed, in that order.
    pub fn stack_effect(&self) -> (usize, usize) {
        match self {
            Instruction::PushNumber(_) | Instruction::PushVar(_) => (0, 1),
            Instruction::Store(_) | Instruction::JumpIfFalse(_) => (1, 0),
            Instruction::Neg | Instruction::Not => (1, 1),
            Instruction::Jump(_) | Instruction::Label(_) => (0, 0),
            _ => (2, 1),
        }
    }

    pub fn opcode(&self) -> &'static str {
        match self {
            Instruction::PushNumber(_) => "PUSH_NUMBER",
            Instruction::PushVar(_) => "PUSH_VAR",
            Instruction::Store(_) => "STORE",
            Instruction::Add => "ADD",
            Instruction::Sub => "SUB",
            Instruction::Mul => "MUL",
            Instruction::Div => "DIV",
            Instruction::Pow => "POW",
            Instruction::Mod => "MOD",
            Instruction::Neg => "NEG",
            Instruction::Not => "NOT",
            Instruction::Eq => "EQ",
            Instruction::Neq => "NEQ",
            Instruction::Lt => "LT",
            Instruction::Lte => "LTE",
            Instruction::Gt => "GT",
            Instruction::Gte => "GTE",
            Instruction::And => "AND",
            Instruction::Or => "OR",
            Instruction::Jump(_) => "JUMP",
            Instruction::JumpIfFalse(_) => "JUMP_IF_FALSE",
            Instruction::Label(_) => "LABEL",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode())?;
        match self {
            Instruction::PushNumber(value) => write!(f, " {}", value),
            Instruction::PushVar(name) | Instruction::Store(name) => write!(f, " {}", name),
            Instruction::Jump(label)
            | Instruction::JumpIfFalse(label)
            | Instruction::Label(label) => write!(f, " {}", label),
            _ => Ok(()),
        }
    }
}
