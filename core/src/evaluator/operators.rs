//! Binary and unary operator implementations.
//!
//! Shared by the tree-walking evaluator and the VM so both back ends agree on
//! every result.

use crate::syntax::{BinaryOp, UnaryOp};

/// The only operation that fails: `DIV` with a zero right operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DivisionByZero;

#[inline]
pub(crate) fn from_bool(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

/// Any non-zero value is true; NaN counts as true.
#[inline]
pub(crate) fn is_truthy(value: f64) -> bool {
    value != 0.0
}

/// Evaluate a binary operation on two numbers.
///
/// Follows IEEE 754 semantics except for division, where a zero divisor is an
/// error. `%` by zero yields NaN.
pub(crate) fn eval_binary(op: BinaryOp, left: f64, right: f64) -> Result<f64, DivisionByZero> {
    Ok(match op {
        BinaryOp::Add => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Mul => left * right,
        BinaryOp::Div => {
            if right == 0.0 {
                return Err(DivisionByZero);
            }
            left / right
        }
        BinaryOp::Mod => left % right,
        BinaryOp::Pow => left.powf(right),
        BinaryOp::Eq => from_bool(left == right),
        BinaryOp::Neq => from_bool(left != right),
        BinaryOp::Lt => from_bool(left < right),
        BinaryOp::Lte => from_bool(left <= right),
        BinaryOp::Gt => from_bool(left > right),
        BinaryOp::Gte => from_bool(left >= right),
        BinaryOp::And => from_bool(is_truthy(left) && is_truthy(right)),
        BinaryOp::Or => from_bool(is_truthy(left) || is_truthy(right)),
    })
}

pub(crate) fn eval_unary(op: UnaryOp, value: f64) -> f64 {
    match op {
        UnaryOp::Neg => -value,
        UnaryOp::Not => from_bool(value == 0.0),
    }
}
