//! Bytecode compiler.
//!
//! Lowers the AST into the flat, labeled instruction sequence executed by
//! [`crate::vm::VM`].
//!
//! ## Design
//!
//! - Post-order lowering: operands are emitted before the instruction that
//!   consumes them
//! - `If` lowers to a conditional jump over the then-branch and an
//!   unconditional jump over the else-branch
//! - Tracks stack depth for `Code::max_stack_size`

mod bytecode;


pub use bytecode::{BytecodeCompiler, CodeGenerator};
