//! Stack virtual machine.
//!
//! Executes an [`Instruction`] sequence against an operand stack and a
//! variable store. See [`VM`] for the two-pass execution model.

mod code;
mod error;
mod instruction_set;
mod runtime;
mod stack;


pub use code::Code;
pub use error::RuntimeError;
pub use instruction_set::{Instruction, Label};
pub use runtime::VM;

pub(crate) use stack::Stack;
