use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use super::instruction_set::Instruction;

use crate::{
    Variables,
    syntax::UnaryOp,
    evaluator::operators::{self, DivisionByZero},
    vm::{Code, RuntimeError, Stack},
};

/// Two-pass stack machine.
///
/// [`VM::new`] resolves every label and checks every jump target; [`VM::run`]
/// then executes from the first instruction until the program counter passes
/// the end. Each VM owns a fresh operand stack and variable store.
pub struct VM<'c> {
    instructions: &'c [Instruction],
    labels: HashMap<&'c str, usize>,
    pc: usize,
    stack: Stack<f64>,
    variables: Variables,
}

impl<'c> VM<'c> {
    pub fn new(code: &'c Code) -> Result<Self, RuntimeError> {
        Self::with_stack_size(&code.instructions, code.max_stack_size)
    }

    /// Resolve and run `code`, returning the final variable store.
    pub fn execute(code: &Code) -> Result<Variables, RuntimeError> {
        VM::new(code)?.run()
    }

    /// Resolve and run a bare instruction sequence.
    pub fn execute_instructions(instructions: &[Instruction]) -> Result<Variables, RuntimeError> {
        VM::with_stack_size(instructions, 0)?.run()
    }

    fn with_stack_size(
        instructions: &'c [Instruction],
        stack_size: usize,
    ) -> Result<Self, RuntimeError> {
        let labels = resolve_labels(instructions)?;
        Ok(VM {
            instructions,
            labels,
            pc: 0,
            stack: Stack::new(stack_size),
            variables: Variables::new(),
        })
    }

    pub fn run(mut self) -> Result<Variables, RuntimeError> {
        let instructions = self.instructions;
        while let Some(instruction) = instructions.get(self.pc) {
            tracing::trace!(pc = self.pc, depth = self.stack.len(), "{}", instruction);
            self.pc = self.step(instruction)?;
        }
        tracing::debug!(
            instructions = self.instructions.len(),
            variables = self.variables.len(),
            "execution finished"
        );
        Ok(self.variables)
    }

    /// Execute one instruction and return the next program counter.
    fn step(&mut self, instruction: &'c Instruction) -> Result<usize, RuntimeError> {
        let pc = self.pc;

        use Instruction::*;
        match instruction {
            PushNumber(value) => self.stack.push(*value),
            PushVar(name) => {
                let value = self.variables.get(name).copied().ok_or_else(|| {
                    RuntimeError::UndefinedVariable {
                        name: name.clone(),
                        pc,
                    }
                })?;
                self.stack.push(value);
            }
            Store(name) => {
                let value = self.pop(instruction)?;
                self.variables.insert(name.clone(), value);
            }
            Neg => {
                let value = self.pop(instruction)?;
                self.stack.push(operators::eval_unary(UnaryOp::Neg, value));
            }
            Not => {
                let value = self.pop(instruction)?;
                self.stack.push(operators::eval_unary(UnaryOp::Not, value));
            }
            Jump(label) => return Ok(self.target(label)),
            JumpIfFalse(label) => {
                let condition = self.pop(instruction)?;
                if !operators::is_truthy(condition) {
                    return Ok(self.target(label));
                }
            }
            Label(_) => {}
            Add | Sub | Mul | Div | Pow | Mod | Eq | Neq | Lt | Lte | Gt | Gte | And | Or => {
                if let Some(op) = instruction.binary_op() {
                    let right = self.pop(instruction)?;
                    let left = self.pop(instruction)?;
                    let result = operators::eval_binary(op, left, right)
                        .map_err(|DivisionByZero| RuntimeError::DivisionByZero { pc })?;
                    self.stack.push(result);
                }
            }
        }

        Ok(pc + 1)
    }

    fn pop(&mut self, instruction: &Instruction) -> Result<f64, RuntimeError> {
        self.stack.pop().ok_or_else(|| RuntimeError::StackUnderflow {
            pc: self.pc,
            instruction: instruction.clone(),
        })
    }

    fn target(&self, label: &super::Label) -> usize {
        // Every jump target was checked in `resolve_labels`.
        self.labels
            .get(label.as_str())
            .copied()
            .unwrap_or(self.instructions.len())
    }
}

/// First pass: map each label to its index and verify every jump target.
fn resolve_labels(instructions: &[Instruction]) -> Result<HashMap<&str, usize>, RuntimeError> {
    let mut labels = HashMap::new();
    for (index, instruction) in instructions.iter().enumerate() {
        if let Instruction::Label(label) = instruction {
            match labels.entry(label.as_str()) {
                Entry::Vacant(entry) => {
                    entry.insert(index);
                }
                Entry::Occupied(entry) => {
                    return Err(RuntimeError::DuplicateLabel {
                        label: label.clone(),
                        first: *entry.get(),
                        second: index,
                    });
                }
            }
        }
    }

    for (pc, instruction) in instructions.iter().enumerate() {
        if let Some(label) = instruction.jump_target() {
            if !labels.contains_key(label.as_str()) {
                return Err(RuntimeError::UnresolvedLabel {
                    label: label.clone(),
                    pc,
                });
            }
        }
    }

    tracing::debug!(labels = labels.len(), "resolved labels");
    Ok(labels)
}
