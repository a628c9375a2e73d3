//! Compiled program ready for execution.

use super::Error;
use crate::{
    Variables,
    ast::Node,
    evaluator::{Evaluator, EvaluatorOptions},
    visualizer,
    vm::{Code, VM},
};

/// A successfully compiled program.
///
/// Keeps the statements next to the bytecode so the same program can be run
/// on the VM, evaluated directly, or rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledProgram {
    source: String,
    statements: Vec<Node>,
    code: Code,
}

impl CompiledProgram {
    pub(crate) fn new(source: &str, statements: Vec<Node>, code: Code) -> Self {
        Self {
            source: source.to_string(),
            statements,
            code,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn statements(&self) -> &[Node] {
        &self.statements
    }

    pub fn code(&self) -> &Code {
        &self.code
    }

    /// Execute the bytecode on a fresh VM.
    pub fn run(&self) -> Result<Variables, Error> {
        Ok(VM::execute(&self.code)?)
    }

    /// Walk the AST instead of running the bytecode.
    pub fn evaluate(&self, options: EvaluatorOptions) -> Result<Variables, Error> {
        Ok(Evaluator::new(options).eval_program(&self.statements)?)
    }

    /// DOT rendering of the whole program under a `Program` root.
    pub fn to_dot(&self) -> String {
        visualizer::render_dot(&Node::Program(self.statements.clone()))
    }
}
