//! Bytecode compiler implementation.

use crate::{
    ast::Node,
    vm::{Code, Instruction, Label},
};

/// Lowers AST nodes to instructions in post-order.
///
/// Each `If` node takes the next value of a counter owned by the generator
/// and names its two labels `else_N` and `end_N`, so labels never collide
/// across calls on the same generator.
#[derive(Debug, Default)]
pub struct CodeGenerator {
    next_label: usize,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&mut self, node: &Node) -> Vec<Instruction> {
        let mut instructions = Vec::new();
        self.lower(node, &mut instructions);
        instructions
    }

    fn lower(&mut self, node: &Node, out: &mut Vec<Instruction>) {
        match node {
            Node::Number(value) => out.push(Instruction::PushNumber(*value)),
            Node::Identifier(name) => out.push(Instruction::PushVar(name.clone())),
            Node::Boolean(value) => {
                out.push(Instruction::PushNumber(if *value { 1.0 } else { 0.0 }))
            }
            Node::Unary { op, operand } => {
                self.lower(operand, out);
                out.push(Instruction::unary(*op));
            }
            Node::Binary { op, left, right } => {
                self.lower(left, out);
                self.lower(right, out);
                out.push(Instruction::binary(*op));
            }
            Node::Assign { variable, value } => {
                self.lower(value, out);
                out.push(Instruction::Store(variable.clone()));
            }
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let (else_label, end_label) = self.fresh_labels();
                self.lower(condition, out);
                out.push(Instruction::JumpIfFalse(else_label.clone()));
                self.lower(then_branch, out);
                out.push(Instruction::Jump(end_label.clone()));
                out.push(Instruction::Label(else_label));
                if let Some(else_branch) = else_branch {
                    self.lower(else_branch, out);
                }
                out.push(Instruction::Label(end_label));
            }
            Node::Program(statements) => {
                for statement in statements {
                    self.lower(statement, out);
                }
            }
        }
    }

    fn fresh_labels(&mut self) -> (Label, Label) {
        let n = self.next_label;
        self.next_label += 1;
        (
            Label(format!("else_{}", n)),
            Label(format!("end_{}", n)),
        )
    }
}

/// Bytecode compiler that turns statements into executable [`Code`].
///
/// It tracks the operand stack depth of every emitted instruction to record
/// an exact `max_stack_size`.
#[derive(Debug, Default)]
pub struct BytecodeCompiler {
    generator: CodeGenerator,

    /// Bytecode instructions
    instructions: Vec<Instruction>,

    /// Current stack depth during compilation
    current_stack_depth: usize,

    /// Maximum stack depth observed
    max_stack_size: usize,
}

impl BytecodeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience method to compile a node in one call.
    pub fn compile(node: &Node) -> Code {
        let mut compiler = Self::new();
        compiler.add(node);
        compiler.finalize()
    }

    /// Compile a statement list as one program.
    pub fn compile_statements(statements: &[Node]) -> Code {
        let mut compiler = Self::new();
        for statement in statements {
            compiler.add(statement);
        }
        compiler.finalize()
    }

    /// Append the instructions for `node`.
    pub fn add(&mut self, node: &Node) {
        for instruction in self.generator.generate(node) {
            self.emit(instruction);
        }
    }

    /// Finalize compilation and return the bytecode.
    pub fn finalize(self) -> Code {
        tracing::debug!(
            instructions = self.instructions.len(),
            max_stack_size = self.max_stack_size,
            "compiled program"
        );
        Code {
            instructions: self.instructions,
            max_stack_size: self.max_stack_size,
        }
    }

    fn emit(&mut self, instruction: Instruction) {
        let (pops, pushes) = instruction.stack_effect();
        self.pop_stack_n(pops);
        for _ in 0..pushes {
            self.push_stack();
        }
        self.instructions.push(instruction);
    }

    // === Stack Management ===

    fn push_stack(&mut self) {
        self.current_stack_depth += 1;
        if self.current_stack_depth > self.max_stack_size {
            self.max_stack_size = self.current_stack_depth;
        }
    }

    fn pop_stack_n(&mut self, n: usize) {
        debug_assert!(
            self.current_stack_depth >= n,
            "Stack underflow: trying to pop {} but depth is {}",
            n,
            self.current_stack_depth
        );
        self.current_stack_depth = self.current_stack_depth.saturating_sub(n);
    }
}
