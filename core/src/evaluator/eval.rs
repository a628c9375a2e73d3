//! Core evaluation logic.

use crate::{
    Variables,
    ast::Node,
    evaluator::{
        EvalError, EvaluatorOptions, UndefinedVariablePolicy,
        operators::{self, DivisionByZero},
    },
};

/// Tree-walking evaluator over the AST.
///
/// Produces the same variable store as compiling and running on the VM.
#[derive(Debug)]
pub struct Evaluator {
    options: EvaluatorOptions,
    variables: Variables,
    depth: usize,
}

impl Evaluator {
    /// Create a new evaluator with the given options.
    pub fn new(options: EvaluatorOptions) -> Self {
        Self {
            options,
            variables: Variables::new(),
            depth: 0,
        }
    }

    /// Run a program against a fresh variable store and return the store.
    pub fn eval_program(&mut self, statements: &[Node]) -> Result<Variables, EvalError> {
        self.variables.clear();
        self.depth = 0;
        let result = statements.iter().try_for_each(|s| self.exec(s));
        let variables = core::mem::take(&mut self.variables);
        result.map(|()| {
            tracing::debug!(variables = variables.len(), "evaluated program");
            variables
        })
    }

    /// Variables assigned so far by [`Evaluator::exec`].
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Execute one statement against the current store. An expression in
    /// statement position is evaluated and its value discarded.
    pub fn exec(&mut self, statement: &Node) -> Result<(), EvalError> {
        self.nested(|this| this.exec_inner(statement))
    }

    fn exec_inner(&mut self, statement: &Node) -> Result<(), EvalError> {
        match statement {
            Node::Assign { variable, value } => {
                let value = self.eval_expr(value)?;
                self.variables.insert(variable.clone(), value);
            }
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if operators::is_truthy(self.eval_expr(condition)?) {
                    self.exec(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.exec(else_branch)?;
                }
            }
            Node::Program(statements) => {
                for statement in statements {
                    self.exec(statement)?;
                }
            }
            expression => {
                self.eval_expr(expression)?;
            }
        }
        Ok(())
    }

    /// Evaluate an expression node.
    pub fn eval_expr(&mut self, expr: &Node) -> Result<f64, EvalError> {
        self.nested(|this| this.eval_expr_inner(expr))
    }

    fn eval_expr_inner(&mut self, expr: &Node) -> Result<f64, EvalError> {
        match expr {
            Node::Number(value) => Ok(*value),
            Node::Boolean(value) => Ok(operators::from_bool(*value)),
            Node::Identifier(name) => self.lookup(name),
            Node::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                Ok(operators::eval_unary(*op, value))
            }
            Node::Binary { op, left, right } => {
                // Both sides are always evaluated, as on the VM.
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                operators::eval_binary(*op, left, right)
                    .map_err(|DivisionByZero| EvalError::DivisionByZero)
            }
            Node::Assign { .. } | Node::If { .. } | Node::Program(_) => {
                Err(EvalError::NotAnExpression {
                    node: expr.kind_name(),
                })
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<f64, EvalError> {
        if let Some(value) = self.variables.get(name) {
            return Ok(*value);
        }
        match self.options.undefined_variables {
            UndefinedVariablePolicy::Error => Err(EvalError::UndefinedVariable {
                name: name.to_string(),
            }),
            UndefinedVariablePolicy::DefaultToZero => {
                tracing::warn!(variable = name, "undefined variable read as 0");
                Ok(0.0)
            }
        }
    }

    fn nested<T>(
        &mut self,
        eval: impl FnOnce(&mut Self) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        // Check depth before recursing
        if self.depth >= self.options.max_depth {
            return Err(EvalError::MaxDepthExceeded {
                depth: self.depth,
                max_depth: self.options.max_depth,
            });
        }

        self.depth += 1;
        let result = eval(self);
        self.depth -= 1;

        result
    }
}
