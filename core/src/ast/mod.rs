//! Abstract syntax tree produced by the parser.
//!
//! Every node owns its children; the tree has no sharing and no cycles.

use core::fmt;

pub use crate::syntax::{BinaryOp, UnaryOp};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(f64),
    Identifier(String),
    Boolean(bool),
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Assign {
        variable: String,
        value: Box<Node>,
    },
    If {
        condition: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    /// Root wrapper for multi-statement input.
    Program(Vec<Node>),
}

impl Node {
    pub fn identifier(name: impl Into<String>) -> Self {
        Node::Identifier(name.into())
    }

    pub fn unary(op: UnaryOp, operand: Node) -> Self {
        Node::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn assign(variable: impl Into<String>, value: Node) -> Self {
        Node::Assign {
            variable: variable.into(),
            value: Box::new(value),
        }
    }

    pub fn if_else(condition: Node, then_branch: Node, else_branch: Option<Node>) -> Self {
        Node::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }
    }

    /// Short variant name, as shown by the visualizer.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Number(_) => "Number",
            Node::Identifier(_) => "Identifier",
            Node::Boolean(_) => "Boolean",
            Node::Unary { .. } => "UnaryOp",
            Node::Binary { .. } => "BinaryOp",
            Node::Assign { .. } => "Assign",
            Node::If { .. } => "If",
            Node::Program(_) => "Program",
        }
    }
}

// Renders the tree back as source with every compound expression
// parenthesized, e.g. `y = (2 ^ (3 ^ 2));`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(value) => write!(f, "{}", value),
            Node::Identifier(name) => f.write_str(name),
            Node::Boolean(value) => write!(f, "{}", value),
            Node::Unary { op, operand } => write!(f, "({}{})", op, operand),
            Node::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Node::Assign { variable, value } => write!(f, "{} = {};", variable, value),
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => {
                write!(f, "if ({}) {}", condition, then_branch)?;
                if let Some(else_branch) = else_branch {
                    write!(f, " else {}", else_branch)?;
                }
                Ok(())
            }
            Node::Program(statements) => {
                for (i, statement) in statements.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{}", statement)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parenthesizes_compound_expressions() {
        let node = Node::assign(
            "y",
            Node::binary(
                BinaryOp::Pow,
                Node::Number(2.0),
                Node::binary(BinaryOp::Pow, Node::Number(3.0), Node::Number(2.0)),
            ),
        );
        assert_eq!(node.to_string(), "y = (2 ^ (3 ^ 2));");
    }

    #[test]
    fn test_display_if_else() {
        let node = Node::if_else(
            Node::binary(BinaryOp::Gt, Node::identifier("a"), Node::Number(5.0)),
            Node::assign("b", Node::Boolean(true)),
            Some(Node::assign("b", Node::unary(UnaryOp::Not, Node::Boolean(true)))),
        );
        assert_eq!(node.to_string(), "if ((a > 5)) b = true; else b = (!true);");
    }
}
