//! Graphviz DOT rendering of the AST.
//!
//! The output is plain text; turning it into an image is left to the `dot`
//! tool.

use crate::ast::Node;

/// Render `node` and its subtree as a `digraph AST { ... }` document.
///
/// Nodes are named `node0`, `node1`, ... in pre-order. Each edge is emitted
/// after the subtree it points to.
pub fn render_dot(node: &Node) -> String {
    let mut writer = DotWriter::default();
    writer.out.push_str("digraph AST {\n");
    writer
        .out
        .push_str("  node [shape=box, fontname=\"Arial\", fontsize=10];\n");
    writer
        .out
        .push_str("  edge [fontname=\"Arial\", fontsize=8];\n\n");
    writer.node(node);
    writer.out.push_str("}\n");
    writer.out
}

#[derive(Default)]
struct DotWriter {
    out: String,
    next_id: usize,
}

impl DotWriter {
    fn node(&mut self, node: &Node) -> String {
        let id = format!("node{}", self.next_id);
        self.next_id += 1;

        match node {
            Node::Number(value) => self.declare(&id, &format!("Number\\n{}", value), ""),
            Node::Identifier(name) => self.declare(&id, &format!("Identifier\\n{}", name), ""),
            Node::Boolean(value) => self.declare(&id, &format!("Boolean\\n{}", value), ""),
            Node::Unary { op, operand } => {
                self.declare(&id, &format!("UnaryOp\\n{}", op), "");
                self.child(&id, operand, "expr");
            }
            Node::Binary { op, left, right } => {
                self.declare(&id, &format!("BinaryOp\\n{}", op), "");
                self.child(&id, left, "left");
                self.child(&id, right, "right");
            }
            Node::Assign { variable, value } => {
                self.declare(&id, &format!("Assign\\n{}", variable), "");
                self.child(&id, value, "expr");
            }
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.declare(&id, "If", ", shape=diamond");
                self.child(&id, condition, "condition");
                self.child(&id, then_branch, "then");
                if let Some(else_branch) = else_branch {
                    self.child(&id, else_branch, "else");
                }
            }
            Node::Program(statements) => {
                self.declare(&id, "Program", ", shape=ellipse, color=blue");
                for (i, statement) in statements.iter().enumerate() {
                    self.child(&id, statement, &format!("stmt {}", i));
                }
            }
        }

        id
    }

    fn declare(&mut self, id: &str, label: &str, attributes: &str) {
        self.out.push_str(&format!(
            "  {} [label=\"{}\"{}];\n",
            id,
            escape(label),
            attributes
        ));
    }

    fn child(&mut self, parent: &str, child: &Node, label: &str) {
        let child = self.node(child);
        self.out
            .push_str(&format!("  {} -> {} [label=\"{}\"];\n", parent, child, label));
    }
}

// Labels already contain `\n` escapes; only quotes need escaping.
fn escape(label: &str) -> String {
    label.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::{BinaryOp, UnaryOp};

    #[test]
    fn test_assignment() {
        let node = Node::assign(
            "x",
            Node::binary(BinaryOp::Add, Node::Number(3.0), Node::identifier("y")),
        );
        let expected = concat!(
            "digraph AST {\n",
            "  node [shape=box, fontname=\"Arial\", fontsize=10];\n",
            "  edge [fontname=\"Arial\", fontsize=8];\n",
            "\n",
            "  node0 [label=\"Assign\\nx\"];\n",
            "  node1 [label=\"BinaryOp\\n+\"];\n",
            "  node2 [label=\"Number\\n3\"];\n",
            "  node1 -> node2 [label=\"left\"];\n",
            "  node3 [label=\"Identifier\\ny\"];\n",
            "  node1 -> node3 [label=\"right\"];\n",
            "  node0 -> node1 [label=\"expr\"];\n",
            "}\n",
        );
        assert_eq!(render_dot(&node), expected);
    }

    #[test]
    fn test_program_with_if() {
        let program = Node::Program(vec![
            Node::assign("a", Node::Boolean(true)),
            Node::if_else(
                Node::unary(UnaryOp::Not, Node::identifier("a")),
                Node::assign("b", Node::Number(1.0)),
                Some(Node::assign("b", Node::Number(2.5))),
            ),
        ]);
        let dot = render_dot(&program);

        assert!(dot.contains("  node0 [label=\"Program\", shape=ellipse, color=blue];\n"));
        assert!(dot.contains("  node2 [label=\"Boolean\\ntrue\"];\n"));
        assert!(dot.contains("  node3 [label=\"If\", shape=diamond];\n"));
        assert!(dot.contains("  node4 [label=\"UnaryOp\\n!\"];\n"));
        assert!(dot.contains("  node3 -> node4 [label=\"condition\"];\n"));
        assert!(dot.contains("  node3 -> node6 [label=\"then\"];\n"));
        assert!(dot.contains("  node3 -> node8 [label=\"else\"];\n"));
        assert!(dot.contains("  node9 [label=\"Number\\n2.5\"];\n"));
        assert!(dot.contains("  node0 -> node1 [label=\"stmt 0\"];\n"));
        assert!(dot.contains("  node0 -> node3 [label=\"stmt 1\"];\n"));
        assert_eq!(dot.matches(" -> ").count(), 9);
    }

    #[test]
    fn test_if_without_else_has_no_else_edge() {
        let node = Node::if_else(
            Node::identifier("c"),
            Node::assign("d", Node::Number(1.0)),
            None,
        );
        let dot = render_dot(&node);
        assert!(!dot.contains("\"else\""));
        assert_eq!(dot.matches(" -> ").count(), 3);
    }
}
