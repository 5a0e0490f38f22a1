// src/printer.rs
//! Debug listing of a rule tree
//!
//! One line per node in pre-order, `operator: AND` or `operand: age > 30`,
//! indented two spaces per level.

use crate::parser::ast::Node;
use std::fmt::Write as _;
use std::io;

pub fn render(node: &Node) -> String {
    let mut out = String::new();
    let mut stack = vec![(node, 0)];

    while let Some((node, depth)) = stack.pop() {
        for _ in 0..depth {
            out.push_str("  ");
        }

        // Writing to a String cannot fail
        let _ = match node {
            Node::Operand { expression } => writeln!(out, "operand: {}", expression),
            Node::Operator { kind, .. } => writeln!(out, "operator: {}", kind),
        };

        if let Node::Operator { left, right, .. } = node {
            stack.push((right.as_ref(), depth + 1));
            stack.push((left.as_ref(), depth + 1));
        }
    }

    out
}

/// Write the listing to `writer`
pub fn print_ast<W: io::Write>(node: &Node, writer: &mut W) -> io::Result<()> {
    writer.write_all(render(node).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let node = Node::and(
            Node::and(Node::operand("age > 30"), Node::operand("department = 'Sales'")),
            Node::operand("salary > 50000"),
        );

        let expected = "\
operator: AND
  operator: AND
    operand: age > 30
    operand: department = 'Sales'
  operand: salary > 50000
";
        assert_eq!(render(&node), expected);
    }

    #[test]
    fn test_print_ast() {
        let mut buf = Vec::new();
        print_ast(&Node::operand("a = 1"), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "operand: a = 1\n");
    }

    #[test]
    fn test_render_deep_chain() {
        let chain = (0..2_000).fold(Node::operand("a = 1"), |acc, _| {
            Node::and(acc, Node::operand("b = 2"))
        });

        let listing = render(&chain);
        assert_eq!(listing.lines().count(), 4_001);
        assert!(listing.starts_with("operator: AND\n  operator: AND\n"));
        assert!(listing.ends_with("\n  operand: b = 2\n"));
    }
}
