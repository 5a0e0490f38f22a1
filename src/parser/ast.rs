// src/parser/ast.rs
//! Abstract Syntax Tree definitions for rule expressions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;

/// Logical connective joining two subtrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    /// Keyword as written in rule text
    pub fn keyword(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A node of the rule tree.
///
/// Trees are built by the compiler (or by [`crate::combine`]) and never
/// mutated afterwards. Each operator exclusively owns its two children.
///
/// Counting, equality, rendering and drop walk the tree with an explicit
/// stack, so arbitrarily long chains are safe. `Clone`, `Debug` and
/// serialization still recurse.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Leaf holding one unparsed comparison, e.g. `age > 30`
    Operand { expression: String },

    /// AND / OR over two subtrees
    Operator {
        kind: LogicalOp,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn operand(expression: impl Into<String>) -> Self {
        Node::Operand {
            expression: expression.into(),
        }
    }

    pub fn operator(kind: LogicalOp, left: Node, right: Node) -> Self {
        Node::Operator {
            kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Node, right: Node) -> Self {
        Self::operator(LogicalOp::And, left, right)
    }

    pub fn or(left: Node, right: Node) -> Self {
        Self::operator(LogicalOp::Or, left, right)
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Node::Operand { .. })
    }

    /// Every node in pre-order: parent, then left subtree, then right
    pub fn iter(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Number of comparison leaves
    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|node| node.is_operand()).count()
    }

    /// Number of AND/OR nodes
    pub fn operator_count(&self) -> usize {
        self.iter().filter(|node| !node.is_operand()).count()
    }

    /// Height of the tree; a single operand has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];

        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            if let Node::Operator { left, right, .. } = node {
                stack.push((right.as_ref(), level + 1));
                stack.push((left.as_ref(), level + 1));
            }
        }

        deepest
    }

    /// Operand expressions in pre-order (left to right as written)
    pub fn operands(&self) -> Vec<&str> {
        self.iter()
            .filter_map(|node| match node {
                Node::Operand { expression } => Some(expression.as_str()),
                Node::Operator { .. } => None,
            })
            .collect()
    }

    /// Move operator children out so they are dropped from `pending`
    /// instead of recursively.
    fn detach_children(&mut self, pending: &mut Vec<Node>) {
        if let Node::Operator { left, right, .. } = self {
            for child in [left, right] {
                if !child.is_operand() {
                    pending.push(mem::replace(&mut **child, Node::operand(String::new())));
                }
            }
        }
    }
}

/// Pre-order iterator over a tree, see [`Node::iter`]
pub struct Preorder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Operator { left, right, .. } = node {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(node)
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);

        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];

        while let Some(pair) = pairs.pop() {
            match pair {
                (Node::Operand { expression: a }, Node::Operand { expression: b }) => {
                    if a != b {
                        return false;
                    }
                }
                (
                    Node::Operator {
                        kind: kind_a,
                        left: left_a,
                        right: right_a,
                    },
                    Node::Operator {
                        kind: kind_b,
                        left: left_b,
                        right: right_b,
                    },
                ) => {
                    if kind_a != kind_b {
                        return false;
                    }
                    pairs.push((right_a.as_ref(), right_b.as_ref()));
                    pairs.push((left_a.as_ref(), left_b.as_ref()));
                }
                _ => return false,
            }
        }

        true
    }
}

/// Renders the tree back to rule text, fully parenthesised.
///
/// The output compiles back into an equal tree as long as every operand
/// was produced by the compiler.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a> {
            Node(&'a Node),
            Op(LogicalOp),
            Close,
        }

        let mut pieces = vec![Piece::Node(self)];
        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Node(Node::Operand { expression }) => f.write_str(expression)?,
                Piece::Node(Node::Operator { kind, left, right }) => {
                    f.write_str("( ")?;
                    pieces.push(Piece::Close);
                    pieces.push(Piece::Node(right));
                    pieces.push(Piece::Op(*kind));
                    pieces.push(Piece::Node(left));
                }
                Piece::Op(kind) => write!(f, " {} ", kind)?,
                Piece::Close => f.write_str(" )")?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::and(
            Node::or(Node::operand("a > 1"), Node::operand("b < 2")),
            Node::operand("c = 'x'"),
        )
    }

    #[test]
    fn test_counts() {
        let node = sample();
        assert_eq!(node.leaf_count(), 3);
        assert_eq!(node.operator_count(), 2);
        assert_eq!(node.depth(), 3);
        assert!(!node.is_operand());
    }

    #[test]
    fn test_operands_in_order() {
        assert_eq!(sample().operands(), vec!["a > 1", "b < 2", "c = 'x'"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "( ( a > 1 OR b < 2 ) AND c = 'x' )"
        );
    }

    #[test]
    fn test_preorder_iter() {
        let kinds: Vec<bool> = sample().iter().map(Node::is_operand).collect();
        assert_eq!(kinds, vec![false, false, true, true, true]);
    }

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(sample(), sample());
        assert_ne!(
            Node::and(Node::operand("a > 1"), Node::operand("b < 2")),
            Node::or(Node::operand("a > 1"), Node::operand("b < 2"))
        );
        assert_ne!(
            Node::and(Node::operand("a > 1"), Node::operand("b < 2")),
            Node::and(Node::operand("a > 1"), Node::operand("b < 3"))
        );
        assert_ne!(sample(), Node::operand("a > 1"));
    }

    #[test]
    fn test_long_left_spine() {
        let n = 200_000;
        let chain = (1..n).fold(Node::operand("x = 0"), |acc, i| {
            Node::and(acc, Node::operand(format!("x = {}", i)))
        });

        assert_eq!(chain.leaf_count(), n);
        assert_eq!(chain.operator_count(), n - 1);
        assert_eq!(chain.depth(), n);
        assert_eq!(chain.operands().last(), Some(&"x = 199999"));
        assert!(chain.to_string().starts_with("( ( ( x = 0 AND x = 1 )"));

        let other = (1..n).fold(Node::operand("x = 0"), |acc, i| {
            Node::and(acc, Node::operand(format!("x = {}", i)))
        });
        assert_eq!(chain, other);
    }

    #[test]
    fn test_long_right_spine() {
        let chain = (0..200_000).fold(Node::operand("x = 0"), |acc, _| {
            Node::or(Node::operand("y = 1"), acc)
        });
        assert_eq!(chain.depth(), 200_001);
        drop(chain);
    }

    #[test]
    fn test_serialization() {
        let node = Node::or(Node::operand("a > 1"), Node::operand("b < 2"));
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains(r#""type":"operator""#));
        assert!(json.contains(r#""kind":"OR""#));

        let decoded: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, node);
    }
}
