// src/compiler/mod.rs
//! Compiler that turns rule text into trees and merges trees together

pub mod options;

use crate::parser::{self, Node};
use crate::{CombineError, CompileError};
use tracing::debug;

pub use options::{CompileOptions, LeftoverPolicy};

/// Compile rule text with default options
///
/// # Example
///
/// ```rust
/// use rule_ast_engine::compile;
///
/// let node = compile("( age > 30 AND department = 'Sales' )").unwrap();
/// assert_eq!(node.leaf_count(), 2);
/// assert!(!node.is_operand());
/// ```
pub fn compile(rule: &str) -> Result<Node, CompileError> {
    compile_with(rule, &CompileOptions::default())
}

/// Compile rule text with explicit options
pub fn compile_with(rule: &str, options: &CompileOptions) -> Result<Node, CompileError> {
    let result = parser::parse(rule, options);
    match &result {
        Ok(node) => debug!(rule, leaves = node.leaf_count(), "compiled rule"),
        Err(e) => debug!(rule, error = %e, "rule failed to compile"),
    }
    result
}

/// Join rules with AND, folding from the left:
/// `((r1 AND r2) AND r3) ...`
pub fn combine<I>(rules: I) -> Result<Node, CombineError>
where
    I: IntoIterator<Item = Node>,
{
    let mut rules = rules.into_iter();
    let first = rules.next().ok_or(CombineError::EmptyRuleSet)?;
    Ok(rules.fold(first, Node::and))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_single_rule_is_unchanged() {
        let rule = Node::operand("a > 1");
        assert_eq!(combine(vec![rule.clone()]).unwrap(), rule);
    }

    #[test]
    fn test_combine_leans_left() {
        let combined = combine(vec![
            Node::operand("a > 1"),
            Node::operand("b > 2"),
            Node::operand("c > 3"),
        ])
        .unwrap();

        assert_eq!(
            combined,
            Node::and(
                Node::and(Node::operand("a > 1"), Node::operand("b > 2")),
                Node::operand("c > 3")
            )
        );
    }

    #[test]
    fn test_combine_empty() {
        assert_eq!(combine(Vec::new()), Err(CombineError::EmptyRuleSet));
    }

    #[test]
    fn test_compile_with_options() {
        let options = CompileOptions::new().with_leftover(LeftoverPolicy::KeepLast);
        assert_eq!(
            compile_with("a > 1 b > 2 c > 3", &options).unwrap(),
            Node::operand("c > 3")
        );
        assert_eq!(
            compile("a > 1 b > 2 c > 3"),
            Err(CompileError::DanglingOperands { count: 3 })
        );
    }
}
