// src/runtime/evaluator.rs
//! Tree-walking evaluator
//!
//! Evaluation is a total function: malformed operands and literals are
//! reported to the sink and count as `false`, they never abort the walk.

use crate::parser::ast::{LogicalOp, Node};
use crate::runtime::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::runtime::value::{Comparison, Lookup};
use tracing::trace;

/// A `field op literal` operand split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition<'a> {
    pub field: &'a str,
    pub symbol: &'a str,
    /// Literal with single quotes removed
    pub literal: String,
}

impl<'a> Condition<'a> {
    /// Splits on whitespace; anything other than exactly three parts is
    /// malformed.
    pub fn parse(expression: &'a str) -> Option<Self> {
        let mut parts = expression.split_whitespace();
        let (Some(field), Some(symbol), Some(literal), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };

        Some(Self {
            field,
            symbol,
            literal: literal.replace('\'', ""),
        })
    }
}

pub struct Evaluator<S = TracingSink> {
    sink: S,
}

impl Evaluator<TracingSink> {
    pub fn new() -> Self {
        Self { sink: TracingSink }
    }
}

impl Default for Evaluator<TracingSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiagnosticSink> Evaluator<S> {
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Evaluate a tree against a record.
    ///
    /// Walks with an explicit stack of pending right subtrees, so very deep
    /// trees do not grow the call stack.
    pub fn evaluate<L: Lookup + ?Sized>(&self, node: &Node, record: &L) -> bool {
        let mut pending: Vec<(LogicalOp, &Node)> = Vec::new();
        let mut current = node;

        loop {
            // Descend the left spine to the next operand
            let result = loop {
                match current {
                    Node::Operand { expression } => {
                        break self.evaluate_operand(expression, record);
                    }
                    Node::Operator { kind, left, right } => {
                        pending.push((*kind, right.as_ref()));
                        current = left.as_ref();
                    }
                }
            };

            // Unwind until an operator needs its right side
            loop {
                let Some((kind, right)) = pending.pop() else {
                    return result;
                };

                let decided = match kind {
                    LogicalOp::And => !result,
                    LogicalOp::Or => result,
                };
                if !decided {
                    current = right;
                    break;
                }
            }
        }
    }

    /// An absent tree is `false`
    pub fn evaluate_optional<L: Lookup + ?Sized>(&self, node: Option<&Node>, record: &L) -> bool {
        node.is_some_and(|node| self.evaluate(node, record))
    }

    fn evaluate_operand<L: Lookup + ?Sized>(&self, expression: &str, record: &L) -> bool {
        let Some(condition) = Condition::parse(expression.trim()) else {
            self.sink.report(Diagnostic::MalformedOperand {
                expression: expression.to_string(),
            });
            return false;
        };

        let Some(value) = record.lookup(condition.field) else {
            trace!(field = condition.field, "field missing from record");
            return false;
        };

        let comparison = Comparison::from_symbol(condition.symbol);
        match value.compare(comparison, &condition.literal) {
            Ok(result) => result,
            Err(e) => {
                self.sink.report(Diagnostic::InvalidLiteral {
                    field: condition.field.to_string(),
                    literal: condition.literal,
                    reason: e.to_string(),
                });
                false
            }
        }
    }
}
