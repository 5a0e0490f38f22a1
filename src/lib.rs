// src/lib.rs
//! # Rule AST Engine
//!
//! Compiles boolean rule expressions such as
//! `( age > 30 AND department = 'Sales' )` into a tree, merges trees, and
//! evaluates them against a data record.
//!
//! AND and OR have no relative precedence: unparenthesised chains are grouped
//! strictly left to right. Use parentheses to group explicitly.
//!
//! ## Example
//!
//! ```rust
//! use rule_ast_engine::{combine, compile, evaluate, Record};
//!
//! let rule1 = compile("( age > 30 AND department = 'Sales' )").unwrap();
//! let rule2 = compile("( salary > 50000 OR experience > 5 )").unwrap();
//! let combined = combine([rule1, rule2]).unwrap();
//!
//! let record = Record::new()
//!     .with_field("age", 35)
//!     .with_field("department", "Sales")
//!     .with_field("salary", 60000)
//!     .with_field("experience", 3);
//!
//! assert!(evaluate(&combined, &record));
//! ```

pub mod compiler;
pub mod parser;
pub mod printer;
pub mod runtime;

use std::sync::Arc;
use thiserror::Error;

pub use compiler::{combine, compile, compile_with, CompileOptions, LeftoverPolicy};
pub use parser::ast::{LogicalOp, Node};
pub use runtime::{
    CollectingSink, Diagnostic, DiagnosticSink, Evaluator, Lookup, Record, TracingSink, Value,
};

/// Errors that can occur while compiling rule text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Unbalanced parentheses or missing operands")]
    UnbalancedParenAndOperands,

    #[error("Rule text produced no expression")]
    NoRuleProduced,

    #[error("{count} subtrees left without a joining operator")]
    DanglingOperands { count: usize },
}

/// Errors from merging rules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombineError {
    #[error("Cannot combine an empty rule set")]
    EmptyRuleSet,
}

/// Errors from building a [`RuleEngine`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Rule {index} failed to compile: {source}")]
    Compile {
        index: usize,
        #[source]
        source: CompileError,
    },

    #[error(transparent)]
    Combine(#[from] CombineError),
}

/// Evaluate a tree, logging diagnostics through `tracing`
pub fn evaluate<L: Lookup + ?Sized>(node: &Node, record: &L) -> bool {
    Evaluator::new().evaluate(node, record)
}

/// A set of rules compiled and merged with AND, ready for evaluation
///
/// Cloning is cheap; clones share the same tree.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    root: Arc<Node>,
    rule_count: usize,
}

impl RuleEngine {
    /// Compile every rule and AND them together in order
    ///
    /// # Example
    ///
    /// ```rust
    /// use rule_ast_engine::{Record, RuleEngine};
    ///
    /// let engine = RuleEngine::from_rules(["age > 30", "department = 'Sales'"]).unwrap();
    /// let record = Record::new().with_field("age", 35).with_field("department", "Sales");
    /// assert!(engine.evaluate(&record));
    /// ```
    pub fn from_rules<I, S>(rules: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_rules_with(rules, &CompileOptions::default())
    }

    pub fn from_rules_with<I, S>(rules: I, options: &CompileOptions) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let nodes = rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| {
                compile_with(rule.as_ref(), options)
                    .map_err(|source| EngineError::Compile { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rule_count = nodes.len();
        let root = combine(nodes)?;

        Ok(Self {
            root: Arc::new(root),
            rule_count,
        })
    }

    /// Wrap an already built tree
    pub fn from_node(node: Node) -> Self {
        Self {
            root: Arc::new(node),
            rule_count: 1,
        }
    }

    pub fn evaluate<L: Lookup + ?Sized>(&self, record: &L) -> bool {
        evaluate(&self.root, record)
    }

    /// Evaluate, sending diagnostics to `sink`
    pub fn evaluate_with<L, S>(&self, record: &L, sink: S) -> bool
    where
        L: Lookup + ?Sized,
        S: DiagnosticSink,
    {
        Evaluator::with_sink(sink).evaluate(&self.root, record)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of rules merged into this engine
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Debug listing of the merged tree
    pub fn render(&self) -> String {
        printer::render(&self.root)
    }
}
