// src/parser/mod.rs
//! Parser for rule expressions
//!
//! Converts rule text into a tree of [`Node`]s

pub mod ast;
pub mod lexer;
pub mod parser;

use crate::compiler::options::CompileOptions;
use crate::CompileError;
pub use ast::{LogicalOp, Node};

/// Parse rule text into a tree
pub fn parse(source: &str, options: &CompileOptions) -> Result<Node, CompileError> {
    parser::Parser::new(source, options).parse()
}
