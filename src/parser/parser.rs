// src/parser/parser.rs
//! Two-stack operator-precedence parser that turns tokens into a rule tree
//!
//! AND and OR carry no relative precedence: an incoming operator reduces
//! everything pending back to the nearest `(`, so unparenthesised chains
//! group strictly left to right.

use super::ast::{LogicalOp, Node};
use super::lexer::{Lexer, Token};
use crate::compiler::options::{CompileOptions, LeftoverPolicy};
use crate::CompileError;
use tracing::debug;

/// Entry on the operator stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Group,
    Op(LogicalOp),
}

pub struct Parser<'o> {
    lexer: Lexer,
    options: &'o CompileOptions,
    operands: Vec<Node>,
    operators: Vec<Pending>,
}

impl<'o> Parser<'o> {
    pub fn new(input: &str, options: &'o CompileOptions) -> Self {
        Self {
            lexer: Lexer::new(input),
            options,
            operands: Vec::new(),
            operators: Vec::new(),
        }
    }

    pub fn parse(mut self) -> Result<Node, CompileError> {
        while let Some(spanned) = self.lexer.next_token() {
            match spanned.token {
                Token::LeftParen => self.operators.push(Pending::Group),
                Token::RightParen => self.close_group()?,
                Token::Condition(text) => self.operands.push(Node::operand(text)),
                Token::Operator(op) => {
                    while let Some(&Pending::Op(pending)) = self.operators.last() {
                        self.operators.pop();
                        self.reduce(pending)?;
                    }
                    self.operators.push(Pending::Op(op));
                }
            }
        }

        while let Some(pending) = self.operators.pop() {
            match pending {
                Pending::Op(op) => self.reduce(op)?,
                Pending::Group => return Err(CompileError::UnbalancedParenAndOperands),
            }
        }

        self.finish()
    }

    /// Reduces back to the matching `(` and discards it.
    fn close_group(&mut self) -> Result<(), CompileError> {
        loop {
            match self.operators.pop() {
                Some(Pending::Op(op)) => self.reduce(op)?,
                Some(Pending::Group) => return Ok(()),
                None => return Err(CompileError::UnbalancedParenAndOperands),
            }
        }
    }

    /// Pops two subtrees and joins them under `op`.
    fn reduce(&mut self, op: LogicalOp) -> Result<(), CompileError> {
        if let (Some(right), Some(left)) = (self.operands.pop(), self.operands.pop()) {
            self.operands.push(Node::operator(op, left, right));
            return Ok(());
        }

        debug!(operator = %op, "not enough operands to reduce");
        Err(CompileError::UnbalancedParenAndOperands)
    }

    fn finish(mut self) -> Result<Node, CompileError> {
        match self.operands.len() {
            0 => Err(CompileError::NoRuleProduced),
            1 => self.operands.pop().ok_or(CompileError::NoRuleProduced),
            count => match self.options.leftover {
                LeftoverPolicy::Reject => Err(CompileError::DanglingOperands { count }),
                LeftoverPolicy::KeepLast => {
                    debug!(discarded = count - 1, "keeping last subtree, discarding the rest");
                    self.operands.pop().ok_or(CompileError::NoRuleProduced)
                }
            },
        }
    }
}
