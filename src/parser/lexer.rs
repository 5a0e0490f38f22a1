// src/parser/lexer.rs
//! Lexical analyzer (tokenizer) for rule expressions
//!
//! The rule language has four token classes, tried in this order at every
//! position: `(`, `)`, a condition (`field op literal`) and the `AND`/`OR`
//! keywords. Anything else is skipped one character at a time.

use super::ast::LogicalOp;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LeftParen,
    RightParen,

    /// Raw comparison text, e.g. `age > 30`
    Condition(String),

    Operator(LogicalOp),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LeftParen => write!(f, "'('"),
            Token::RightParen => write!(f, "')'"),
            Token::Condition(s) => write!(f, "condition '{}'", s),
            Token::Operator(op) => write!(f, "operator {}", op),
        }
    }
}

/// Token together with the character span it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub span: Range<usize>,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Next recognized token, or `None` at end of input.
    ///
    /// Never fails: unrecognized characters are skipped.
    pub fn next_token(&mut self) -> Option<Spanned> {
        while !self.is_at_end() {
            let start = self.position;

            let (token, end) = match self.input[start] {
                '(' => (Token::LeftParen, start + 1),
                ')' => (Token::RightParen, start + 1),
                _ => {
                    if let Some(span) = match_condition(&self.input, start) {
                        let text: String = self.input[span.clone()].iter().collect();
                        (Token::Condition(text), span.end)
                    } else if let Some((op, span)) = match_keyword(&self.input, start) {
                        (Token::Operator(op), span.end)
                    } else {
                        self.position += 1;
                        continue;
                    }
                }
            };

            self.position = end;
            return Some(Spanned {
                token,
                span: start..end,
            });
        }

        None
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

impl Iterator for Lexer {
    type Item = Spanned;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[inline]
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[inline]
fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

#[inline]
fn is_comparison_symbol(ch: char) -> bool {
    matches!(ch, '>' | '<' | '=')
}

/// True when a word starts at `pos`: the previous character is not a word
/// character.
fn at_word_start(input: &[char], pos: usize) -> bool {
    pos == 0 || !is_word_char(input[pos - 1])
}

fn skip_while(input: &[char], mut pos: usize, pred: impl Fn(char) -> bool) -> usize {
    while pos < input.len() && pred(input[pos]) {
        pos += 1;
    }
    pos
}

/// Matches `\b\w+\s*[><=]\s*\S+` anchored at `start`.
pub fn match_condition(input: &[char], start: usize) -> Option<Range<usize>> {
    if start >= input.len() || !at_word_start(input, start) {
        return None;
    }

    let field_end = skip_while(input, start, is_word_char);
    if field_end == start {
        return None;
    }

    let symbol = skip_while(input, field_end, is_space);
    if symbol >= input.len() || !is_comparison_symbol(input[symbol]) {
        return None;
    }

    let literal_start = skip_while(input, symbol + 1, is_space);
    let literal_end = skip_while(input, literal_start, |c| !is_space(c));
    if literal_end == literal_start {
        return None;
    }

    Some(start..literal_end)
}

/// Matches the word-bounded keywords `AND` / `OR` anchored at `start`.
pub fn match_keyword(input: &[char], start: usize) -> Option<(LogicalOp, Range<usize>)> {
    if !at_word_start(input, start) {
        return None;
    }

    [LogicalOp::And, LogicalOp::Or].into_iter().find_map(|op| {
        let end = start + op.keyword().len();
        if end > input.len() {
            return None;
        }
        let matches = input[start..end].iter().copied().eq(op.keyword().chars());
        let bounded = end == input.len() || !is_word_char(input[end]);
        (matches && bounded).then_some((op, start..end))
    })
}
