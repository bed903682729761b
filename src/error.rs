//! Error types for lexing, parsing and combining rules.
//!
//! Every error carries the character offset where it was detected. Nothing
//! is recovered: a rule that fails to lex or parse must not be stored or
//! evaluated.

use std::fmt;

use thiserror::Error;

use crate::ast::{LogicalOp, TokenKind};

/// Reason a character sequence could not be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("invalid variable path '{0}'")]
    InvalidVariable(String),
    #[error("unterminated variable reference")]
    UnterminatedVariable,
    #[error("identifier '{0}' is not a keyword or a function call")]
    BareIdentifier(String),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset} (found {found:?})")]
pub struct LexError {
    pub offset: usize,
    pub found: char,
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(kind: LexErrorKind, offset: usize, found: char) -> Self {
        LexError {
            offset,
            found,
            kind,
        }
    }
}

/// Reason a token stream could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("empty rule")]
    EmptyInput,
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("unclosed '(' opened at offset {open_offset}")]
    UnclosedParen { open_offset: usize },
    #[error("function '{function}' called without arguments")]
    EmptyArguments { function: String },
    #[error("rule nested deeper than {limit} levels")]
    DepthExceeded { limit: usize },
    #[error("unexpected input after a complete expression")]
    TrailingTokens,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub struct ParseError {
    pub offset: usize,
    pub expected: Vec<TokenKind>,
    pub found: TokenKind,
    pub text: String,
    pub kind: ParseErrorKind,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.offset)?;
        if !self.expected.is_empty() {
            write!(f, ": expected {}", describe_expected(&self.expected))?;
        }
        if self.text.is_empty() {
            write!(f, ", found {}", self.found)
        } else {
            write!(f, ", found {} '{}'", self.found, self.text)
        }
    }
}

fn describe_expected(expected: &[TokenKind]) -> String {
    match expected {
        [only] => only.to_string(),
        many => {
            let names: Vec<String> = many.iter().map(|k| k.to_string()).collect();
            format!("one of {}", names.join(", "))
        }
    }
}

/// Failure to join rule fragments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombineError {
    /// There is no neutral element to return for an empty list.
    #[error("cannot combine an empty list of expressions with '{op}'")]
    NoExpressions { op: LogicalOp },
}

/// Any error produced while turning rule text into an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Combine(#[from] CombineError),
}

impl RuleError {
    /// Source offset of the failure, when there is one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            RuleError::Lex(e) => Some(e.offset),
            RuleError::Parse(e) => Some(e.offset),
            RuleError::Combine(_) => None,
        }
    }
}
