pub mod ast;
pub mod combine;
pub mod error;
pub mod inspect;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod serializer;
pub mod visitor;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{ComparisonOp, Expr, FunctionCall, LogicalOp, Term, Token, TokenKind};
pub use combine::{combine, combine_rules};
pub use error::{CombineError, LexError, LexErrorKind, ParseError, ParseErrorKind, RuleError};
pub use lexer::{Lexer, tokenize};
pub use output::{to_json, to_json_pretty};
pub use parser::{Parser, ParserOptions, parse, parse_with_options};
pub use serializer::{serialize, serialize_term};
pub use visitor::{ExprVisitor, TermVisitor};
