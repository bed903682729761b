//! # Cohort Rule Language - Abstract Syntax Tree
//!
//! This module defines the syntax tree produced by the parser for cohort
//! rules: the small boolean filter language used to select participant
//! records by age, consent, task status and similar criteria.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Boolean expressions ([`Expr`]) and value terms ([`Term`])
//! - **[operators]** - Comparison and logical operators
//!
//! ## Quick Start
//!
//! ```text
//! ({age} >= 18 and {age} <= 65) or {profile.sexAtBirth} = 'female'
//! ```
//!
//! ## Two Layers
//!
//! The tree has two layers that never mix:
//!
//! - **Expressions** are boolean: comparisons, `and`, `or`, `!`, groups,
//!   and a function call standing alone as a predicate.
//! - **Terms** are values: numbers, strings, booleans, `null`, `{variable}`
//!   references and function calls.
//!
//! A comparison always has exactly one operator and two terms, so
//! `{a} = {b} = {c}` is rejected.
//!
//! ## Precedence
//!
//! `and` binds tighter than `or`; both associate to the left:
//!
//! ```text
//! {a} = 1 or {b} = 2 and {c} = 3      // Or(a = 1, And(b = 2, c = 3))
//! {a} = 1 and {b} = 2 and {c} = 3     // And(And(a = 1, b = 2), c = 3)
//! ```
//!
//! Nodes are plain immutable data and can be shared freely across threads.
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, FunctionCall, Term};
pub use operators::{ComparisonOp, LogicalOp};
pub use tokens::{Token, TokenKind};
