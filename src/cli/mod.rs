//! CLI support for cohort-rule
//!
//! Provides programmatic access to the `cohort-rule` command so rule
//! checking can be embedded in other tools and tested without spawning a
//! process.

mod check;
mod combine;
mod docs;
pub mod logger;

pub use check::{CheckOptions, CheckResult, execute_check, execute_format, execute_vars};
pub use combine::{CombineOptions, execute_combine};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

use crate::RuleError;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Rule failed to lex, parse or combine
    #[error("{0}")]
    Rule(#[from] RuleError),
    /// JSON rendering error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// No rule provided
    #[error("No rule provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,
    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'cohort-rule docs' to see available categories.")]
    UnknownCategory(String),
}
