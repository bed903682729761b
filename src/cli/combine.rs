//! Join rule fragments from the command line

use super::CliError;
use crate::{LogicalOp, ParserOptions, combine_rules, serialize};

/// Options for the combine command
#[derive(Debug, Clone)]
pub struct CombineOptions {
    /// Fragments to join, blank ones are skipped
    pub fragments: Vec<String>,
    /// Connective placed between fragments
    pub op: LogicalOp,
    /// Parser configuration applied to every fragment
    pub parser: ParserOptions,
}

/// Parse every fragment, join them and return the canonical text
pub fn execute_combine(options: &CombineOptions) -> Result<String, CliError> {
    let fragments: Vec<&str> = options.fragments.iter().map(String::as_str).collect();
    let expr = combine_rules(&fragments, options.op, &options.parser)?;
    Ok(serialize(&expr))
}
