//! Validate, format and inspect a single rule

use super::CliError;
use crate::{ParserOptions, inspect::referenced_variables, output::to_json, parse_with_options, serialize};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The rule text
    pub rule: String,
    /// Return the syntax tree instead of a plain verdict
    pub ast: bool,
    /// Parser configuration
    pub parser: ParserOptions,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// The rule parsed successfully
    SyntaxValid,
    /// The rule's syntax tree as JSON
    Ast(serde_json::Value),
}

fn require_rule(rule: &str) -> Result<&str, CliError> {
    if rule.trim().is_empty() {
        return Err(CliError::NoInput);
    }
    Ok(rule)
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let rule = require_rule(&options.rule)?;
    let expr = parse_with_options(rule, &options.parser)?;

    if options.ast {
        Ok(CheckResult::Ast(to_json(&expr)))
    } else {
        Ok(CheckResult::SyntaxValid)
    }
}

/// Parse a rule and print it back in canonical form
pub fn execute_format(rule: &str, parser: &ParserOptions) -> Result<String, CliError> {
    let expr = parse_with_options(require_rule(rule)?, parser)?;
    Ok(serialize(&expr))
}

/// List the variable paths a rule refers to
pub fn execute_vars(rule: &str, parser: &ParserOptions) -> Result<Vec<String>, CliError> {
    let expr = parse_with_options(require_rule(rule)?, parser)?;
    Ok(referenced_variables(&expr))
}
