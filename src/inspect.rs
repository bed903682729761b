//! Read-only queries over a parsed rule.
//!
//! The parser never checks that variables or functions exist. These
//! helpers list what a rule refers to so a validator that knows the record
//! schema can do that check.

use std::collections::HashSet;

use crate::{
    ast::{ComparisonOp, Expr, FunctionCall, LogicalOp, Term},
    visitor::{ExprVisitor, TermVisitor},
};

/// Variable paths in first-seen order, without duplicates.
///
/// # Examples
///
/// ```
/// use cohort_rule::{parse, inspect::referenced_variables};
///
/// let expr = parse("{age} >= 18 and {age} <= lower({profile.maxAge})").unwrap();
/// assert_eq!(referenced_variables(&expr), vec!["age", "profile.maxAge"]);
/// ```
pub fn referenced_variables(expr: &Expr) -> Vec<String> {
    let mut collector = References::default();
    expr.accept(&mut collector);
    collector.variables.names
}

/// Function names in first-seen order, without duplicates.
pub fn referenced_functions(expr: &Expr) -> Vec<String> {
    let mut collector = References::default();
    expr.accept(&mut collector);
    collector.functions.names
}

/// Names in first-seen order, deduplicated.
#[derive(Default)]
struct Ordered {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl Ordered {
    fn insert(&mut self, name: &str) {
        if !self.seen.contains(name) {
            self.seen.insert(name.to_string());
            self.names.push(name.to_string());
        }
    }
}

#[derive(Default)]
struct References {
    variables: Ordered,
    functions: Ordered,
}

impl References {
    fn chain(&mut self, op: LogicalOp, left: &Expr, right: &Expr) {
        for operand in left.chain_operands(op) {
            operand.accept(self);
        }
        right.accept(self);
    }
}

impl ExprVisitor for References {
    type Output = ();

    fn visit_comparison(&mut self, left: &Term, _op: ComparisonOp, right: &Term) {
        left.accept(self);
        right.accept(self);
    }

    fn visit_and(&mut self, left: &Expr, right: &Expr) {
        self.chain(LogicalOp::And, left, right);
    }

    fn visit_or(&mut self, left: &Expr, right: &Expr) {
        self.chain(LogicalOp::Or, left, right);
    }

    fn visit_not(&mut self, inner: &Expr) {
        inner.accept(self);
    }

    fn visit_predicate(&mut self, call: &FunctionCall) {
        self.visit_function(call);
    }
}

impl TermVisitor for References {
    type Output = ();

    fn visit_number(&mut self, _value: f64) {}

    fn visit_string(&mut self, _value: &str) {}

    fn visit_boolean(&mut self, _value: bool) {}

    fn visit_null(&mut self) {}

    fn visit_variable(&mut self, path: &str) {
        self.variables.insert(path);
    }

    fn visit_function(&mut self, call: &FunctionCall) {
        self.functions.insert(call.name());
        for arg in call.args() {
            arg.accept(self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_collects_through_every_node_kind() {
        let expr = parse(
            "!({enrollee.consented} = true) or include({family.shortcode}) \
             and max({a}, min({b}, {a})) > 3",
        )
        .unwrap();
        assert_eq!(
            referenced_variables(&expr),
            vec!["enrollee.consented", "family.shortcode", "a", "b"]
        );
        assert_eq!(referenced_functions(&expr), vec!["include", "max", "min"]);
    }

    #[test]
    fn test_literals_only() {
        let expr = parse("1 = 1").unwrap();
        assert!(referenced_variables(&expr).is_empty());
        assert!(referenced_functions(&expr).is_empty());
    }
}
