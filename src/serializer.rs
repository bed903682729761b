//! Printing parsed rules back to source text.
//!
//! The output is canonical: single spaces around operators, lowercase
//! keywords, single-quoted strings and `{path}` variables. For any parsed
//! rule `E`, `parse(serialize(&parse(E)?))` equals `parse(E)`.
//!
//! Trees built by hand (for example by [`combine`](crate::combine)) may
//! nest an `or` under an `and` without a [`Expr::Grouped`] node. The
//! printer adds the parentheses such a tree needs to keep its meaning;
//! re-parsing then yields the same tree with those groups made explicit.
//!
//! # Examples
//!
//! ```
//! use cohort_rule::{parse, serialize};
//!
//! let expr = parse("({age}>=18 and {age}<=65)or {profile.sexAtBirth}=\"female\"").unwrap();
//! assert_eq!(
//!     serialize(&expr),
//!     "({age} >= 18 and {age} <= 65) or {profile.sexAtBirth} = 'female'"
//! );
//! ```

use std::fmt;

use crate::{
    ast::{ComparisonOp, Expr, FunctionCall, LogicalOp, Term},
    visitor::{ExprVisitor, TermVisitor},
};

pub fn serialize(expr: &Expr) -> String {
    expr.accept(&mut Printer)
}

pub fn serialize_term(term: &Term) -> String {
    term.accept(&mut Printer)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize_term(self))
    }
}

/// Binding strength: `or` < `and` < everything else.
fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Or { .. } => 1,
        Expr::And { .. } => 2,
        _ => 3,
    }
}

fn escape_string(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '\'' => vec!['\\', '\''],
            '\\' => vec!['\\', '\\'],
            '\n' => vec!['\\', 'n'],
            '\r' => vec!['\\', 'r'],
            '\t' => vec!['\\', 't'],
            c => vec![c],
        })
        .collect()
}

struct Printer;

impl Printer {
    fn operand(&mut self, expr: &Expr, parenthesize: bool) -> String {
        let text = expr.accept(self);
        if parenthesize {
            format!("({})", text)
        } else {
            text
        }
    }

    /// Prints a whole left-nested chain in one loop. Chains nest to the
    /// left, so any later operand at the same level needs parentheses to
    /// keep its shape.
    fn chain(&mut self, op: LogicalOp, left: &Expr, right: &Expr) -> String {
        let level = match op {
            LogicalOp::And => 2,
            LogicalOp::Or => 1,
        };
        let mut operands = left.chain_operands(op);
        operands.push(right);

        let mut parts = Vec::with_capacity(operands.len());
        for (i, operand) in operands.into_iter().enumerate() {
            let parenthesize = if i == 0 {
                precedence(operand) < level
            } else {
                precedence(operand) <= level
            };
            parts.push(self.operand(operand, parenthesize));
        }
        parts.join(format!(" {} ", op).as_str())
    }
}

impl ExprVisitor for Printer {
    type Output = String;

    fn visit_comparison(&mut self, left: &Term, op: ComparisonOp, right: &Term) -> String {
        format!("{} {} {}", left.accept(self), op, right.accept(self))
    }

    fn visit_and(&mut self, left: &Expr, right: &Expr) -> String {
        self.chain(LogicalOp::And, left, right)
    }

    fn visit_or(&mut self, left: &Expr, right: &Expr) -> String {
        self.chain(LogicalOp::Or, left, right)
    }

    fn visit_not(&mut self, inner: &Expr) -> String {
        let inner = self.operand(inner, precedence(inner) < 3);
        format!("!{}", inner)
    }

    fn visit_predicate(&mut self, call: &FunctionCall) -> String {
        self.visit_function(call)
    }

    fn visit_grouped(&mut self, inner: &Expr) -> String {
        format!("({})", inner.accept(self))
    }
}

impl TermVisitor for Printer {
    type Output = String;

    /// Non-finite numbers have no literal form and print as `null`.
    fn visit_number(&mut self, value: f64) -> String {
        if value.is_finite() {
            value.to_string()
        } else {
            "null".to_string()
        }
    }

    fn visit_string(&mut self, value: &str) -> String {
        format!("'{}'", escape_string(value))
    }

    fn visit_boolean(&mut self, value: bool) -> String {
        value.to_string()
    }

    fn visit_null(&mut self) -> String {
        "null".to_string()
    }

    fn visit_variable(&mut self, path: &str) -> String {
        format!("{{{}}}", path)
    }

    fn visit_function(&mut self, call: &FunctionCall) -> String {
        let args: Vec<String> = call.args().iter().map(|arg| arg.accept(self)).collect();
        format!("{}({})", call.name(), args.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn var_eq(path: &str, n: f64) -> Expr {
        Expr::comparison(Term::variable(path), ComparisonOp::Equal, Term::Number(n))
    }

    #[test]
    fn test_canonical_spacing() {
        let expr = parse("{a}=1 and({b}!=2or!{c}<=3)").unwrap();
        assert_eq!(serialize(&expr), "{a} = 1 and ({b} != 2 or !{c} <= 3)");
    }

    #[test]
    fn test_string_escapes() {
        let expr = parse(r#"{name} = "it's a \\ test""#).unwrap();
        assert_eq!(serialize(&expr), r"{name} = 'it\'s a \\ test'");
    }

    #[test]
    fn test_numbers_print_shortest_form() {
        assert_eq!(serialize_term(&Term::Number(18.0)), "18");
        assert_eq!(serialize_term(&Term::Number(2.5)), "2.5");
        assert_eq!(serialize_term(&Term::Number(-0.25)), "-0.25");
        assert_eq!(serialize_term(&Term::Number(f64::NAN)), "null");
    }

    #[test]
    fn test_or_under_and_gets_parentheses() {
        let expr = Expr::and(Expr::or(var_eq("a", 1.0), var_eq("b", 2.0)), var_eq("c", 3.0));
        assert_eq!(serialize(&expr), "({a} = 1 or {b} = 2) and {c} = 3");
    }

    #[test]
    fn test_right_nested_chain_gets_parentheses() {
        let expr = Expr::and(var_eq("a", 1.0), Expr::and(var_eq("b", 2.0), var_eq("c", 3.0)));
        assert_eq!(serialize(&expr), "{a} = 1 and ({b} = 2 and {c} = 3)");

        let expr = Expr::or(var_eq("a", 1.0), Expr::and(var_eq("b", 2.0), var_eq("c", 3.0)));
        assert_eq!(serialize(&expr), "{a} = 1 or {b} = 2 and {c} = 3");
    }

    #[test]
    fn test_not_over_binary_gets_parentheses() {
        let expr = Expr::not(Expr::or(var_eq("a", 1.0), var_eq("b", 2.0)));
        assert_eq!(serialize(&expr), "!({a} = 1 or {b} = 2)");
    }

    #[test]
    fn test_display_matches_serialize() {
        let expr = parse("include({family.shortcode})").unwrap();
        assert_eq!(expr.to_string(), "include({family.shortcode})");
    }
}
