//! Generic traversal of parsed rules.
//!
//! Consumers such as printers, evaluators and query translators implement
//! [`ExprVisitor`] and [`TermVisitor`] and hand themselves to
//! [`Expr::accept`] / [`Term::accept`]. Dispatch is an exhaustive `match`,
//! so adding a node kind breaks every consumer at compile time instead of
//! silently falling through.
//!
//! `and`/`or` chains are left-nested and can be as long as the input.
//! Visitors that recurse into `left` use one stack frame per operand;
//! walk [`Expr::chain_operands`] instead, as the printer does.
//!
//! # Examples
//!
//! ```
//! use cohort_rule::{parse, ComparisonOp, Expr, ExprVisitor, FunctionCall, Term};
//!
//! /// Counts the comparisons in a rule.
//! struct Comparisons;
//!
//! impl ExprVisitor for Comparisons {
//!     type Output = usize;
//!
//!     fn visit_comparison(&mut self, _: &Term, _: ComparisonOp, _: &Term) -> usize {
//!         1
//!     }
//!     fn visit_and(&mut self, left: &Expr, right: &Expr) -> usize {
//!         left.accept(self) + right.accept(self)
//!     }
//!     fn visit_or(&mut self, left: &Expr, right: &Expr) -> usize {
//!         left.accept(self) + right.accept(self)
//!     }
//!     fn visit_not(&mut self, inner: &Expr) -> usize {
//!         inner.accept(self)
//!     }
//!     fn visit_predicate(&mut self, _: &FunctionCall) -> usize {
//!         0
//!     }
//! }
//!
//! let expr = parse("({age} >= 18 and {age} <= 65) or include({family.shortcode})").unwrap();
//! assert_eq!(expr.accept(&mut Comparisons), 2);
//! ```

use crate::ast::{ComparisonOp, Expr, FunctionCall, Term};

/// Visitor over the boolean layer of a rule.
pub trait ExprVisitor {
    type Output;

    fn visit_comparison(&mut self, left: &Term, op: ComparisonOp, right: &Term) -> Self::Output;

    fn visit_and(&mut self, left: &Expr, right: &Expr) -> Self::Output;

    fn visit_or(&mut self, left: &Expr, right: &Expr) -> Self::Output;

    fn visit_not(&mut self, inner: &Expr) -> Self::Output;

    fn visit_predicate(&mut self, call: &FunctionCall) -> Self::Output;

    /// Parentheses carry no meaning, so by default the group is transparent.
    fn visit_grouped(&mut self, inner: &Expr) -> Self::Output {
        inner.accept(self)
    }
}

/// Visitor over the value layer of a rule.
pub trait TermVisitor {
    type Output;

    fn visit_number(&mut self, value: f64) -> Self::Output;

    fn visit_string(&mut self, value: &str) -> Self::Output;

    fn visit_boolean(&mut self, value: bool) -> Self::Output;

    fn visit_null(&mut self) -> Self::Output;

    fn visit_variable(&mut self, path: &str) -> Self::Output;

    fn visit_function(&mut self, call: &FunctionCall) -> Self::Output;
}

impl Expr {
    pub fn accept<V: ExprVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Comparison { left, op, right } => visitor.visit_comparison(left, *op, right),
            Expr::And { left, right } => visitor.visit_and(left, right),
            Expr::Or { left, right } => visitor.visit_or(left, right),
            Expr::Grouped(inner) => visitor.visit_grouped(inner),
            Expr::Not(inner) => visitor.visit_not(inner),
            Expr::Predicate(call) => visitor.visit_predicate(call),
        }
    }
}

impl Term {
    pub fn accept<V: TermVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Term::Number(n) => visitor.visit_number(*n),
            Term::String(s) => visitor.visit_string(s),
            Term::Boolean(b) => visitor.visit_boolean(*b),
            Term::Null => visitor.visit_null(),
            Term::Variable(path) => visitor.visit_variable(path),
            Term::Function(call) => visitor.visit_function(call),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    /// Records the order in which nodes are visited.
    #[derive(Default)]
    struct Trace {
        events: Vec<String>,
    }

    impl ExprVisitor for Trace {
        type Output = ();

        fn visit_comparison(&mut self, left: &Term, op: ComparisonOp, right: &Term) {
            left.accept(self);
            self.events.push(op.to_string());
            right.accept(self);
        }
        fn visit_and(&mut self, left: &Expr, right: &Expr) {
            left.accept(self);
            self.events.push("and".into());
            right.accept(self);
        }
        fn visit_or(&mut self, left: &Expr, right: &Expr) {
            left.accept(self);
            self.events.push("or".into());
            right.accept(self);
        }
        fn visit_not(&mut self, inner: &Expr) {
            self.events.push("not".into());
            inner.accept(self);
        }
        fn visit_predicate(&mut self, call: &FunctionCall) {
            self.visit_function(call);
        }
    }

    impl TermVisitor for Trace {
        type Output = ();

        fn visit_number(&mut self, value: f64) {
            self.events.push(value.to_string());
        }
        fn visit_string(&mut self, value: &str) {
            self.events.push(format!("'{}'", value));
        }
        fn visit_boolean(&mut self, value: bool) {
            self.events.push(value.to_string());
        }
        fn visit_null(&mut self) {
            self.events.push("null".into());
        }
        fn visit_variable(&mut self, path: &str) {
            self.events.push(format!("{{{}}}", path));
        }
        fn visit_function(&mut self, call: &FunctionCall) {
            self.events.push(format!("{}/{}", call.name(), call.args().len()));
            for arg in call.args() {
                arg.accept(self);
            }
        }
    }

    #[test]
    fn test_dispatch_reaches_every_node_in_order() {
        let expr = parse("!({a} = 1 or {b} contains 'x') and max({c}, 2) > null").unwrap();
        let mut trace = Trace::default();
        expr.accept(&mut trace);
        assert_eq!(
            trace.events,
            vec![
                "not", "{a}", "=", "1", "or", "{b}", "contains", "'x'", "and", "max/2", "{c}",
                "2", ">", "null",
            ]
        );
    }

    #[test]
    fn test_grouped_is_transparent_by_default() {
        let mut plain = Trace::default();
        let mut grouped = Trace::default();
        parse("{a} = true").unwrap().accept(&mut plain);
        parse("(({a} = true))").unwrap().accept(&mut grouped);
        assert_eq!(plain.events, grouped.events);
    }
}
