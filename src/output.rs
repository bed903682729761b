//! JSON export of parsed rules.
//!
//! Gives tooling and the CLI a stable, language-neutral view of the tree.
//! Every node is an object with a `"type"` field. Comparisons carry
//! `"left"`/`"right"`, unary nodes carry `"expression"`, and an `and` or
//! `or` chain is a single node whose `"operands"` list holds the chained
//! expressions left to right, so `a and b and c` exports three operands.
//!
//! # Examples
//!
//! ```
//! use cohort_rule::{parse, output::to_json};
//! use serde_json::json;
//!
//! let expr = parse("{age} >= 18").unwrap();
//! assert_eq!(
//!     to_json(&expr),
//!     json!({
//!         "type": "comparison",
//!         "operator": ">=",
//!         "left": { "type": "variable", "path": "age" },
//!         "right": { "type": "number", "value": 18.0 }
//!     })
//! );
//! ```

use serde_json::{Value, json};

use crate::{
    ast::{ComparisonOp, Expr, FunctionCall, LogicalOp, Term},
    visitor::{ExprVisitor, TermVisitor},
};

pub fn to_json(expr: &Expr) -> Value {
    expr.accept(&mut JsonBuilder)
}

pub fn term_to_json(term: &Term) -> Value {
    term.accept(&mut JsonBuilder)
}

/// Compact JSON text.
pub fn to_json_string(expr: &Expr) -> String {
    to_json(expr).to_string()
}

/// JSON text with 2-space indentation.
pub fn to_json_pretty(expr: &Expr) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&to_json(expr))
}

struct JsonBuilder;

impl JsonBuilder {
    fn args(&mut self, call: &FunctionCall) -> Vec<Value> {
        call.args().iter().map(|arg| arg.accept(self)).collect()
    }

    fn chain(&mut self, op: LogicalOp, left: &Expr, right: &Expr) -> Value {
        let mut operands = left.chain_operands(op);
        operands.push(right);
        let operands: Vec<Value> = operands.into_iter().map(|operand| operand.accept(self)).collect();
        json!({ "type": op.as_str(), "operands": operands })
    }
}

impl ExprVisitor for JsonBuilder {
    type Output = Value;

    fn visit_comparison(&mut self, left: &Term, op: ComparisonOp, right: &Term) -> Value {
        json!({
            "type": "comparison",
            "operator": op.as_str(),
            "left": left.accept(self),
            "right": right.accept(self),
        })
    }

    fn visit_and(&mut self, left: &Expr, right: &Expr) -> Value {
        self.chain(LogicalOp::And, left, right)
    }

    fn visit_or(&mut self, left: &Expr, right: &Expr) -> Value {
        self.chain(LogicalOp::Or, left, right)
    }

    fn visit_not(&mut self, inner: &Expr) -> Value {
        json!({ "type": "not", "expression": inner.accept(self) })
    }

    fn visit_predicate(&mut self, call: &FunctionCall) -> Value {
        json!({ "type": "predicate", "name": call.name(), "args": self.args(call) })
    }

    fn visit_grouped(&mut self, inner: &Expr) -> Value {
        json!({ "type": "group", "expression": inner.accept(self) })
    }
}

impl TermVisitor for JsonBuilder {
    type Output = Value;

    fn visit_number(&mut self, value: f64) -> Value {
        let value = serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null);
        json!({ "type": "number", "value": value })
    }

    fn visit_string(&mut self, value: &str) -> Value {
        json!({ "type": "string", "value": value })
    }

    fn visit_boolean(&mut self, value: bool) -> Value {
        json!({ "type": "boolean", "value": value })
    }

    fn visit_null(&mut self) -> Value {
        json!({ "type": "null" })
    }

    fn visit_variable(&mut self, path: &str) -> Value {
        json!({ "type": "variable", "path": path })
    }

    fn visit_function(&mut self, call: &FunctionCall) -> Value {
        json!({ "type": "function", "name": call.name(), "args": self.args(call) })
    }
}
