use std::mem;

use crate::ast::{ComparisonOp, LogicalOp};

/// Boolean-valued node of a parsed rule.
///
/// Every rule has exactly one root `Expr`. Conjunctions and disjunctions
/// are always binary; `a and b and c` is `And(And(a, b), c)`.
///
/// Chains of one connective can be arbitrarily long. `Clone`, `PartialEq`
/// and `Drop` walk them with loops, and [`Expr::chain_operands`] gives
/// visitors the same flat view.
#[derive(Debug)]
pub enum Expr {
    /// Two terms joined by a comparison operator
    ///
    /// # Example
    /// ```text
    /// {age} >= 18
    /// ```
    Comparison {
        left: Term,
        op: ComparisonOp,
        right: Term,
    },

    /// Logical AND
    And { left: Box<Expr>, right: Box<Expr> },

    /// Logical OR
    Or { left: Box<Expr>, right: Box<Expr> },

    /// Parenthesized expression, kept so printing reproduces the source
    Grouped(Box<Expr>),

    /// Negation
    ///
    /// # Example
    /// ```text
    /// !({enrollee.consented} = true)
    /// ```
    Not(Box<Expr>),

    /// A function call standing on its own as a filter
    ///
    /// # Example
    /// ```text
    /// include({family.shortcode})
    /// ```
    Predicate(FunctionCall),
}

impl Expr {
    pub fn comparison(left: Term, op: ComparisonOp, right: Term) -> Self {
        Expr::Comparison { left, op, right }
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn grouped(inner: Expr) -> Self {
        Expr::Grouped(Box::new(inner))
    }

    pub fn not(inner: Expr) -> Self {
        Expr::Not(Box::new(inner))
    }

    /// `And` or `Or` node, picked by `op`.
    pub fn binary(op: LogicalOp, left: Expr, right: Expr) -> Self {
        match op {
            LogicalOp::And => Expr::and(left, right),
            LogicalOp::Or => Expr::or(left, right),
        }
    }

    /// Children of this node when it is an `op` node.
    pub fn split(&self, op: LogicalOp) -> Option<(&Expr, &Expr)> {
        match (self, op) {
            (Expr::And { left, right }, LogicalOp::And) | (Expr::Or { left, right }, LogicalOp::Or) => {
                Some((&**left, &**right))
            }
            _ => None,
        }
    }

    /// Operands of the left-nested `op` chain rooted here, leftmost first.
    ///
    /// `a and b and c` yields `[a, b, c]`; a node that is not an `op` node
    /// yields just itself. Right operands are returned whole even when
    /// they are `op` nodes themselves, since only the left spine is a chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use cohort_rule::{parse, LogicalOp};
    ///
    /// let expr = parse("{a} = 1 and {b} = 2 and ({c} = 3 or {d} = 4)").unwrap();
    /// assert_eq!(expr.chain_operands(LogicalOp::And).len(), 3);
    /// assert_eq!(expr.chain_operands(LogicalOp::Or).len(), 1);
    /// ```
    pub fn chain_operands(&self, op: LogicalOp) -> Vec<&Expr> {
        let mut operands = Vec::new();
        let mut current = self;
        while let Some((left, right)) = current.split(op) {
            operands.push(right);
            current = left;
        }
        operands.push(current);
        operands.reverse();
        operands
    }

    fn clone_chain(&self, op: LogicalOp) -> Self {
        let mut operands = self.chain_operands(op).into_iter().map(Expr::clone);
        let first = operands.next().unwrap_or_else(Expr::hollow);
        operands.fold(first, |left, right| Expr::binary(op, left, right))
    }

    /// Leaf left behind in a box whose contents were moved out.
    fn hollow() -> Self {
        Expr::Comparison {
            left: Term::Null,
            op: ComparisonOp::Equal,
            right: Term::Null,
        }
    }

    fn take_children(&mut self, into: &mut Vec<Expr>) {
        match self {
            Expr::And { left, right } | Expr::Or { left, right } => {
                into.push(mem::replace(&mut **left, Expr::hollow()));
                into.push(mem::replace(&mut **right, Expr::hollow()));
            }
            Expr::Grouped(inner) | Expr::Not(inner) => {
                into.push(mem::replace(&mut **inner, Expr::hollow()));
            }
            Expr::Comparison { .. } | Expr::Predicate(_) => {}
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.take_children(&mut pending);
        }
    }
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        match self {
            Expr::Comparison { left, op, right } => Expr::comparison(left.clone(), *op, right.clone()),
            Expr::And { .. } => self.clone_chain(LogicalOp::And),
            Expr::Or { .. } => self.clone_chain(LogicalOp::Or),
            Expr::Grouped(inner) => Expr::grouped((**inner).clone()),
            Expr::Not(inner) => Expr::not((**inner).clone()),
            Expr::Predicate(call) => Expr::Predicate(call.clone()),
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (
                    Expr::Comparison { left: l1, op: o1, right: r1 },
                    Expr::Comparison { left: l2, op: o2, right: r2 },
                ) => {
                    if o1 != o2 || l1 != l2 || r1 != r2 {
                        return false;
                    }
                }
                (Expr::And { left: l1, right: r1 }, Expr::And { left: l2, right: r2 })
                | (Expr::Or { left: l1, right: r1 }, Expr::Or { left: l2, right: r2 }) => {
                    pending.push((&**l1, &**l2));
                    pending.push((&**r1, &**r2));
                }
                (Expr::Grouped(a), Expr::Grouped(b)) | (Expr::Not(a), Expr::Not(b)) => {
                    pending.push((&**a, &**b));
                }
                (Expr::Predicate(a), Expr::Predicate(b)) => {
                    if a != b {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

/// Value-producing node: a literal, a variable reference or a function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Numeric literal, always stored as a float
    Number(f64),

    /// String literal with quotes removed and escapes resolved
    String(String),

    /// `true` or `false`
    Boolean(bool),

    /// `null`
    Null,

    /// Dotted path into the record, written `{a.b.c}` in source
    ///
    /// The path is never checked against any schema here.
    Variable(String),

    /// Function applied to one or more terms
    Function(FunctionCall),
}

impl Term {
    pub fn variable(path: impl Into<String>) -> Self {
        Term::Variable(path.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Term::String(value.into())
    }
}

/// A named function applied to at least one argument.
///
/// Fields are private so the argument list can never be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    name: String,
    args: Vec<Term>,
}

impl FunctionCall {
    /// Returns `None` when `args` is empty.
    pub fn new(name: impl Into<String>, args: Vec<Term>) -> Option<Self> {
        if args.is_empty() {
            return None;
        }
        Some(FunctionCall {
            name: name.into(),
            args,
        })
    }

    /// Builds a call from its first argument and any that follow.
    pub fn with_args(name: impl Into<String>, first: Term, rest: impl IntoIterator<Item = Term>) -> Self {
        let mut args = vec![first];
        args.extend(rest);
        FunctionCall {
            name: name.into(),
            args,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }
}
