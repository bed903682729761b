//! Joining independently edited rule fragments.
//!
//! Search screens build one fragment per facet (age range, consent, task
//! status, free text) and join them here. Fragments are combined as a
//! left-nested chain, exactly as the parser would build
//! `f1 and f2 and f3`.

use crate::{
    ast::{Expr, LogicalOp},
    error::{CombineError, RuleError},
    parser::{ParserOptions, parse_with_options},
};

/// Joins expressions with `op`.
///
/// An empty list is an error since neither `and` nor `or` has an agreed
/// neutral rule. A single expression is returned unchanged.
///
/// # Examples
///
/// ```
/// use cohort_rule::{combine, parse, Expr, LogicalOp};
///
/// let a = parse("{age} >= 18").unwrap();
/// let b = parse("{enrollee.consented} = true").unwrap();
///
/// let joined = combine(vec![a.clone(), b.clone()], LogicalOp::And).unwrap();
/// assert_eq!(joined, Expr::and(a, b));
/// ```
pub fn combine(exprs: Vec<Expr>, op: LogicalOp) -> Result<Expr, CombineError> {
    let count = exprs.len();
    let mut iter = exprs.into_iter();
    let first = iter.next().ok_or(CombineError::NoExpressions { op })?;

    let combined = iter.fold(first, |left, right| Expr::binary(op, left, right));

    tracing::debug!("combined {} expressions with '{}'", count, op);
    Ok(combined)
}

/// Parses each non-blank fragment and joins the results with `op`.
///
/// Blank fragments are facets the user left empty and are skipped. The
/// first fragment that fails to parse aborts the whole call.
pub fn combine_rules(
    fragments: &[&str],
    op: LogicalOp,
    options: &ParserOptions,
) -> Result<Expr, RuleError> {
    let exprs = fragments
        .iter()
        .filter(|fragment| !fragment.trim().is_empty())
        .map(|fragment| parse_with_options(fragment, options))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(combine(exprs, op)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, serialize};

    #[test]
    fn test_empty_list_is_an_error() {
        assert_eq!(
            combine(vec![], LogicalOp::Or),
            Err(CombineError::NoExpressions { op: LogicalOp::Or })
        );
    }

    #[test]
    fn test_single_expression_is_identity() {
        let e = parse("({a} = 1 or {b} = 2)").unwrap();
        assert_eq!(combine(vec![e.clone()], LogicalOp::And).unwrap(), e);
    }

    #[test]
    fn test_three_fragments_nest_left() {
        let parts: Vec<Expr> = ["{a} = 1", "{b} = 2", "{c} = 3"]
            .iter()
            .map(|s| parse(s).unwrap())
            .collect();
        let joined = combine(parts, LogicalOp::And).unwrap();
        assert_eq!(joined, parse("{a} = 1 and {b} = 2 and {c} = 3").unwrap());
    }

    #[test]
    fn test_combine_rules_skips_blank_facets() {
        let joined = combine_rules(
            &["{age} >= 18", "  ", "{profile.sexAtBirth} = 'female' or {profile.sexAtBirth} = 'male'"],
            LogicalOp::And,
            &ParserOptions::default(),
        )
        .unwrap();
        assert_eq!(
            serialize(&joined),
            "{age} >= 18 and ({profile.sexAtBirth} = 'female' or {profile.sexAtBirth} = 'male')"
        );
    }

    #[test]
    fn test_combine_rules_reports_bad_fragment() {
        let err = combine_rules(&["{age} >= 18", "{age} >="], LogicalOp::And, &ParserOptions::default())
            .unwrap_err();
        assert!(matches!(err, RuleError::Parse(_)));
    }

    #[test]
    fn test_combine_rules_all_blank() {
        let err = combine_rules(&["", " "], LogicalOp::Or, &ParserOptions::default()).unwrap_err();
        assert_eq!(err, RuleError::Combine(CombineError::NoExpressions { op: LogicalOp::Or }));
    }
}
