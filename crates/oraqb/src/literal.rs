//! Value literal encoding.
//!
//! Filter values are inlined into the generated SQL as escaped literals rather
//! than bound parameters. Every value must pass through this module; any path
//! that splices raw text into a condition reintroduces injection risk.
//!
//! Quote doubling is always applied before `%` wildcards are added, so a
//! quote inside a user value can never terminate the literal early.

use crate::filter::FilterOperator;
use crate::value::{FilterValue, Scalar};

/// Quote `s` as a SQL string literal, doubling embedded single quotes.
pub fn quote_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    push_escaped(s, &mut out);
    out.push('\'');
    out
}

fn push_escaped(s: &str, out: &mut String) {
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("''");
        } else {
            out.push(ch);
        }
    }
}

fn wrap_pattern(s: &str, leading: bool, trailing: bool) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    out.push('\'');
    if leading {
        out.push('%');
    }
    push_escaped(s, &mut out);
    if trailing {
        out.push('%');
    }
    out.push('\'');
    out
}

/// Render a scalar for a plain comparison: numbers bare, text quoted.
pub fn encode_scalar(value: &Scalar) -> String {
    match value {
        Scalar::Integer(n) => n.to_string(),
        Scalar::Float(x) if x.is_finite() => x.to_string(),
        other => quote_literal(&other.to_text()),
    }
}

/// Render a parenthesized list of quoted members: `('a', 'b')`.
pub fn encode_list(items: &[Scalar]) -> String {
    let members = items
        .iter()
        .map(|item| quote_literal(&item.to_text()))
        .collect::<Vec<_>>();
    format!("({})", members.join(", "))
}

/// Produce the literal fragment that follows the SQL keyword of `op`.
///
/// List values are only meaningful for `is_in` / `is_not_in`; a scalar given
/// to those operators is treated as a one element list.
pub fn encode_literal(op: FilterOperator, value: &FilterValue) -> String {
    match op {
        FilterOperator::IsIn | FilterOperator::IsNotIn => match value {
            FilterValue::List(items) => encode_list(items),
            FilterValue::Scalar(s) => encode_list(std::slice::from_ref(s)),
        },
        FilterOperator::Contains | FilterOperator::DoesNotContain => {
            wrap_pattern(&pattern_text(value), true, true)
        }
        FilterOperator::StartsWith => wrap_pattern(&pattern_text(value), false, true),
        FilterOperator::EndsWith => wrap_pattern(&pattern_text(value), true, false),
        FilterOperator::Like => quote_literal(&pattern_text(value)),
        _ => match value {
            FilterValue::Scalar(s) => encode_scalar(s),
            FilterValue::List(items) => encode_list(items),
        },
    }
}

fn pattern_text(value: &FilterValue) -> String {
    match value {
        FilterValue::Scalar(s) => s.to_text(),
        FilterValue::List(items) => items
            .iter()
            .map(Scalar::to_text)
            .collect::<Vec<_>>()
            .join(", "),
    }
}
