//! Abstract filters and their translation into SQL conditions.

use crate::date::coerce_for_comparison;
use crate::error::OraError;
use crate::ident::escape_identifier;
use crate::literal::encode_literal;
use crate::schema_cache::ColumnTypeLookup;
use crate::value::{FilterValue, Scalar};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filter operator, as named by the hosting framework.
///
/// ```text
/// is                -> =
/// isnot             -> !=
/// > >= < <=         -> unchanged
/// contains          -> LIKE '%v%'
/// does_not_contain  -> NOT LIKE '%v%'
/// starts_with       -> LIKE 'v%'
/// ends_with         -> LIKE '%v'
/// like              -> LIKE 'v'
/// is_in             -> IN ('a', 'b')
/// is_not_in         -> NOT IN ('a', 'b')
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "is")]
    Is,
    #[serde(rename = "isnot")]
    IsNot,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "does_not_contain")]
    DoesNotContain,
    #[serde(rename = "starts_with")]
    StartsWith,
    #[serde(rename = "ends_with")]
    EndsWith,
    #[serde(rename = "like")]
    Like,
    #[serde(rename = "is_in")]
    IsIn,
    #[serde(rename = "is_not_in")]
    IsNotIn,
}

impl FilterOperator {
    /// Every operator, in the order the framework lists them.
    pub const ALL: [FilterOperator; 13] = [
        Self::Is,
        Self::IsNot,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Contains,
        Self::DoesNotContain,
        Self::StartsWith,
        Self::EndsWith,
        Self::Like,
        Self::IsIn,
        Self::IsNotIn,
    ];

    /// Framework name of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Is => "is",
            Self::IsNot => "isnot",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Contains => "contains",
            Self::DoesNotContain => "does_not_contain",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::Like => "like",
            Self::IsIn => "is_in",
            Self::IsNotIn => "is_not_in",
        }
    }

    /// SQL keyword placed between the column and the literal.
    pub fn sql_keyword(self) -> &'static str {
        match self {
            Self::Is => "=",
            Self::IsNot => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Contains | Self::StartsWith | Self::EndsWith | Self::Like => "LIKE",
            Self::DoesNotContain => "NOT LIKE",
            Self::IsIn => "IN",
            Self::IsNotIn => "NOT IN",
        }
    }

    /// `>`, `>=`, `<`, `<=`: the operators subject to date coercion.
    pub fn is_range(self) -> bool {
        matches!(self, Self::Gt | Self::Gte | Self::Lt | Self::Lte)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = OraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| OraError::validation(format!("unknown filter operator: {s}")))
    }
}

/// `property operator value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    pub property: String,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

impl FilterClause {
    pub fn new(
        property: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            property: property.into(),
            operator,
            value: value.into(),
        }
    }
}

/// A member of a filter group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WhereTerm {
    Clause(FilterClause),
    /// Pre-formed condition, passed through verbatim.
    ///
    /// Raw conditions bypass escaping; only feed them trusted text.
    Raw(String),
}

impl From<FilterClause> for WhereTerm {
    fn from(clause: FilterClause) -> Self {
        Self::Clause(clause)
    }
}

/// AND-combined terms. Groups are OR-combined with each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterGroup {
    pub terms: Vec<WhereTerm>,
}

impl FilterGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a structured clause.
    pub fn clause(
        mut self,
        property: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        self.terms
            .push(WhereTerm::Clause(FilterClause::new(property, operator, value)));
        self
    }

    /// Append a pre-formed condition.
    pub fn raw(mut self, condition: impl Into<String>) -> Self {
        self.terms.push(WhereTerm::Raw(condition.into()));
        self
    }

    pub fn push(&mut self, term: impl Into<WhereTerm>) {
        self.terms.push(term.into());
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl FromIterator<WhereTerm> for FilterGroup {
    fn from_iter<I: IntoIterator<Item = WhereTerm>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

/// Translate one clause into `"column" KEYWORD literal`.
///
/// Text compared with `>`, `>=`, `<`, `<=` against a DATE / TIMESTAMP column
/// of `table` is normalized to a full-day bound first. `is_in` with an empty
/// list renders as `1=0` and `is_not_in` with an empty list as `1=1`.
pub fn translate_clause<L>(table: &str, clause: &FilterClause, lookup: &mut L) -> String
where
    L: ColumnTypeLookup + ?Sized,
{
    let op = clause.operator;
    let property = escape_identifier(&clause.property);

    if let FilterValue::List(items) = &clause.value {
        if items.is_empty() {
            match op {
                FilterOperator::IsIn => return "1=0".to_string(),
                FilterOperator::IsNotIn => return "1=1".to_string(),
                _ => {}
            }
        }
    }

    let coerced = coerce_date_value(table, clause, lookup);
    let value = coerced.as_ref().unwrap_or(&clause.value);

    format!("{property} {} {}", op.sql_keyword(), encode_literal(op, value))
}

fn coerce_date_value<L>(table: &str, clause: &FilterClause, lookup: &mut L) -> Option<FilterValue>
where
    L: ColumnTypeLookup + ?Sized,
{
    if !clause.operator.is_range() {
        return None;
    }
    let text = clause.value.as_scalar()?.as_text()?;
    if !lookup
        .column_type(table, &clause.property)
        .is_some_and(|t| t.is_date_like())
    {
        return None;
    }

    match coerce_for_comparison(clause.operator, text) {
        Some(day) => Some(FilterValue::Scalar(Scalar::Text(day))),
        None => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: "oraqb",
                table,
                column = %clause.property,
                value = text,
                "date value not recognized; comparing as text"
            );
            None
        }
    }
}
