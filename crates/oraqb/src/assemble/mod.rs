//! Query assembly.
//!
//! Renders a [`QueryDescriptor`] into Oracle SQL text. Clauses are joined
//! with newlines in this order:
//!
//! ```text
//! SELECT ... FROM ...
//! <joins>
//! WHERE (a AND b) OR (c)
//! GROUP BY ...
//! ORDER BY ...
//! FETCH FIRST n ROWS ONLY      -- or the ROWNUM window when an offset is set
//! ```

mod pagination;


use crate::descriptor::{OrderDirection, QueryDescriptor, Selection};
use crate::filter::{WhereTerm, translate_clause};
use crate::ident::{escape_identifier, qualified_identifier};
use crate::schema_cache::ColumnTypeLookup;
use std::collections::HashSet;

pub use pagination::{ROW_NUMBER_ALIAS, fetch_first, rownum_window};

/// Dialect expression used for `RAND` ordering.
pub const RANDOM_ORDER_EXPR: &str = "DBMS_RANDOM.VALUE";

/// Renders descriptors for one (optional) owner schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryAssembler {
    schema: Option<String>,
}

impl QueryAssembler {
    /// Assembler without a schema prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every FROM with `schema` (upper-cased, quoted).
    pub fn with_schema(schema: Option<String>) -> Self {
        Self {
            schema: schema
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.to_uppercase()),
        }
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Render `query`.
    ///
    /// Returns `None` when `query.from` is empty: there is nothing to run and
    /// the caller should treat it as an empty result.
    pub fn assemble<L>(&self, query: &QueryDescriptor, lookup: &mut L) -> Option<String>
    where
        L: ColumnTypeLookup + ?Sized,
    {
        if query.from.is_empty() {
            return None;
        }
        lookup.begin_query();

        let mut parts = Vec::with_capacity(6);
        parts.push(format!(
            "SELECT {} FROM {}",
            render_selection(&query.select),
            qualified_identifier(self.schema.as_deref(), &query.from)
        ));
        parts.extend(query.joins.iter().cloned());

        if let Some(condition) = render_where(query, lookup) {
            parts.push(format!("WHERE {condition}"));
        }

        if let Some(column) = query.group_by.as_deref().filter(|c| !c.is_empty()) {
            parts.push(format!("GROUP BY {}", escape_identifier(column)));
        }

        if let Some((column, direction)) = query.ordering() {
            parts.push(render_order(column, direction));
        }

        let sql = match query.offset {
            Some(offset) => rownum_window(&parts.join("\n"), offset, query.limit),
            None => {
                parts.push(fetch_first(query.limit));
                parts.join("\n")
            }
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(target: "oraqb", table = %query.from, sql = %sql, "assembled query");

        Some(sql)
    }
}

fn render_selection(selection: &Selection) -> String {
    match selection {
        Selection::All => "*".to_string(),
        Selection::Columns(columns) if columns.is_empty() => "*".to_string(),
        Selection::Columns(columns) => columns
            .iter()
            .map(|c| escape_identifier(c))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// `(a AND b) OR (c)`; empty groups are skipped, duplicate terms within a
/// group keep their first occurrence only.
fn render_where<L>(query: &QueryDescriptor, lookup: &mut L) -> Option<String>
where
    L: ColumnTypeLookup + ?Sized,
{
    let mut groups = Vec::with_capacity(query.where_groups.len());

    for group in &query.where_groups {
        let mut seen = HashSet::with_capacity(group.terms.len());
        let mut terms = Vec::with_capacity(group.terms.len());

        for term in &group.terms {
            let rendered = match term {
                WhereTerm::Clause(clause) => translate_clause(&query.from, clause, lookup),
                WhereTerm::Raw(condition) => condition.clone(),
            };
            if seen.insert(rendered.clone()) {
                terms.push(rendered);
            }
        }

        if !terms.is_empty() {
            groups.push(format!("({})", terms.join(" AND ")));
        }
    }

    if groups.is_empty() {
        None
    } else {
        Some(groups.join(" OR "))
    }
}

fn render_order(column: &str, direction: OrderDirection) -> String {
    match direction.keyword() {
        Some(keyword) => format!("ORDER BY {} {keyword}", escape_identifier(column)),
        None => format!("ORDER BY {RANDOM_ORDER_EXPR}"),
    }
}
