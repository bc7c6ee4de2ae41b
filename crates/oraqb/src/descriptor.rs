//! Dialect-neutral query descriptor.
//!
//! The descriptor is what the hosting framework hands to the assembler. Field
//! names follow the framework's wire form (`where`, `order_by`, `order`) so a
//! descriptor can be read straight from JSON.

use crate::filter::{FilterClause, FilterGroup, FilterOperator};
use crate::value::FilterValue;
use serde::{Deserialize, Serialize};

/// Projected columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSelection", into = "RawSelection")]
pub enum Selection {
    /// `*`
    #[default]
    All,
    Columns(Vec<String>),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSelection {
    One(String),
    Many(Vec<String>),
}

impl From<RawSelection> for Selection {
    fn from(raw: RawSelection) -> Self {
        let columns = match raw {
            RawSelection::One(column) => vec![column],
            RawSelection::Many(columns) => columns,
        };
        match columns.first().map(String::as_str) {
            None | Some("*") => Self::All,
            Some(_) => Self::Columns(columns),
        }
    }
}

impl From<Selection> for RawSelection {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => Self::One("*".to_string()),
            Selection::Columns(columns) => Self::Many(columns),
        }
    }
}

/// Validated ORDER BY direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
    /// Random order; replaces the order expression and drops the keyword.
    Rand,
}

impl OrderDirection {
    /// Parse a direction case-insensitively.
    ///
    /// Anything other than `ASC`, `DESC` or `RAND` becomes `DESC`.
    pub fn normalize(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "ASC" => Self::Asc,
            "RAND" => Self::Rand,
            _ => Self::Desc,
        }
    }

    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Asc => Some("ASC"),
            Self::Desc => Some("DESC"),
            Self::Rand => None,
        }
    }
}

/// Everything needed to render one SELECT.
///
/// `limit` must be positive and is enforced by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    #[serde(default)]
    pub select: Selection,
    pub from: String,
    /// Pre-formed JOIN fragments, appended verbatim.
    #[serde(default)]
    pub joins: Vec<String>,
    /// OR-combined groups of AND-combined terms.
    #[serde(default, rename = "where")]
    pub where_groups: Vec<FilterGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// Raw direction token; validated at assembly.
    #[serde(default, rename = "order", skip_serializing_if = "Option::is_none")]
    pub order_direction: Option<String>,
    pub limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl QueryDescriptor {
    /// `SELECT * FROM from`, first `limit` rows.
    pub fn new(from: impl Into<String>, limit: u64) -> Self {
        Self {
            select: Selection::All,
            from: from.into(),
            joins: Vec::new(),
            where_groups: Vec::new(),
            group_by: None,
            order_by: None,
            order_direction: None,
            limit,
            offset: None,
        }
    }

    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = RawSelection::Many(columns.into_iter().map(Into::into).collect()).into();
        self
    }

    pub fn join(mut self, fragment: impl Into<String>) -> Self {
        self.joins.push(fragment.into());
        self
    }

    pub fn or_where(mut self, group: FilterGroup) -> Self {
        self.where_groups.push(group);
        self
    }

    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by = Some(column.into());
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: impl Into<String>) -> Self {
        self.order_by = Some(column.into());
        self.order_direction = Some(direction.into());
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Append a clause to the group at `group_index`, creating empty groups
    /// up to that index when needed.
    pub fn push_filter(
        &mut self,
        group_index: usize,
        property: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) {
        if self.where_groups.len() <= group_index {
            self.where_groups.resize_with(group_index + 1, FilterGroup::default);
        }
        self.where_groups[group_index].push(FilterClause::new(property, operator, value));
    }

    /// Validated ordering, when both a column and a direction are present.
    pub fn ordering(&self) -> Option<(&str, OrderDirection)> {
        let column = self.order_by.as_deref().filter(|c| !c.is_empty())?;
        let direction = self.order_direction.as_deref().filter(|d| !d.is_empty())?;
        Some((column, OrderDirection::normalize(direction)))
    }
}
