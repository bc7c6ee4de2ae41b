//! Connection boundary.
//!
//! oraqb only generates SQL. Executing it is the job of whatever driver the
//! host application uses; the driver is adapted through [`Connection`].

use crate::error::{OraError, OraResult};
use serde_json::Value;

/// A blocking connection able to run arbitrary SQL text.
///
/// Generated SQL already has every value inlined and escaped; implementations
/// must send it as-is, without additional escaping.
pub trait Connection {
    /// Execute a query and return all rows.
    fn query(&self, sql: &str) -> OraResult<Vec<Row>>;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn query(&self, sql: &str) -> OraResult<Vec<Row>> {
        (**self).query(sql)
    }
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn query(&self, sql: &str) -> OraResult<Vec<Row>> {
        (**self).query(sql)
    }
}

/// One result row: column name / value pairs in the order the database
/// returned them.
///
/// Column names keep whatever case the database produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Build a row from ordered pairs.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            columns: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Value of the named column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// First column of the row.
    pub fn first(&self) -> Option<(&str, &Value)> {
        self.columns
            .first()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Column names, in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Read a column as text, failing with a decode error otherwise.
    pub fn try_get_str(&self, column: &str) -> OraResult<&str> {
        match self.get(column) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(OraError::decode(
                column,
                format!("expected text, got {other}"),
            )),
            None => Err(OraError::decode(column, "column not present in row")),
        }
    }
}
