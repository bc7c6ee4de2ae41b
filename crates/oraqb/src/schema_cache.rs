//! Per-table column datatype cache.
//!
//! The cache decides whether a comparison value needs date normalization. On
//! the first lookup for a table it runs one dictionary query and stores every
//! `(column, datatype)` pair of that table, so sibling columns never trigger a
//! second round trip.
//!
//! The cache is owned by the caller and performs no locking. Share it across
//! threads only behind external synchronization.

use crate::catalog::Catalog;
use crate::client::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declared datatype of a column, as reported by the data dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Date,
    /// `TIMESTAMP`, `TIMESTAMP(n)` and the time zone variants.
    Timestamp,
    Other(String),
}

impl ColumnType {
    /// Classify a dictionary `data_type` string.
    pub fn from_data_type(data_type: &str) -> Self {
        let upper = data_type.trim().to_uppercase();
        if upper == "DATE" {
            Self::Date
        } else if upper == "TIMESTAMP"
            || upper.starts_with("TIMESTAMP(")
            || upper.starts_with("TIMESTAMP ")
        {
            Self::Timestamp
        } else {
            Self::Other(upper)
        }
    }

    /// Whether comparisons against this column get day-granularity coercion.
    pub fn is_date_like(&self) -> bool {
        matches!(self, Self::Date | Self::Timestamp)
    }
}

/// How long resolved table types are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Keep everything for the lifetime of the cache owner.
    #[default]
    Persistent,
    /// Forget everything at the start of each query assembly.
    PerQuery,
}

/// Resolves the declared type of a column.
///
/// The query assembler only sees this trait, so rendering can run against a
/// live dictionary, a pre-seeded cache, or no schema information at all.
pub trait ColumnTypeLookup {
    /// Declared type of `table.column`, or `None` when unknown.
    fn column_type(&mut self, table: &str, column: &str) -> Option<ColumnType>;

    /// Called once at the start of every assembly.
    fn begin_query(&mut self) {}
}

/// Lookup that knows no column types; no date coercion is ever applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSchema;

impl ColumnTypeLookup for NoSchema {
    fn column_type(&mut self, _table: &str, _column: &str) -> Option<ColumnType> {
        None
    }
}

/// Table name -> column name -> declared type.
#[derive(Debug, Clone, Default)]
pub struct SchemaTypeCache {
    tables: HashMap<String, HashMap<String, ColumnType>>,
    policy: CachePolicy,
}

impl SchemaTypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CachePolicy) -> Self {
        Self {
            tables: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Whether `table` has been resolved (or seeded).
    pub fn contains_table(&self, table: &str) -> bool {
        self.tables.contains_key(&table_key(table))
    }

    /// Number of resolved tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Forget every table.
    pub fn clear(&mut self) {
        self.tables.clear();
    }

    /// Forget one table; the next lookup queries the dictionary again.
    pub fn invalidate(&mut self, table: &str) {
        self.tables.remove(&table_key(table));
    }

    /// Store the types of `table` without touching the database.
    ///
    /// Replaces whatever was cached for the table.
    pub fn seed<I, K, V>(&mut self, table: impl Into<String>, types: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let columns = types
            .into_iter()
            .map(|(column, data_type)| {
                (column.into(), ColumnType::from_data_type(data_type.as_ref()))
            })
            .collect();
        let table: String = table.into();
        self.tables.insert(table_key(&table), columns);
    }

    /// Cached type of `table.column`, without resolving misses.
    pub fn cached(&self, table: &str, column: &str) -> Option<&ColumnType> {
        self.tables.get(&table_key(table))?.get(column)
    }

    /// Type of `table.column`, running the dictionary query on a table miss.
    ///
    /// A failed dictionary query is logged and remembered as an empty table,
    /// so it is reported once and never retried while cached.
    pub fn column_type<C: Connection + ?Sized>(
        &mut self,
        conn: &C,
        catalog: &Catalog,
        table: &str,
        column: &str,
    ) -> Option<ColumnType> {
        let key = table_key(table);
        if !self.tables.contains_key(&key) {
            let columns = load_table_types(conn, catalog, table);
            self.tables.insert(key, columns);
        }
        self.cached(table, column).cloned()
    }

    /// Adapt this cache to [`ColumnTypeLookup`] backed by a live connection.
    pub fn resolver<'a, C: Connection + ?Sized>(
        &'a mut self,
        conn: &'a C,
        catalog: &'a Catalog,
    ) -> CachedLookup<'a, C> {
        CachedLookup {
            cache: self,
            conn,
            catalog,
        }
    }

    fn begin(&mut self) {
        if self.policy == CachePolicy::PerQuery {
            self.tables.clear();
        }
    }
}

/// Offline lookup: only seeded or previously resolved tables are known.
impl ColumnTypeLookup for SchemaTypeCache {
    fn column_type(&mut self, table: &str, column: &str) -> Option<ColumnType> {
        self.cached(table, column).cloned()
    }

    fn begin_query(&mut self) {
        self.begin();
    }
}

/// [`SchemaTypeCache`] paired with the connection used to fill misses.
pub struct CachedLookup<'a, C: ?Sized> {
    cache: &'a mut SchemaTypeCache,
    conn: &'a C,
    catalog: &'a Catalog,
}

impl<C: Connection + ?Sized> ColumnTypeLookup for CachedLookup<'_, C> {
    fn column_type(&mut self, table: &str, column: &str) -> Option<ColumnType> {
        self.cache.column_type(self.conn, self.catalog, table, column)
    }

    fn begin_query(&mut self) {
        self.cache.begin();
    }
}

/// Tables are keyed in dictionary form, so `emp` and `EMP` share an entry.
fn table_key(table: &str) -> String {
    table.to_uppercase()
}

fn load_table_types<C: Connection + ?Sized>(
    conn: &C,
    catalog: &Catalog,
    table: &str,
) -> HashMap<String, ColumnType> {
    let sql = catalog.column_types_sql(table);
    let rows = match conn.query(&sql) {
        Ok(rows) => rows,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "oraqb", table, error = %_e, "column type lookup failed");
            return HashMap::new();
        }
    };

    let mut columns = HashMap::with_capacity(rows.len());
    for row in rows {
        match (row.try_get_str("COLUMN_NAME"), row.try_get_str("DATA_TYPE")) {
            (Ok(name), Ok(data_type)) => {
                columns.insert(name.to_string(), ColumnType::from_data_type(data_type));
            }
            (Err(_e), _) | (_, Err(_e)) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "oraqb", table, error = %_e, "skipping malformed dictionary row");
            }
        }
    }
    columns
}
