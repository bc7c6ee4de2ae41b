//! Framework-facing object type backed by an Oracle connection.
//!
//! An object type exposes the database to a host framework: the tables it can
//! populate from, their columns as filterable properties, and a `query` entry
//! point that assembles and runs a descriptor. Every database failure on this
//! surface is logged and turned into an empty result.

use crate::assemble::QueryAssembler;
use crate::catalog::Catalog;
use crate::client::{Connection, Row};
use crate::config::DatabaseConfig;
use crate::descriptor::QueryDescriptor;
use crate::filter::FilterOperator;
use crate::schema_cache::SchemaTypeCache;
use crate::value::FilterValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(feature = "tracing")]
use crate::trace::TracingSqlHook;

/// Property group under which table columns are listed.
pub const COLUMNS_GROUP: &str = "columns";

/// Descriptor of the primary property (the table picker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryProperty {
    pub id: &'static str,
    pub label: &'static str,
}

/// A filterable / orderable property of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub group: &'static str,
    pub label: String,
    pub value: String,
    pub orderby: bool,
    pub operators: Vec<FilterOperator>,
}

/// Ordering requested by the framework. `order` defaults to `ASC`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingArgs {
    #[serde(default)]
    pub orderby: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

/// The object type contract seen by the host framework.
pub trait ObjectType {
    fn id(&self) -> &str;

    fn label(&self) -> &str;

    fn primary_property(&self) -> PrimaryProperty {
        PrimaryProperty {
            id: "table",
            label: "Table",
        }
    }

    /// Table names available for population.
    fn tables(&mut self) -> Vec<String>;

    /// One property per column of `table`.
    fn properties(&mut self, table: &str) -> Vec<Property>;

    /// Distinct non-null values of `table.column`, bounded by the query limit.
    fn column_unique_values(&mut self, table: &str, column: &str) -> Vec<Value>;

    /// Starting descriptor for a population request.
    fn default_query(
        &self,
        primary_property_value: &str,
        ordering: &OrderingArgs,
        limit: u64,
    ) -> QueryDescriptor {
        let mut query = QueryDescriptor::new(primary_property_value, limit);
        query.order_by = ordering.orderby.clone();
        query.order_direction = Some(
            ordering
                .order
                .clone()
                .unwrap_or_else(|| "ASC".to_string()),
        );
        query
    }

    /// Add one framework filter to the group at `group_index`.
    fn process_filter(
        &self,
        query: &mut QueryDescriptor,
        group_index: usize,
        property: &str,
        operator: FilterOperator,
        value: FilterValue,
    ) {
        query.push_filter(group_index, property, operator, value);
    }

    /// Assemble and run `query`; empty when there is nothing to run or it fails.
    fn query(&mut self, query: &QueryDescriptor) -> Vec<Row>;

    /// The SQL `query` would run, used as a result cache key.
    fn query_cache_hash(&mut self, query: &QueryDescriptor) -> Option<String>;

    /// Identifier of a result row: the value of its first column.
    fn object_id(&self, row: &Row, primary_property_value: Option<&str>) -> Option<Value> {
        primary_property_value.filter(|v| !v.is_empty())?;
        row.first().map(|(_, value)| value.clone())
    }

    /// Value of `prop` in `row`, hiding blacklisted columns and NULLs.
    fn object_prop_value<'r>(&self, row: &'r Row, prop: &str) -> Option<&'r Value>;
}

/// [`ObjectType`] over an Oracle [`Connection`].
pub struct OracleObjectType<C> {
    id: String,
    config: DatabaseConfig,
    conn: C,
    catalog: Catalog,
    assembler: QueryAssembler,
    cache: SchemaTypeCache,
    #[cfg(feature = "tracing")]
    hook: TracingSqlHook,
}

impl<C: Connection> OracleObjectType<C> {
    pub fn new(id: impl Into<String>, config: DatabaseConfig, conn: C) -> Self {
        let catalog = Catalog::new(config.schema.clone());
        let assembler = QueryAssembler::with_schema(config.schema.clone());
        let cache = SchemaTypeCache::with_policy(config.cache_policy);
        Self {
            id: id.into(),
            config,
            conn,
            catalog,
            assembler,
            cache,
            #[cfg(feature = "tracing")]
            hook: TracingSqlHook::default(),
        }
    }

    /// Replace the SQL logging hook.
    #[cfg(feature = "tracing")]
    pub fn with_hook(mut self, hook: TracingSqlHook) -> Self {
        self.hook = hook;
        self
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    /// The schema type cache, for explicit clearing or seeding.
    pub fn schema_cache_mut(&mut self) -> &mut SchemaTypeCache {
        &mut self.cache
    }

    /// Column names of `table`.
    pub fn columns(&self, table: &str) -> Vec<String> {
        let sql = self.catalog.columns_sql(table);
        self.fetch_strings(&sql, "COLUMN_NAME")
    }

    fn fetch(&self, sql: &str) -> Vec<Row> {
        #[cfg(feature = "tracing")]
        self.hook.before_query(&self.id, sql);

        match self.conn.query(sql) {
            Ok(rows) => rows,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "oraqb", object_type = %self.id, error = %_e, "query failed");
                Vec::new()
            }
        }
    }

    fn fetch_strings(&self, sql: &str, column: &str) -> Vec<String> {
        self.fetch(sql)
            .iter()
            .filter_map(|row| row.try_get_str(column).ok().map(str::to_string))
            .collect()
    }

    fn assemble(&mut self, query: &QueryDescriptor) -> Option<String> {
        let mut lookup = self.cache.resolver(&self.conn, &self.catalog);
        self.assembler.assemble(query, &mut lookup)
    }
}

impl<C: Connection> ObjectType for OracleObjectType<C> {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        "Oracle Database"
    }

    fn tables(&mut self) -> Vec<String> {
        let sql = self.catalog.tables_sql();
        self.fetch_strings(&sql, "TABLE_NAME")
    }

    fn properties(&mut self, table: &str) -> Vec<Property> {
        if table.is_empty() {
            return Vec::new();
        }
        self.columns(table)
            .into_iter()
            .map(|column| Property {
                group: COLUMNS_GROUP,
                label: column.clone(),
                value: column,
                orderby: true,
                operators: FilterOperator::ALL.to_vec(),
            })
            .collect()
    }

    fn column_unique_values(&mut self, table: &str, column: &str) -> Vec<Value> {
        let sql = self
            .catalog
            .distinct_values_sql(table, column, self.config.query_limit);
        let key = column.to_uppercase();

        let mut values: Vec<Value> = Vec::new();
        for row in self.fetch(&sql) {
            match row.get(&key) {
                Some(Value::Null) | None => {}
                Some(value) if values.contains(value) => {}
                Some(value) => values.push(value.clone()),
            }
        }
        values
    }

    fn query(&mut self, query: &QueryDescriptor) -> Vec<Row> {
        match self.assemble(query) {
            Some(sql) => self.fetch(&sql),
            None => Vec::new(),
        }
    }

    fn query_cache_hash(&mut self, query: &QueryDescriptor) -> Option<String> {
        self.assemble(query)
    }

    fn object_prop_value<'r>(&self, row: &'r Row, prop: &str) -> Option<&'r Value> {
        if self.config.is_blacklisted(prop) {
            return None;
        }
        row.get(prop).filter(|value| !value.is_null())
    }
}
