//! Data dictionary queries.
//!
//! Dictionary views store object names upper-cased, so names are upper-cased
//! here before they are quoted. Names used as values go through
//! [`quote_literal`]; names used as identifiers go through
//! [`escape_identifier`].

use crate::ident::{escape_identifier, qualified_identifier};
use crate::literal::quote_literal;

/// SQL generator for the dictionary views of one (optional) owner schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    schema: Option<String>,
}

impl Catalog {
    /// Catalog scoped to `schema`, or to the connected user when `None`.
    pub fn new(schema: Option<String>) -> Self {
        Self {
            schema: schema.filter(|s| !s.trim().is_empty()),
        }
    }

    /// The owner schema, as configured.
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    fn owner(&self) -> Option<String> {
        self.schema.as_deref().map(str::to_uppercase)
    }

    /// List table names: `SELECT table_name FROM all_tables`.
    pub fn tables_sql(&self) -> String {
        let mut sql = String::from("SELECT table_name FROM all_tables");
        if let Some(owner) = self.owner() {
            sql.push_str(" WHERE owner = ");
            sql.push_str(&quote_literal(&owner));
        }
        sql
    }

    /// List the column names of `table`.
    pub fn columns_sql(&self, table: &str) -> String {
        let mut sql = format!(
            "SELECT column_name FROM all_tab_columns WHERE table_name = {}",
            quote_literal(&table.to_uppercase())
        );
        if let Some(owner) = self.owner() {
            sql.push_str(" AND owner = ");
            sql.push_str(&quote_literal(&owner));
        }
        sql
    }

    /// List `(column_name, data_type)` pairs of `table`.
    ///
    /// Without an owner schema this reads `user_tab_columns`.
    pub fn column_types_sql(&self, table: &str) -> String {
        let table = quote_literal(&table.to_uppercase());
        match self.owner() {
            Some(owner) => format!(
                "SELECT column_name, data_type FROM all_tab_columns WHERE table_name = {table} AND owner = {}",
                quote_literal(&owner)
            ),
            None => format!(
                "SELECT column_name, data_type FROM user_tab_columns WHERE table_name = {table}"
            ),
        }
    }

    /// Up to `limit` distinct values of `table.column`.
    pub fn distinct_values_sql(&self, table: &str, column: &str, limit: u64) -> String {
        let owner = self.owner();
        format!(
            "SELECT DISTINCT {} FROM {} WHERE ROWNUM <= {limit}",
            escape_identifier(&column.to_uppercase()),
            qualified_identifier(owner.as_deref(), &table.to_uppercase()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_without_schema() {
        assert_eq!(Catalog::new(None).tables_sql(), "SELECT table_name FROM all_tables");
    }

    #[test]
    fn blank_schema_is_ignored() {
        assert_eq!(Catalog::new(Some("  ".into())).schema(), None);
    }

    #[test]
    fn tables_with_schema() {
        assert_eq!(
            Catalog::new(Some("hr".into())).tables_sql(),
            "SELECT table_name FROM all_tables WHERE owner = 'HR'"
        );
    }

    #[test]
    fn columns_with_schema() {
        assert_eq!(
            Catalog::new(Some("hr".into())).columns_sql("emp"),
            "SELECT column_name FROM all_tab_columns WHERE table_name = 'EMP' AND owner = 'HR'"
        );
    }

    #[test]
    fn column_types_switch_view_on_schema() {
        assert_eq!(
            Catalog::new(None).column_types_sql("emp"),
            "SELECT column_name, data_type FROM user_tab_columns WHERE table_name = 'EMP'"
        );
        assert_eq!(
            Catalog::new(Some("HR".into())).column_types_sql("emp"),
            "SELECT column_name, data_type FROM all_tab_columns WHERE table_name = 'EMP' AND owner = 'HR'"
        );
    }

    #[test]
    fn names_are_escaped_as_literals() {
        assert_eq!(
            Catalog::new(None).columns_sql("x' OR '1'='1"),
            "SELECT column_name FROM all_tab_columns WHERE table_name = 'X'' OR ''1''=''1'"
        );
    }

    #[test]
    fn distinct_values() {
        assert_eq!(
            Catalog::new(Some("hr".into())).distinct_values_sql("emp", "ename", 25),
            r#"SELECT DISTINCT "ENAME" FROM "HR"."EMP" WHERE ROWNUM <= 25"#
        );
        assert_eq!(
            Catalog::new(None).distinct_values_sql("emp", "ename", 5),
            r#"SELECT DISTINCT "ENAME" FROM "EMP" WHERE ROWNUM <= 5"#
        );
    }
}
