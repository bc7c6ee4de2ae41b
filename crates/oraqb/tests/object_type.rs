//! Object type behaviour against a scripted connection.

use oraqb::{
    CachePolicy, Connection, DatabaseConfig, FilterOperator, FilterValue, ObjectType, OraError,
    OraResult, OracleObjectType, OrderingArgs, QueryDescriptor, Row,
};
use serde_json::{Value, json};
use std::cell::RefCell;

/// Answers dictionary queries for an `EMP` table and records every statement.
#[derive(Default)]
struct ScriptedConnection {
    executed: RefCell<Vec<String>>,
    fail_data_queries: bool,
    fail_dictionary: bool,
}

impl ScriptedConnection {
    fn executed(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }

    fn count(&self, prefix: &str) -> usize {
        self.executed
            .borrow()
            .iter()
            .filter(|sql| sql.starts_with(prefix))
            .count()
    }
}

fn row(pairs: &[(&str, Value)]) -> Row {
    Row::from_pairs(pairs.iter().map(|(k, v)| (k.to_string(), v.clone())))
}

impl Connection for ScriptedConnection {
    fn query(&self, sql: &str) -> OraResult<Vec<Row>> {
        self.executed.borrow_mut().push(sql.to_string());

        if sql.starts_with("SELECT table_name FROM all_tables") {
            return Ok(vec![
                row(&[("TABLE_NAME", json!("EMP"))]),
                row(&[("TABLE_NAME", json!("DEPT"))]),
            ]);
        }
        if sql.starts_with("SELECT column_name FROM all_tab_columns") {
            return Ok(vec![
                row(&[("COLUMN_NAME", json!("EMPNO"))]),
                row(&[("COLUMN_NAME", json!("ENAME"))]),
                row(&[("COLUMN_NAME", json!("HIREDATE"))]),
            ]);
        }
        if sql.starts_with("SELECT column_name, data_type") {
            if self.fail_dictionary {
                return Err(OraError::Connection(
                    "ORA-03113: end-of-file on communication channel".into(),
                ));
            }
            return Ok(vec![
                row(&[("COLUMN_NAME", json!("EMPNO")), ("DATA_TYPE", json!("NUMBER"))]),
                row(&[("COLUMN_NAME", json!("HIREDATE")), ("DATA_TYPE", json!("DATE"))]),
            ]);
        }
        if sql.starts_with("SELECT DISTINCT") {
            return Ok(vec![
                row(&[("JOB", json!("CLERK"))]),
                row(&[("JOB", Value::Null)]),
                row(&[("JOB", json!("MANAGER"))]),
                row(&[("JOB", json!("CLERK"))]),
            ]);
        }

        if self.fail_data_queries {
            return Err(OraError::query("ORA-00942: table or view does not exist"));
        }
        Ok(vec![
            row(&[("EMPNO", json!(7369)), ("ENAME", json!("SMITH")), ("user_pass", json!("secret"))]),
            row(&[("EMPNO", json!(7499)), ("ENAME", json!("ALLEN")), ("user_pass", json!("secret"))]),
        ])
    }
}

fn object_type(conn: ScriptedConnection) -> OracleObjectType<ScriptedConnection> {
    OracleObjectType::new(
        "oracle-database",
        DatabaseConfig::new("ORCL", "scott", "tiger").query_limit(50),
        conn,
    )
}

#[test]
fn tables_and_properties() {
    let mut ot = object_type(ScriptedConnection::default());

    assert_eq!(ot.tables(), vec!["EMP", "DEPT"]);

    let props = ot.properties("EMP");
    assert_eq!(props.len(), 3);
    assert_eq!(props[1].value, "ENAME");
    assert_eq!(props[1].group, "columns");
    assert!(props[1].orderby);
    assert!(props[1].operators.contains(&FilterOperator::IsNotIn));
    assert!(props[1].operators.contains(&FilterOperator::Like));

    assert!(ot.properties("").is_empty());
}

#[test]
fn unique_values_drop_nulls_and_duplicates() {
    let mut ot = object_type(ScriptedConnection::default());
    assert_eq!(
        ot.column_unique_values("emp", "job"),
        vec![json!("CLERK"), json!("MANAGER")]
    );
    assert_eq!(
        ot.connection().executed().last().map(String::as_str),
        Some(r#"SELECT DISTINCT "JOB" FROM "EMP" WHERE ROWNUM <= 50"#)
    );
}

#[test]
fn query_runs_assembled_sql() {
    let mut ot = object_type(ScriptedConnection::default());
    let mut q = ot.default_query("EMP", &OrderingArgs::default(), 5);
    ot.process_filter(&mut q, 0, "ENAME", FilterOperator::StartsWith, FilterValue::text("S"));

    let rows = ot.query(&q);
    assert_eq!(rows.len(), 2);
    assert_eq!(
        ot.connection().executed().last().map(String::as_str),
        Some("SELECT * FROM \"EMP\"\nWHERE (\"ENAME\" LIKE 'S%')\nFETCH FIRST 5 ROWS ONLY")
    );
}

#[test]
fn default_query_orders_ascending() {
    let ot = object_type(ScriptedConnection::default());
    let ordering = OrderingArgs {
        orderby: Some("ENAME".into()),
        order: None,
    };
    let q = ot.default_query("EMP", &ordering, 10);
    assert_eq!(q.order_direction.as_deref(), Some("ASC"));
    assert_eq!(q.order_by.as_deref(), Some("ENAME"));
    assert_eq!(q.limit, 10);
}

#[test]
fn empty_from_executes_nothing() {
    let mut ot = object_type(ScriptedConnection::default());
    let q = QueryDescriptor::new("", 5);
    assert!(ot.query(&q).is_empty());
    assert_eq!(ot.query_cache_hash(&q), None);
    assert!(ot.connection().executed().is_empty());
}

#[test]
fn failed_query_yields_empty_rows() {
    let mut ot = object_type(ScriptedConnection {
        fail_data_queries: true,
        ..Default::default()
    });
    assert!(ot.query(&QueryDescriptor::new("NOPE", 5)).is_empty());
}

#[test]
fn date_filters_resolve_types_once_per_table() {
    let mut ot = object_type(ScriptedConnection::default());
    let mut q = QueryDescriptor::new("EMP", 5);
    ot.process_filter(&mut q, 0, "HIREDATE", FilterOperator::Gte, FilterValue::text("2024-01-01"));
    ot.process_filter(&mut q, 0, "HIREDATE", FilterOperator::Lte, FilterValue::text("2024-01-31"));
    ot.process_filter(&mut q, 1, "EMPNO", FilterOperator::Gt, FilterValue::text("7000"));

    let sql = ot.query_cache_hash(&q).unwrap();
    assert!(sql.contains(
        "WHERE (\"HIREDATE\" >= '2024-01-01 00:00:00' AND \"HIREDATE\" <= '2024-01-31 23:59:59') OR (\"EMPNO\" > '7000')"
    ));

    ot.query(&q);
    assert_eq!(ot.connection().count("SELECT column_name, data_type"), 1);
}

#[test]
fn per_query_cache_policy_reloads_types() {
    let conn = ScriptedConnection::default();
    let config = DatabaseConfig::new("ORCL", "scott", "tiger").cache_policy(CachePolicy::PerQuery);
    let mut ot = OracleObjectType::new("oracle-database", config, conn);

    let mut q = QueryDescriptor::new("EMP", 5);
    ot.process_filter(&mut q, 0, "HIREDATE", FilterOperator::Gt, FilterValue::text("2024-01-01"));
    ot.query_cache_hash(&q);
    ot.query_cache_hash(&q);
    assert_eq!(ot.connection().count("SELECT column_name, data_type"), 2);
}

#[test]
fn dictionary_failure_disables_coercion() {
    let mut ot = object_type(ScriptedConnection {
        fail_dictionary: true,
        ..Default::default()
    });
    let mut q = QueryDescriptor::new("EMP", 5);
    ot.process_filter(&mut q, 0, "HIREDATE", FilterOperator::Gte, FilterValue::text("2024-01-01"));

    let sql = ot.query_cache_hash(&q).unwrap();
    assert!(sql.contains("WHERE (\"HIREDATE\" >= '2024-01-01')"));
    ot.query_cache_hash(&q);
    assert_eq!(ot.connection().count("SELECT column_name, data_type"), 1);
}

#[test]
fn object_id_and_blacklist() {
    let mut ot = object_type(ScriptedConnection::default());
    let rows = ot.query(&QueryDescriptor::new("EMP", 5));
    let first = &rows[0];

    assert_eq!(ot.object_id(first, Some("EMP")), Some(json!(7369)));
    assert_eq!(ot.object_id(first, None), None);
    assert_eq!(ot.object_id(&Row::default(), Some("EMP")), None);

    assert_eq!(ot.object_prop_value(first, "ENAME"), Some(&json!("SMITH")));
    assert_eq!(ot.object_prop_value(first, "user_pass"), None);
    assert_eq!(ot.object_prop_value(first, "MISSING"), None);

    let dictionary_row = row(&[
        ("EMPNO", json!(7900)),
        ("PASSWORD", json!("s3cret")),
        ("USER_PASS", json!("hash")),
        ("COMM", Value::Null),
    ]);
    assert_eq!(ot.object_prop_value(&dictionary_row, "PASSWORD"), None);
    assert_eq!(ot.object_prop_value(&dictionary_row, "USER_PASS"), None);
    assert_eq!(ot.object_prop_value(&dictionary_row, "COMM"), None);
    assert_eq!(ot.object_prop_value(&dictionary_row, "EMPNO"), Some(&json!(7900)));
}

#[test]
fn table_name_case_shares_one_dictionary_lookup() {
    let mut ot = object_type(ScriptedConnection::default());

    let mut lower = QueryDescriptor::new("emp", 5);
    ot.process_filter(&mut lower, 0, "HIREDATE", FilterOperator::Gte, FilterValue::text("2024-01-01"));
    let mut upper = QueryDescriptor::new("EMP", 5);
    ot.process_filter(&mut upper, 0, "HIREDATE", FilterOperator::Gte, FilterValue::text("2024-01-01"));

    assert!(ot.query_cache_hash(&lower).unwrap().contains("'2024-01-01 00:00:00'"));
    assert!(ot.query_cache_hash(&upper).unwrap().contains("'2024-01-01 00:00:00'"));
    assert_eq!(ot.connection().count("SELECT column_name, data_type"), 1);
}

#[test]
fn schema_prefix_flows_into_all_queries() {
    let config = DatabaseConfig::new("ORCL", "scott", "tiger").schema("hr");
    let mut ot = OracleObjectType::new("oracle-database", config, ScriptedConnection::default());

    ot.tables();
    let mut q = QueryDescriptor::new("EMP", 5);
    ot.process_filter(&mut q, 0, "HIREDATE", FilterOperator::Lt, FilterValue::text("2024-06-30"));
    ot.query(&q);

    let executed = ot.connection().executed();
    assert_eq!(executed[0], "SELECT table_name FROM all_tables WHERE owner = 'HR'");
    assert_eq!(
        executed[1],
        "SELECT column_name, data_type FROM all_tab_columns WHERE table_name = 'EMP' AND owner = 'HR'"
    );
    assert!(executed[2].starts_with("SELECT * FROM \"HR\".\"EMP\""));
    assert!(executed[2].contains("'2024-06-30 23:59:59'"));
}
