//! # oraqb
//!
//! A dynamic SQL query builder for Oracle-style databases, where pagination is
//! emulated with `ROWNUM` / `FETCH FIRST` instead of `LIMIT` / `OFFSET`.
//!
//! A dialect-neutral [`QueryDescriptor`] (table, columns, OR-of-AND filter
//! groups, grouping, ordering, page window) is rendered into SQL text with all
//! values inlined as escaped literals. Date and timestamp columns compared with
//! range operators are normalized to whole-day bounds using a per-table
//! [`SchemaTypeCache`].
//!
//! ## Example
//!
//! ```
//! use oraqb::{FilterGroup, FilterOperator, NoSchema, QueryAssembler, QueryDescriptor};
//!
//! let query = QueryDescriptor::new("EMP", 5)
//!     .or_where(FilterGroup::new().clause("ENAME", FilterOperator::Contains, "O'B"))
//!     .order_by("ENAME", "asc")
//!     .offset(10);
//!
//! let sql = QueryAssembler::new().assemble(&query, &mut NoSchema).unwrap();
//! assert!(sql.contains(r#""ENAME" LIKE '%O''B%'"#));
//! assert!(sql.ends_with("WHERE ROWNUM <= 15) WHERE rnum > 10"));
//! ```
//!
//! ## Literal inlining
//!
//! Generated SQL never uses bind parameters. Safety rests on every identifier
//! passing through [`ident::escape_identifier`] and every value through
//! [`literal`]; join fragments and raw [`WhereTerm::Raw`] conditions are the
//! only text spliced verbatim.

pub mod assemble;
pub mod catalog;
pub mod client;
pub mod config;
pub mod date;
pub mod descriptor;
pub mod error;
pub mod filter;
pub mod ident;
pub mod literal;
pub mod object_type;
pub mod registry;
pub mod schema_cache;
pub mod value;

#[cfg(feature = "tracing")]
pub mod trace;

pub use assemble::QueryAssembler;
pub use catalog::Catalog;
pub use client::{Connection, Row};
pub use config::DatabaseConfig;
pub use descriptor::{OrderDirection, QueryDescriptor, Selection};
pub use error::{OraError, OraResult};
pub use filter::{FilterClause, FilterGroup, FilterOperator, WhereTerm, translate_clause};
pub use ident::escape_identifier;
pub use literal::{encode_literal, quote_literal};
pub use object_type::{ObjectType, OracleObjectType, OrderingArgs, Property};
pub use registry::ObjectTypeRegistry;
pub use schema_cache::{CachePolicy, ColumnType, ColumnTypeLookup, NoSchema, SchemaTypeCache};
pub use value::{FilterValue, Scalar};

#[cfg(feature = "tracing")]
pub use trace::TracingSqlHook;
