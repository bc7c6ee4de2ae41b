//! Connection configuration record.

use crate::error::{OraError, OraResult};
use crate::schema_cache::CachePolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default upper bound for `column_unique_values` and default page size.
pub const DEFAULT_QUERY_LIMIT: u64 = 500;

/// Columns whose values are never exposed through [`crate::ObjectType::object_prop_value`].
pub const DEFAULT_BLACKLISTED_COLUMNS: &[&str] = &["password", "user_pass", "user_activation_key"];

/// Credentials and settings for one Oracle object type.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connect descriptor or TNS alias.
    pub alias: String,
    pub user: String,
    pub password: String,
    /// Owner schema; `None` uses the connected user's objects.
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default = "default_query_limit")]
    pub query_limit: u64,
    #[serde(default)]
    pub cache_policy: CachePolicy,
    #[serde(default = "default_blacklisted_columns")]
    pub blacklisted_columns: Vec<String>,
}

fn default_query_limit() -> u64 {
    DEFAULT_QUERY_LIMIT
}

fn default_blacklisted_columns() -> Vec<String> {
    DEFAULT_BLACKLISTED_COLUMNS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl DatabaseConfig {
    pub fn new(
        alias: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            user: user.into(),
            password: password.into(),
            schema: None,
            query_limit: DEFAULT_QUERY_LIMIT,
            cache_policy: CachePolicy::default(),
            blacklisted_columns: default_blacklisted_columns(),
        }
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn query_limit(mut self, limit: u64) -> Self {
        self.query_limit = limit;
        self
    }

    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Reject configurations that cannot produce valid SQL.
    pub fn validate(&self) -> OraResult<()> {
        if self.alias.trim().is_empty() {
            return Err(OraError::config("alias must not be empty"));
        }
        if self.query_limit == 0 {
            return Err(OraError::config("query_limit must be positive"));
        }
        Ok(())
    }

    /// Whether values of `column` must be hidden. Names compare
    /// case-insensitively since the dictionary reports them upper-cased.
    pub fn is_blacklisted(&self, column: &str) -> bool {
        self.blacklisted_columns
            .iter()
            .any(|c| c.eq_ignore_ascii_case(column))
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("alias", &self.alias)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("schema", &self.schema)
            .field("query_limit", &self.query_limit)
            .field("cache_policy", &self.cache_policy)
            .field("blacklisted_columns", &self.blacklisted_columns)
            .finish()
    }
}
