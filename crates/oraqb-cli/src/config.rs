use oraqb::DatabaseConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Column name -> Oracle data type name, per table.
pub type ColumnTypes = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub config_path: PathBuf,
    pub file: ConfigFile,
}

impl ProjectConfig {
    pub fn load(config_path: PathBuf) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(&config_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read config file {}: {e}",
                config_path.display()
            )
        })?;

        let file = ConfigFile::parse(&raw).map_err(|e| {
            anyhow::anyhow!("invalid config file {}: {e:#}", config_path.display())
        })?;

        Ok(Self { config_path, file })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,

    pub database: DatabaseConfig,

    #[serde(default)]
    pub column_types: ColumnTypes,
}

impl ConfigFile {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let mut file: ConfigFile = toml::from_str(raw)?;
        file.expand_env()?;
        file.validate()?;
        Ok(file)
    }

    fn expand_env(&mut self) -> anyhow::Result<()> {
        let db = &mut self.database;
        db.alias = expand_env_vars(&db.alias)?;
        db.user = expand_env_vars(&db.user)?;
        db.password = expand_env_vars(&db.password)?;
        if let Some(schema) = db.schema.as_mut() {
            *schema = expand_env_vars(schema)?;
        }

        for columns in self.column_types.values_mut() {
            for data_type in columns.values_mut() {
                *data_type = expand_env_vars(data_type)?;
            }
        }

        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.version.trim() != "1" {
            anyhow::bail!("unsupported config version: {}", self.version);
        }
        self.database.validate()?;
        Ok(())
    }
}

fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next();

            let mut key = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                key.push(ch);
            }

            if !closed {
                anyhow::bail!("unterminated env var reference: ${{{key}}}");
            }
            if key.is_empty() {
                anyhow::bail!("invalid env var reference: ${{}}");
            }

            let v = std::env::var(&key)
                .map_err(|_| anyhow::anyhow!("missing env var for config expansion: {key}"))?;
            out.push_str(&v);
            continue;
        }

        out.push(c);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oraqb::CachePolicy;

    #[test]
    fn parse_full_config() {
        let file = ConfigFile::parse(
            r#"
version = "1"

[database]
alias = "ORCLPDB1"
user = "scott"
password = "tiger"
schema = "hr"
query_limit = 100
cache_policy = "per_query"

[column_types.EMP]
HIREDATE = "DATE"
EMPNO = "NUMBER"
"#,
        )
        .unwrap();

        assert_eq!(file.database.alias, "ORCLPDB1");
        assert_eq!(file.database.schema.as_deref(), Some("hr"));
        assert_eq!(file.database.query_limit, 100);
        assert_eq!(file.database.cache_policy, CachePolicy::PerQuery);
        assert_eq!(file.column_types["EMP"]["HIREDATE"], "DATE");
    }

    #[test]
    fn defaults_apply() {
        let file = ConfigFile::parse(
            r#"
version = "1"

[database]
alias = "ORCL"
user = "scott"
password = "tiger"
"#,
        )
        .unwrap();
        assert_eq!(file.database.query_limit, oraqb::config::DEFAULT_QUERY_LIMIT);
        assert!(file.column_types.is_empty());
        assert!(file.database.is_blacklisted("user_pass"));
    }

    #[test]
    fn rejects_unknown_version() {
        let err = ConfigFile::parse(
            r#"
version = "2"

[database]
alias = "ORCL"
user = "scott"
password = "tiger"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsupported config version"));
    }

    #[test]
    fn expands_env_vars() {
        let path = std::env::var("PATH").unwrap();
        assert_eq!(expand_env_vars("x${PATH}y").unwrap(), format!("x{path}y"));
        assert_eq!(expand_env_vars("no refs").unwrap(), "no refs");
        assert!(expand_env_vars("${UNTERMINATED").is_err());
        assert!(expand_env_vars("${}").is_err());
        assert!(expand_env_vars("${ORAQB_SURELY_UNSET_VAR}").is_err());
    }
}
