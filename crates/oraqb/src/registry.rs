//! Object type registry: id -> factory.

use crate::client::Connection;
use crate::config::DatabaseConfig;
use crate::error::{OraError, OraResult};
use crate::object_type::{ObjectType, OracleObjectType};
use std::collections::BTreeMap;

/// Builds a fresh object type for the id it was registered under.
pub type ObjectTypeFactory = Box<dyn Fn(&str) -> OraResult<Box<dyn ObjectType>>>;

/// Mapping of object type identifiers to factories.
///
/// Each `create` call produces a new instance, so every instance owns its own
/// schema type cache.
#[derive(Default)]
pub struct ObjectTypeRegistry {
    factories: BTreeMap<String, ObjectTypeFactory>,
}

impl ObjectTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `id`. Ids must be unique.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F) -> OraResult<()>
    where
        F: Fn(&str) -> OraResult<Box<dyn ObjectType>> + 'static,
    {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(OraError::validation("object type id must not be empty"));
        }
        if self.factories.contains_key(&id) {
            return Err(OraError::validation(format!(
                "object type already registered: {id}"
            )));
        }

        #[cfg(feature = "tracing")]
        tracing::info!(target: "oraqb", object_type = %id, "object type registered");

        self.factories.insert(id, Box::new(factory));
        Ok(())
    }

    /// Register an Oracle object type for `config`.
    ///
    /// `connect` is called on every `create` to open the connection the new
    /// instance will own.
    pub fn register_oracle<C, F>(
        &mut self,
        id: impl Into<String>,
        config: DatabaseConfig,
        connect: F,
    ) -> OraResult<()>
    where
        C: Connection + 'static,
        F: Fn(&DatabaseConfig) -> OraResult<C> + 'static,
    {
        config.validate()?;
        self.register(id, move |id| {
            let conn = connect(&config)?;
            Ok(Box::new(OracleObjectType::new(id, config.clone(), conn)) as Box<dyn ObjectType>)
        })
    }

    /// Instantiate the object type registered under `id`.
    pub fn create(&self, id: &str) -> OraResult<Box<dyn ObjectType>> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| OraError::UnknownObjectType(id.to_string()))?;
        factory(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for ObjectTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectTypeRegistry")
            .field("ids", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
