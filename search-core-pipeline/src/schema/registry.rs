//! Schema registry.
//!
//! Holds the table definitions loaded at startup and derives one
//! [`EntitySchema`] per entity type on first access. Derived schemas are
//! cached for the lifetime of the registry.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use super::definition::TableDefinition;
use super::entity_schema::{ContainerSchema, EntitySchema, Visibility};
use crate::errors::IndexingError;
use search_core_shared::ConfigurationContainer;

/// Configuration section holding indexing options.
pub const INDEX_SECTION: &str = "index";

/// Key of the comma separated container blacklist.
pub const ROOT_LINE_BLACKLIST_KEY: &str = "rootLineBlacklist";

/// Registry wide settings.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Table every record's `pid` points into.
    pub container_table: String,
    /// Container column excluding its records from search.
    pub container_exclude_field: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            container_table: "pages".to_string(),
            container_exclude_field: "no_search".to_string(),
        }
    }
}

/// Registry of entity schemas.
pub struct SchemaRegistry {
    definitions: HashMap<String, TableDefinition>,
    configuration: Arc<dyn ConfigurationContainer>,
    config: RegistryConfig,
    cache: RwLock<HashMap<String, Arc<EntitySchema>>>,
}

impl SchemaRegistry {
    /// Create a registry with default settings.
    pub fn new(
        definitions: Vec<TableDefinition>,
        configuration: Arc<dyn ConfigurationContainer>,
    ) -> Self {
        Self::with_config(definitions, configuration, RegistryConfig::default())
    }

    pub fn with_config(
        definitions: Vec<TableDefinition>,
        configuration: Arc<dyn ConfigurationContainer>,
        config: RegistryConfig,
    ) -> Self {
        let definitions = definitions
            .into_iter()
            .map(|definition| (definition.name.clone(), definition))
            .collect();

        Self {
            definitions,
            configuration,
            config,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry from a JSON array of table definitions.
    pub fn from_json(
        json: &str,
        configuration: Arc<dyn ConfigurationContainer>,
        config: RegistryConfig,
    ) -> Result<Self, IndexingError> {
        let definitions: Vec<TableDefinition> = serde_json::from_str(json).map_err(|e| {
            IndexingError::invalid_definition(format!("could not parse table definitions: {}", e))
        })?;
        Ok(Self::with_config(definitions, configuration, config))
    }

    /// Table every record's `pid` points into.
    pub fn container_table(&self) -> &str {
        &self.config.container_table
    }

    /// Names of all indexable entity types, sorted.
    ///
    /// The container table is defined for visibility checks and relation
    /// lookups but is not indexed itself.
    pub fn entity_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .definitions
            .keys()
            .filter(|name| **name != self.config.container_table)
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Schema of an entity type that may be indexed.
    ///
    /// Fails with [`IndexingError::InvalidDefinition`] for the container table.
    pub fn indexable_schema(&self, entity_type: &str) -> Result<Arc<EntitySchema>, IndexingError> {
        if entity_type == self.config.container_table {
            return Err(IndexingError::invalid_definition(format!(
                "container table \"{}\" cannot be indexed",
                entity_type
            )));
        }
        self.schema_for(entity_type)
    }

    /// Schema of `entity_type`.
    ///
    /// Concurrent first accesses may each derive a schema, but all callers
    /// receive the instance that was cached first.
    pub fn schema_for(&self, entity_type: &str) -> Result<Arc<EntitySchema>, IndexingError> {
        if let Some(schema) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(entity_type)
        {
            return Ok(Arc::clone(schema));
        }

        let schema = Arc::new(self.build_schema(entity_type)?);

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let cached = cache
            .entry(entity_type.to_string())
            .or_insert(schema);
        Ok(Arc::clone(cached))
    }

    /// Whether `field` is a system field of `entity_type`.
    pub fn is_system_field(&self, entity_type: &str, field: &str) -> Result<bool, IndexingError> {
        Ok(self.schema_for(entity_type)?.is_system_field(field))
    }

    /// Qualified select list of `entity_type`.
    pub fn fields_clause(&self, entity_type: &str) -> Result<Vec<String>, IndexingError> {
        let fields = self.schema_for(entity_type)?.fields_clause();
        debug!(entity_type = %entity_type, fields = ?fields, "Generated fields");
        Ok(fields)
    }

    fn build_schema(&self, entity_type: &str) -> Result<EntitySchema, IndexingError> {
        let definition = self
            .definitions
            .get(entity_type)
            .ok_or_else(|| IndexingError::UnknownEntityType(entity_type.to_string()))?;

        let container_definition = self
            .definitions
            .get(&self.config.container_table)
            .ok_or_else(|| {
                IndexingError::invalid_definition(format!(
                    "container table \"{}\" is not defined",
                    self.config.container_table
                ))
            })?;

        let container = ContainerSchema {
            table: container_definition.name.clone(),
            disabled_field: container_definition.ctrl.enable_columns.disabled.clone(),
            delete_field: container_definition.ctrl.delete.clone(),
            exclude_field: self.config.container_exclude_field.clone(),
        };

        let visibility = Visibility {
            root_line_blacklist: self.root_line_blacklist(),
            additional_where: self
                .configuration
                .get_if_exists(INDEX_SECTION, entity_type)
                .filter(|fragment| !fragment.trim().is_empty()),
        };

        debug!(entity_type = %entity_type, "Derived entity schema");
        EntitySchema::new(definition.clone(), container, visibility)
    }

    fn root_line_blacklist(&self) -> Vec<i64> {
        let Some(configured) = self
            .configuration
            .get_if_exists(INDEX_SECTION, ROOT_LINE_BLACKLIST_KEY)
        else {
            return Vec::new();
        };

        configured
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .filter_map(|entry| match entry.parse::<i64>() {
                Ok(id) if id > 0 => Some(id),
                _ => {
                    warn!(entry = %entry, "Ignoring invalid root line blacklist entry");
                    None
                }
            })
            .collect()
    }
}
