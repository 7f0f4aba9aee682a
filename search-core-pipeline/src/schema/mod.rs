//! Entity schema service.
//!
//! Table definitions are loaded once at startup into a [`SchemaRegistry`];
//! the registry derives and caches an immutable [`EntitySchema`] per entity
//! type describing which fields are indexed, which are relations and which
//! visibility rules apply.

mod definition;
mod entity_schema;
mod registry;

pub use definition::{
    ColumnConfig, ColumnDefinition, CtrlDefinition, EnableColumns, SelectItem, TableDefinition,
};
pub use entity_schema::{
    ContainerSchema, EntitySchema, RelationDefinition, RelationTarget, Visibility,
    VERSIONING_FIELDS,
};
pub use registry::{RegistryConfig, SchemaRegistry, INDEX_SECTION, ROOT_LINE_BLACKLIST_KEY};
