//! Per entity type metadata derived from a table definition.

use super::definition::{ColumnConfig, SelectItem, TableDefinition};
use crate::errors::IndexingError;
use search_core_shared::{RawRecord, PID_FIELD, UID_FIELD};

/// Versioning columns that are never indexed.
pub const VERSIONING_FIELDS: [&str; 10] = [
    "t3ver_oid",
    "t3ver_id",
    "t3ver_label",
    "t3ver_wsid",
    "t3ver_state",
    "t3ver_stage",
    "t3ver_count",
    "t3ver_tstamp",
    "t3ver_move_id",
    "t3ver_swapmode",
];

/// How a relation field's raw value is turned into a display value.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationTarget {
    /// Look up records of another entity type and use their labels.
    EntityType(String),
    /// Map values to the labels of static select items.
    Items(Vec<SelectItem>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationDefinition {
    pub field: String,
    pub target: RelationTarget,
}

/// Visibility settings of the container table all records live in.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSchema {
    pub table: String,
    pub disabled_field: Option<String>,
    pub delete_field: Option<String>,
    /// Flag excluding a container's records from search.
    pub exclude_field: String,
}

/// Record visibility parameters taken from configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Visibility {
    /// Containers whose records, or whose children's records, are not indexed.
    pub root_line_blacklist: Vec<i64>,
    /// Additional where fragment appended to every select.
    pub additional_where: Option<String>,
}

/// Immutable metadata of one entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    definition: TableDefinition,
    label_field: String,
    system_fields: Vec<String>,
    relations: Vec<RelationDefinition>,
    container: ContainerSchema,
    visibility: Visibility,
}

impl EntitySchema {
    /// Derive the schema of `definition`.
    ///
    /// Fails if the definition names no label field.
    pub fn new(
        definition: TableDefinition,
        container: ContainerSchema,
        visibility: Visibility,
    ) -> Result<Self, IndexingError> {
        let label_field = definition.ctrl.label.clone().ok_or_else(|| {
            IndexingError::invalid_definition(format!(
                "table \"{}\" has no label field",
                definition.name
            ))
        })?;

        let ctrl = &definition.ctrl;
        let system_fields = VERSIONING_FIELDS
            .iter()
            .map(|field| field.to_string())
            .chain(
                [
                    &ctrl.trans_orig_diff_source_field,
                    &ctrl.cruser_id,
                    &ctrl.fe_cruser_id,
                    &ctrl.fe_crgroup_id,
                    &ctrl.language_field,
                    &ctrl.orig_uid,
                ]
                .into_iter()
                .flatten()
                .cloned(),
            )
            .collect();

        let relations = definition
            .columns
            .iter()
            .filter_map(|column| {
                let target = match &column.config {
                    ColumnConfig::Select {
                        foreign_table: Some(table),
                        ..
                    } => RelationTarget::EntityType(table.clone()),
                    ColumnConfig::Select { items, .. } if !items.is_empty() => {
                        RelationTarget::Items(items.clone())
                    }
                    ColumnConfig::Group { foreign_table } => {
                        RelationTarget::EntityType(foreign_table.clone())
                    }
                    _ => return None,
                };
                Some(RelationDefinition {
                    field: column.name.clone(),
                    target,
                })
            })
            .collect();

        Ok(Self {
            definition,
            label_field,
            system_fields,
            relations,
            container,
            visibility,
        })
    }

    /// The entity type name, which is also the table name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn label_field(&self) -> &str {
        &self.label_field
    }

    pub fn language_field(&self) -> Option<&str> {
        self.definition.ctrl.language_field.as_deref()
    }

    pub fn delete_field(&self) -> Option<&str> {
        self.definition.ctrl.delete.as_deref()
    }

    pub fn disabled_field(&self) -> Option<&str> {
        self.definition.ctrl.enable_columns.disabled.as_deref()
    }

    pub fn container(&self) -> &ContainerSchema {
        &self.container
    }

    /// Whether this entity type is the container table itself.
    pub fn is_container(&self) -> bool {
        self.name() == self.container.table
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn relations(&self) -> &[RelationDefinition] {
        &self.relations
    }

    pub fn system_fields(&self) -> &[String] {
        &self.system_fields
    }

    /// Whether `field` is a versioning or bookkeeping column.
    pub fn is_system_field(&self, field: &str) -> bool {
        self.system_fields.iter().any(|system| system == field)
    }

    /// Declared columns that are indexed, in declaration order.
    pub fn indexable_fields(&self) -> Vec<&str> {
        self.definition
            .columns
            .iter()
            .map(|column| column.name.as_str())
            .filter(|name| !self.is_system_field(name))
            .collect()
    }

    /// Qualified select list: uid and pid, then every indexable column.
    ///
    /// Fields are qualified by table name since selects join the container table.
    pub fn fields_clause(&self) -> Vec<String> {
        let mut fields: Vec<&str> = vec![UID_FIELD, PID_FIELD];
        for field in self.indexable_fields() {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }

        fields
            .into_iter()
            .map(|field| format!("{}.{}", self.name(), field))
            .collect()
    }

    /// Configuration of a declared column.
    pub fn column_config(&self, column: &str) -> Result<&ColumnConfig, IndexingError> {
        self.definition
            .columns
            .iter()
            .find(|definition| definition.name == column)
            .map(|definition| &definition.config)
            .ok_or_else(|| IndexingError::UnknownColumn {
                entity_type: self.name().to_string(),
                column: column.to_string(),
            })
    }

    /// Whether the record sits in a blacklisted container.
    ///
    /// Only the record's direct container is checked; the container's own
    /// parent is excluded by the where clause.
    pub fn is_blacklisted(&self, record: &RawRecord) -> bool {
        if self.visibility.root_line_blacklist.is_empty() {
            return false;
        }

        record
            .pid()
            .map(|pid| self.visibility.root_line_blacklist.contains(&pid))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::definition::{ColumnDefinition, CtrlDefinition, EnableColumns};

    fn container() -> ContainerSchema {
        ContainerSchema {
            table: "pages".to_string(),
            disabled_field: Some("hidden".to_string()),
            delete_field: Some("deleted".to_string()),
            exclude_field: "no_search".to_string(),
        }
    }

    fn definition() -> TableDefinition {
        TableDefinition {
            name: "tt_content".to_string(),
            ctrl: CtrlDefinition {
                label: Some("header".to_string()),
                delete: Some("deleted".to_string()),
                enable_columns: EnableColumns {
                    disabled: Some("hidden".to_string()),
                },
                trans_orig_diff_source_field: Some("l18n_diffsource".to_string()),
                cruser_id: Some("cruser_id".to_string()),
                language_field: Some("sys_language_uid".to_string()),
                orig_uid: Some("t3_origuid".to_string()),
                ..CtrlDefinition::default()
            },
            columns: vec![
                ColumnDefinition::new("header", ColumnConfig::Input),
                ColumnDefinition::new("t3ver_label", ColumnConfig::Input),
                ColumnDefinition::new("bodytext", ColumnConfig::Text),
                ColumnDefinition::new("l18n_diffsource", ColumnConfig::Text),
                ColumnDefinition::new("sys_language_uid", ColumnConfig::Input),
                ColumnDefinition::new("cruser_id", ColumnConfig::Input),
                ColumnDefinition::new(
                    "categories",
                    ColumnConfig::Group {
                        foreign_table: "sys_category".to_string(),
                    },
                ),
                ColumnDefinition::new(
                    "layout",
                    ColumnConfig::Select {
                        foreign_table: None,
                        items: vec![SelectItem::new("Default", "0")],
                    },
                ),
                ColumnDefinition::new(
                    "frame",
                    ColumnConfig::Select {
                        foreign_table: None,
                        items: vec![],
                    },
                ),
            ],
        }
    }

    fn schema() -> EntitySchema {
        EntitySchema::new(definition(), container(), Visibility::default()).unwrap()
    }

    #[test]
    fn test_fields_clause_excludes_system_fields() {
        let fields = schema().fields_clause();

        assert_eq!(
            fields,
            vec![
                "tt_content.uid",
                "tt_content.pid",
                "tt_content.header",
                "tt_content.bodytext",
                "tt_content.categories",
                "tt_content.layout",
                "tt_content.frame",
            ]
        );
    }

    #[test]
    fn test_fields_clause_never_contains_system_field() {
        let schema = schema();
        for field in schema.fields_clause() {
            let column = field.trim_start_matches("tt_content.");
            assert!(!schema.is_system_field(column), "{} is a system field", column);
        }
    }

    #[test]
    fn test_is_system_field() {
        let schema = schema();
        assert!(schema.is_system_field("t3ver_oid"));
        assert!(schema.is_system_field("l18n_diffsource"));
        assert!(schema.is_system_field("sys_language_uid"));
        assert!(schema.is_system_field("t3_origuid"));
        assert!(!schema.is_system_field("header"));
    }

    #[test]
    fn test_relations() {
        let relations = schema().relations().to_vec();

        assert_eq!(relations.len(), 2);
        assert_eq!(relations[0].field, "categories");
        assert_eq!(
            relations[0].target,
            RelationTarget::EntityType("sys_category".to_string())
        );
        assert_eq!(relations[1].field, "layout");
        assert!(matches!(relations[1].target, RelationTarget::Items(_)));
    }

    #[test]
    fn test_missing_label_is_invalid() {
        let mut definition = definition();
        definition.ctrl.label = None;

        let err = EntitySchema::new(definition, container(), Visibility::default()).unwrap_err();
        assert_eq!(err.code(), IndexingError::CODE_INVALID_DEFINITION);
    }

    #[test]
    fn test_column_config() {
        let schema = schema();
        assert_eq!(schema.column_config("bodytext").unwrap(), &ColumnConfig::Text);

        let err = schema.column_config("missing").unwrap_err();
        assert_eq!(err.code(), IndexingError::CODE_UNKNOWN_COLUMN);
    }

    #[test]
    fn test_language_field() {
        assert_eq!(schema().language_field(), Some("sys_language_uid"));
    }

    #[test]
    fn test_is_blacklisted() {
        let visibility = Visibility {
            root_line_blacklist: vec![3, 4],
            additional_where: None,
        };
        let schema = EntitySchema::new(definition(), container(), visibility).unwrap();

        assert!(schema.is_blacklisted(&RawRecord::new().with("uid", 1).with("pid", 3)));
        assert!(!schema.is_blacklisted(&RawRecord::new().with("uid", 1).with("pid", 5)));
        assert!(!schema.is_blacklisted(&RawRecord::new().with("uid", 1)));
    }

    #[test]
    fn test_nothing_blacklisted_without_configuration() {
        assert!(!schema().is_blacklisted(&RawRecord::new().with("uid", 1).with("pid", 3)));
    }
}
