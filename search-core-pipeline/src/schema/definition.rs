//! Table definitions as loaded from configuration.
//!
//! A definition describes one table of the host CMS: its control fields
//! (label, soft delete, enable columns, bookkeeping columns) and its
//! columns in declaration order.

use serde::{Deserialize, Serialize};

/// Description of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,
    #[serde(default)]
    pub ctrl: CtrlDefinition,
    /// Columns in declaration order.
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
}

/// Control section of a table definition.
///
/// Keys follow the host's TCA `ctrl` naming, which mixes camel case and
/// snake case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CtrlDefinition {
    /// Column used as the record's display title.
    pub label: Option<String>,
    /// Soft delete flag column.
    pub delete: Option<String>,
    #[serde(default, rename = "enablecolumns")]
    pub enable_columns: EnableColumns,
    #[serde(rename = "transOrigDiffSourceField")]
    pub trans_orig_diff_source_field: Option<String>,
    pub cruser_id: Option<String>,
    pub fe_cruser_id: Option<String>,
    pub fe_crgroup_id: Option<String>,
    #[serde(rename = "languageField")]
    pub language_field: Option<String>,
    #[serde(rename = "origUid")]
    pub orig_uid: Option<String>,
}

/// Columns controlling a record's visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnableColumns {
    /// Hidden flag column.
    pub disabled: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    #[serde(default)]
    pub config: ColumnConfig,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, config: ColumnConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Static option of a select column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectItem {
    pub label: String,
    pub value: String,
}

impl SelectItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Typed column configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnConfig {
    #[default]
    Input,
    Text,
    Check,
    /// Selection from static items or from records of a foreign table.
    Select {
        #[serde(default, rename = "foreignTable")]
        foreign_table: Option<String>,
        #[serde(default)]
        items: Vec<SelectItem>,
    },
    /// Comma separated references to records of a foreign table.
    Group {
        #[serde(rename = "foreignTable")]
        foreign_table: String,
    },
}
