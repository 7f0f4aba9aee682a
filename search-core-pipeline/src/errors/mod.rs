//! Error types for the search core pipeline.

use search_core_repository::SinkError;
use thiserror::Error;

/// Errors that can occur while loading schemas or indexing records.
///
/// Every variant carries a stable numeric code, see [`IndexingError::code`].
#[derive(Error, Debug)]
pub enum IndexingError {
    /// The entity type has no table definition.
    #[error("Entity type \"{0}\" is not configured")]
    UnknownEntityType(String),

    /// A column was requested that the entity type does not declare.
    #[error("Column \"{column}\" does not exist on entity type \"{entity_type}\"")]
    UnknownColumn { entity_type: String, column: String },

    /// A table definition is incomplete or could not be read.
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    /// The record does not exist or is filtered by visibility rules.
    #[error(
        "Record could not be fetched from store: \"{entity_type}\" {identifier}. Perhaps record is not active."
    )]
    NoRecordFound { entity_type: String, identifier: i64 },

    /// The record store could not be queried.
    #[error("Record store unavailable for \"{entity_type}\": {detail}")]
    BackendUnavailable { entity_type: String, detail: String },

    /// A relation field could not be resolved. Never aborts a record.
    #[error("Could not resolve relation \"{field}\": {reason}")]
    RelationResolution { field: String, reason: String },

    /// The search sink rejected a write.
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

impl IndexingError {
    pub const CODE_UNKNOWN_ENTITY_TYPE: u32 = 1484224911;
    pub const CODE_UNKNOWN_COLUMN: u32 = 1484224912;
    pub const CODE_INVALID_DEFINITION: u32 = 1484224913;
    pub const CODE_NO_RECORD_FOUND: u32 = 1484225364;
    pub const CODE_BACKEND_UNAVAILABLE: u32 = 1484225365;
    pub const CODE_RELATION_RESOLUTION: u32 = 1484225366;
    pub const CODE_SINK: u32 = 1484225367;

    /// Create an invalid definition error.
    pub fn invalid_definition(msg: impl Into<String>) -> Self {
        Self::InvalidDefinition(msg.into())
    }

    /// Store outage while fetching the page starting at `offset`.
    pub fn unavailable_page(entity_type: impl Into<String>, offset: usize) -> Self {
        Self::BackendUnavailable {
            entity_type: entity_type.into(),
            detail: format!("page at offset {}", offset),
        }
    }

    /// Store outage while fetching the record `identifier`.
    pub fn unavailable_record(entity_type: impl Into<String>, identifier: i64) -> Self {
        Self::BackendUnavailable {
            entity_type: entity_type.into(),
            detail: format!("record {}", identifier),
        }
    }

    /// Create a relation resolution error.
    pub fn relation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RelationResolution {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Stable code identifying the cause.
    pub fn code(&self) -> u32 {
        match self {
            Self::UnknownEntityType(_) => Self::CODE_UNKNOWN_ENTITY_TYPE,
            Self::UnknownColumn { .. } => Self::CODE_UNKNOWN_COLUMN,
            Self::InvalidDefinition(_) => Self::CODE_INVALID_DEFINITION,
            Self::NoRecordFound { .. } => Self::CODE_NO_RECORD_FOUND,
            Self::BackendUnavailable { .. } => Self::CODE_BACKEND_UNAVAILABLE,
            Self::RelationResolution { .. } => Self::CODE_RELATION_RESOLUTION,
            Self::Sink(_) => Self::CODE_SINK,
        }
    }

    /// Whether the error is a configuration problem.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownEntityType(_) | Self::UnknownColumn { .. } | Self::InvalidDefinition(_)
        )
    }

    /// Whether the error aborts the operation it occurred in.
    ///
    /// Missing records and unresolved relations are recoverable by the caller.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::NoRecordFound { .. } | Self::RelationResolution { .. }
        )
    }
}
