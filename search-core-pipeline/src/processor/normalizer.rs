//! Document normalization.

use serde_json::Value;

use crate::schema::EntitySchema;
use search_core_shared::{
    value_as_string, NormalizedDocument, RawRecord, SEARCH_IDENTIFIER_FIELD, SEARCH_TITLE_FIELD,
    UID_FIELD,
};

/// Turn a resolved record into the document shape the sink receives.
///
/// `search_identifier` is set from the record's uid and `search_title` from
/// the entity's label field, unless the record already carries them. The
/// function is deterministic and idempotent.
pub fn normalize(schema: &EntitySchema, record: RawRecord) -> NormalizedDocument {
    let mut fields = record.into_map();

    if is_unset(fields.get(SEARCH_IDENTIFIER_FIELD)) {
        if let Some(identifier) = fields.get(UID_FIELD).and_then(value_as_string) {
            fields.insert(
                SEARCH_IDENTIFIER_FIELD.to_string(),
                Value::String(identifier),
            );
        }
    }

    if is_unset(fields.get(SEARCH_TITLE_FIELD)) {
        if let Some(title) = fields
            .get(schema.label_field())
            .filter(|value| !value.is_null())
            .cloned()
        {
            fields.insert(SEARCH_TITLE_FIELD.to_string(), title);
        }
    }

    NormalizedDocument::from_fields(fields)
}

fn is_unset(value: Option<&Value>) -> bool {
    value.map_or(true, Value::is_null)
}
