//! Relation resolution.
//!
//! Replaces the raw foreign value of every relation field (a single id or a
//! comma separated list) with the display label of what it points to.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::IndexingError;
use crate::schema::{EntitySchema, RelationDefinition, RelationTarget, SchemaRegistry};
use crate::source::RecordSource;
use search_core_shared::{value_as_i64, value_as_string, RawRecord};

pub struct RelationResolver {
    registry: Arc<SchemaRegistry>,
    source: RecordSource,
}

impl RelationResolver {
    pub fn new(registry: Arc<SchemaRegistry>, source: RecordSource) -> Self {
        Self { registry, source }
    }

    /// Resolve all relation fields of `record`.
    ///
    /// A relation that cannot be resolved keeps its raw value; the failure
    /// is logged and the remaining relations are still resolved.
    pub async fn resolve(&self, schema: &EntitySchema, mut record: RawRecord) -> RawRecord {
        for relation in schema.relations() {
            let Some(raw) = record.get(&relation.field).cloned() else {
                continue;
            };

            match self.resolve_field(relation, &raw).await {
                Ok(Some(resolved)) => {
                    record = record.with(relation.field.clone(), resolved);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        entity_type = %schema.name(),
                        field = %relation.field,
                        code = e.code(),
                        error = %e,
                        "Keeping raw relation value"
                    );
                }
            }
        }

        record
    }

    /// Resolve one relation value.
    ///
    /// Returns `None` when the value references nothing. A single label is
    /// returned as a string, several as an array.
    async fn resolve_field(
        &self,
        relation: &RelationDefinition,
        raw: &Value,
    ) -> Result<Option<Value>, IndexingError> {
        let Some(values) = split_values(raw) else {
            return Err(IndexingError::relation(
                &relation.field,
                "value is neither a scalar nor a list",
            ));
        };

        let labels = match &relation.target {
            RelationTarget::Items(items) => {
                if values.is_empty() {
                    return Ok(None);
                }
                values
                    .iter()
                    .map(|value| {
                        items
                            .iter()
                            .find(|item| &item.value == value)
                            .map(|item| item.label.clone())
                            .ok_or_else(|| {
                                IndexingError::relation(
                                    &relation.field,
                                    format!("no item with value \"{}\"", value),
                                )
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
            RelationTarget::EntityType(entity_type) => {
                let ids = parse_ids(&relation.field, &values)?;
                if ids.is_empty() {
                    return Ok(None);
                }
                self.foreign_labels(&relation.field, entity_type, &ids).await?
            }
        };

        debug!(field = %relation.field, labels = labels.len(), "Resolved relation");

        let mut labels = labels.into_iter().map(Value::String).collect::<Vec<_>>();
        if labels.len() == 1 {
            Ok(labels.pop())
        } else {
            Ok(Some(Value::Array(labels)))
        }
    }

    async fn foreign_labels(
        &self,
        field: &str,
        entity_type: &str,
        ids: &[i64],
    ) -> Result<Vec<String>, IndexingError> {
        let target = self
            .registry
            .schema_for(entity_type)
            .map_err(|e| IndexingError::relation(field, e.to_string()))?;

        let mut labels = Vec::with_capacity(ids.len());
        for id in ids {
            let record = self
                .source
                .fetch_one(&target, *id)
                .await
                .map_err(|e| IndexingError::relation(field, e.to_string()))?;

            let label = record
                .get(target.label_field())
                .and_then(value_as_string)
                .ok_or_else(|| {
                    IndexingError::relation(
                        field,
                        format!("\"{}\" {} has no label", entity_type, id),
                    )
                })?;
            labels.push(label);
        }

        Ok(labels)
    }
}

/// Split a raw relation value into its non-empty parts.
fn split_values(raw: &Value) -> Option<Vec<String>> {
    match raw {
        Value::Null => Some(Vec::new()),
        Value::Array(values) => values.iter().map(value_as_string).collect(),
        value => value_as_string(value).map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        }),
    }
}

/// Parse foreign ids, dropping the `0` placeholder for "no relation".
fn parse_ids(field: &str, values: &[String]) -> Result<Vec<i64>, IndexingError> {
    values
        .iter()
        .map(|value| {
            value_as_i64(&Value::String(value.clone()))
                .ok_or_else(|| IndexingError::relation(field, format!("\"{}\" is not an id", value)))
        })
        .filter(|id| !matches!(id, Ok(0)))
        .collect()
}
