//! Section/key configuration read from a JSON document.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::AppError;
use search_core_shared::{value_as_string, ConfigurationContainer};

/// Configuration loaded from `{"section": {"key": value}}`.
///
/// Scalar values are kept as strings; nested objects and arrays are
/// rejected at load time.
#[derive(Debug, Clone, Default)]
pub struct JsonConfiguration {
    sections: HashMap<String, HashMap<String, String>>,
}

impl JsonConfiguration {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let document: Value = serde_json::from_str(json)?;
        let Value::Object(sections) = document else {
            return Err(AppError::config("configuration must be a JSON object"));
        };

        let mut parsed = HashMap::with_capacity(sections.len());
        for (section, entries) in sections {
            let Value::Object(entries) = entries else {
                return Err(AppError::config(format!(
                    "configuration section \"{}\" must be an object",
                    section
                )));
            };

            let mut values = HashMap::with_capacity(entries.len());
            for (key, value) in entries {
                if value.is_null() {
                    continue;
                }
                let value = value_as_string(&value).ok_or_else(|| {
                    AppError::config(format!(
                        "configuration option {}.{} must be a scalar",
                        section, key
                    ))
                })?;
                values.insert(key, value);
            }
            parsed.insert(section, values);
        }

        Ok(Self { sections: parsed })
    }

    pub async fn from_file(path: &Path) -> Result<Self, AppError> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }
}

impl ConfigurationContainer for JsonConfiguration {
    fn get_if_exists(&self, section: &str, key: &str) -> Option<String> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(key))
            .cloned()
    }
}
