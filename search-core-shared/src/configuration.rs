//! Configuration container seam.
//!
//! Configuration is addressed by section and key, e.g. `index.rootLineBlacklist`
//! or `index.tt_content` for a table specific where fragment.

use std::collections::HashMap;

use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A required option is not set.
    #[error("Configuration option {section}.{key} is not set")]
    Missing { section: String, key: String },

    /// A configuration value or file could not be interpreted.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigurationError {
    pub fn missing(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Missing {
            section: section.into(),
            key: key.into(),
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Read access to section/key configuration.
pub trait ConfigurationContainer: Send + Sync {
    /// Return the value for `section.key` or `None` if it is not configured.
    fn get_if_exists(&self, section: &str, key: &str) -> Option<String>;

    /// Return the value for `section.key`, failing if it is not configured.
    fn get(&self, section: &str, key: &str) -> Result<String, ConfigurationError> {
        self.get_if_exists(section, key)
            .ok_or_else(|| ConfigurationError::missing(section, key))
    }
}

/// In-memory configuration.
#[derive(Debug, Clone, Default)]
pub struct MapConfiguration {
    sections: HashMap<String, HashMap<String, String>>,
}

impl MapConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the configuration with `section.key` set.
    pub fn with(
        mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set(section, key, value);
        self
    }

    pub fn set(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(key.into(), value.into());
    }
}

impl ConfigurationContainer for MapConfiguration {
    fn get_if_exists(&self, section: &str, key: &str) -> Option<String> {
        self.sections
            .get(section)
            .and_then(|values| values.get(key))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_if_exists() {
        let config = MapConfiguration::new().with("index", "rootLineBlacklist", "3,4");

        assert_eq!(
            config.get_if_exists("index", "rootLineBlacklist"),
            Some("3,4".to_string())
        );
        assert_eq!(config.get_if_exists("index", "tt_content"), None);
        assert_eq!(config.get_if_exists("connection", "host"), None);
    }

    #[test]
    fn test_get_missing_fails() {
        let config = MapConfiguration::new();

        let err = config.get("index", "tt_content").unwrap_err();
        assert_eq!(err, ConfigurationError::missing("index", "tt_content"));
    }
}
