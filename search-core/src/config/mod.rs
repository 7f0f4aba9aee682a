//! Configuration loading and dependency wiring.

mod dependencies;
mod json_configuration;
mod settings;

pub use dependencies::Dependencies;
pub use json_configuration::JsonConfiguration;
pub use settings::Settings;
