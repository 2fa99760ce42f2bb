//! Configuration management for Librarium

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::rules::Policy;

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Path to the JSON snapshot file.
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix LIBRARIUM_)
            .add_source(
                Environment::with_prefix("LIBRARIUM")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override storage path from LIBRARIUM_DATA env var if present
            .set_override_option("storage.path", env::var("LIBRARIUM_DATA").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "data/library.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_a_valid_policy() {
        let config = AppConfig::default();
        config.policy.validate().unwrap();
        assert_eq!(config.storage.path, "data/library.json");
        assert_eq!(config.logging.level, "info");
    }
}
