//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `AGORA_` prefix
//! and nested values use double underscores as separators, e.g.
//! `AGORA_DATABASE__URL=sqlite://agora.db`.

mod database;
mod error;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (SQLite connection)
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required values are missing or malformed.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("AGORA").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validates all configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config_passes_validation() {
        let config = AppConfig {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                ..Default::default()
            },
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_database_fails_validation() {
        let config = AppConfig {
            database: DatabaseConfig::default(),
        };
        assert!(config.validate().is_err());
    }
}
