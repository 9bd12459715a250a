//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `DECISION_JOURNAL`
//! prefix and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use decision_journal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Operation timeout: {:?}", config.store.operation_timeout());
//! ```

mod database;
mod error;
mod runtime;
mod store;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use runtime::{Environment, LogFormat, RuntimeConfig};
pub use store::StoreConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Environment and logging
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// PostgreSQL connection pool
    pub database: DatabaseConfig,

    /// Storage call deadline and page sizes
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` if present (development)
    /// 2. Reads variables with the `DECISION_JOURNAL` prefix
    /// 3. Splits nested keys on `__`
    ///
    /// - `DECISION_JOURNAL__DATABASE__URL=...` -> `database.url`
    /// - `DECISION_JOURNAL__STORE__OPERATION_TIMEOUT_SECS=5` -> `store.operation_timeout_secs`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DECISION_JOURNAL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.runtime.validate()?;
        self.database.validate()?;
        self.store.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.runtime.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use std::time::Duration;

    // Environment variables are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "DECISION_JOURNAL__DATABASE__URL",
        "DECISION_JOURNAL__RUNTIME__ENVIRONMENT",
        "DECISION_JOURNAL__RUNTIME__LOG_FORMAT",
        "DECISION_JOURNAL__STORE__OPERATION_TIMEOUT_SECS",
        "DECISION_JOURNAL__STORE__MAX_PAGE_SIZE",
    ];

    fn set_minimal_env() {
        env::set_var(VARS[0], "postgresql://journal@localhost/journal");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn loads_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://journal@localhost/journal");
        assert_eq!(config.runtime.environment, Environment::Development);
        assert_eq!(config.store.operation_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var(VARS[1], "production");
        env::set_var(VARS[2], "json");
        env::set_var(VARS[3], "3");
        env::set_var(VARS[4], "50");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.runtime.log_format, LogFormat::Json);
        assert_eq!(config.store.operation_timeout_secs, 3);
        assert_eq!(config.store.page_limits().max_size, 50);
    }

    #[test]
    fn missing_database_url_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        assert!(AppConfig::load().is_err());
    }

    #[test]
    fn invalid_store_section_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var(VARS[3], "0");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(
            result.unwrap().validate(),
            Err(ValidationError::InvalidOperationTimeout)
        );
    }
}
