//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHAT_RELAY` prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use chat_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Relaying to {}", config.upstream.base_url());
//! ```

mod client;
mod error;
mod features;
mod server;
mod upstream;

pub use client::ClientConfig;
pub use error::{ConfigError, ValidationError};
pub use features::{CorsPolicy, FeatureFlags};
pub use server::{LogFormat, ServerConfig};
pub use upstream::UpstreamConfig;

use serde::Deserialize;
use std::env;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging, static files)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream dialogue engine (base URL, timeouts)
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Feature flags (CORS, verbosity, optional endpoints)
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CHAT_RELAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Applies the plain `PORT` and `RASA_API` variables on top, as set by
    ///    existing deployments
    ///
    /// # Environment Variable Format
    ///
    /// - `CHAT_RELAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CHAT_RELAY__UPSTREAM__BASE_URL=...` -> `upstream.base_url = ...`
    /// - `CHAT_RELAY__FEATURES__ENABLE_DOCS=true` -> `features.enable_docs = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHAT_RELAY")
                    .separator("__"),
            )
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("upstream.base_url", env::var("RASA_API").ok())?
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.upstream.validate()?;
        self.features.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "PORT",
        "RASA_API",
        "CHAT_RELAY__SERVER__PORT",
        "CHAT_RELAY__SERVER__LOG_FORMAT",
        "CHAT_RELAY__UPSTREAM__BASE_URL",
        "CHAT_RELAY__UPSTREAM__CHAT_TIMEOUT_SECS",
        "CHAT_RELAY__FEATURES__ENABLE_DOCS",
        "CHAT_RELAY__FEATURES__CORS",
    ];

    /// Helper to clear environment variables before and after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.base_url(), "http://localhost:5005");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_nested_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("CHAT_RELAY__SERVER__PORT", "8080");
        env::set_var("CHAT_RELAY__UPSTREAM__BASE_URL", "http://engine:5005");
        env::set_var("CHAT_RELAY__UPSTREAM__CHAT_TIMEOUT_SECS", "60");
        env::set_var("CHAT_RELAY__FEATURES__ENABLE_DOCS", "true");
        env::set_var("CHAT_RELAY__FEATURES__CORS", "disabled");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upstream.base_url(), "http://engine:5005");
        assert_eq!(config.upstream.chat_timeout_secs, 60);
        assert!(config.features.enable_docs);
        assert_eq!(config.features.cors, CorsPolicy::Disabled);
    }

    #[test]
    fn test_plain_deployment_variables_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("CHAT_RELAY__SERVER__PORT", "8080");
        env::set_var("PORT", "4000");
        env::set_var("RASA_API", "http://rasa.internal:5005");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.upstream.base_url(), "http://rasa.internal:5005");
    }

    #[test]
    fn test_load_json_log_format() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("CHAT_RELAY__SERVER__LOG_FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.log_format, LogFormat::Json);
    }
}
