//! Chat client configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::{ConfigError, ValidationError};

/// Configuration for the terminal chat client
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the relay service
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    /// Timeout for one chat round trip in seconds.
    ///
    /// Slightly above the relay's own upstream timeout so the relay gets to
    /// report its timeout first.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from `CHAT_CLIENT__*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHAT_CLIENT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Relay URL without a trailing slash
    pub fn relay_url(&self) -> &str {
        self.relay_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.relay_url.starts_with("http://") && !self.relay_url.starts_with("https://") {
            return Err(ValidationError::InvalidRelayUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_relay_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    35
}
