//! Upstream dialogue engine configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Longest timeout accepted for any upstream call, in seconds.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Upstream dialogue engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the engine (e.g. `http://localhost:5005`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for the status probe in seconds
    #[serde(default = "default_status_timeout")]
    pub status_timeout_secs: u64,

    /// Timeout for chat calls in seconds (covers model inference)
    #[serde(default = "default_chat_timeout")]
    pub chat_timeout_secs: u64,

    /// Timeout for tracker lookups in seconds
    #[serde(default = "default_tracker_timeout")]
    pub tracker_timeout_secs: u64,
}

impl UpstreamConfig {
    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout_secs)
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat_timeout_secs)
    }

    pub fn tracker_timeout(&self) -> Duration {
        Duration::from_secs(self.tracker_timeout_secs)
    }

    /// Validate upstream configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidUpstreamUrl);
        }
        for secs in [
            self.status_timeout_secs,
            self.chat_timeout_secs,
            self.tracker_timeout_secs,
        ] {
            if secs == 0 || secs > MAX_TIMEOUT_SECS {
                return Err(ValidationError::InvalidTimeout);
            }
        }
        Ok(())
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            status_timeout_secs: default_status_timeout(),
            chat_timeout_secs: default_chat_timeout(),
            tracker_timeout_secs: default_tracker_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5005".to_string()
}

fn default_status_timeout() -> u64 {
    5
}

fn default_chat_timeout() -> u64 {
    30
}

fn default_tracker_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_config_defaults() {
        let config = UpstreamConfig::default();
        assert_eq!(config.base_url(), "http://localhost:5005");
        assert_eq!(config.status_timeout(), Duration::from_secs(5));
        assert_eq!(config.chat_timeout(), Duration::from_secs(30));
        assert_eq!(config.tracker_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = UpstreamConfig {
            base_url: "http://engine:5005/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "http://engine:5005");
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = UpstreamConfig {
            base_url: "engine:5005".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidUpstreamUrl)
        ));
    }

    #[test]
    fn test_validation_rejects_zero_or_huge_timeout() {
        let config = UpstreamConfig {
            chat_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = UpstreamConfig {
            status_timeout_secs: 500,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(UpstreamConfig::default().validate().is_ok());
    }
}
