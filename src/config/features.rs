//! Feature flags configuration
//!
//! One relay implementation covers every deployment variant; these flags pick
//! the CORS policy, how much each relayed message is logged, and which
//! optional endpoints are mounted.

use serde::Deserialize;

use super::error::ValidationError;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Cross-origin policy for browser clients
    #[serde(default)]
    pub cors: CorsPolicy,

    /// Allowed origins when `cors` is `restricted` (comma-separated)
    pub cors_origins: Option<String>,

    /// Log sender and message contents for every relayed chat
    #[serde(default)]
    pub verbose_logging: bool,

    /// Serve generated API documentation under `/api/docs`
    #[serde(default)]
    pub enable_docs: bool,

    /// Mount the conversation tracker passthrough
    #[serde(default = "default_true")]
    pub enable_tracker: bool,
}

/// Cross-origin policy
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorsPolicy {
    /// Any origin, any method, any header
    #[default]
    Permissive,
    /// Only the origins listed in `cors_origins`
    Restricted,
    /// No CORS headers at all
    Disabled,
}

impl FeatureFlags {
    /// Get CORS origins as a vector
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate feature flags
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cors == CorsPolicy::Restricted && self.cors_origins_list().is_empty() {
            return Err(ValidationError::MissingRequired("CORS_ORIGINS"));
        }
        Ok(())
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            cors: CorsPolicy::default(),
            cors_origins: None,
            verbose_logging: false,
            enable_docs: false,
            enable_tracker: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert_eq!(flags.cors, CorsPolicy::Permissive);
        assert!(!flags.verbose_logging);
        assert!(!flags.enable_docs);
        assert!(flags.enable_tracker);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let json = r#"{
            "cors": "restricted",
            "cors_origins": "http://localhost:5173",
            "verbose_logging": true,
            "enable_docs": true
        }"#;

        let flags: FeatureFlags = serde_json::from_str(json).unwrap();
        assert_eq!(flags.cors, CorsPolicy::Restricted);
        assert!(flags.verbose_logging);
        assert!(flags.enable_docs);
        assert!(flags.enable_tracker);
    }

    #[test]
    fn test_cors_origins_parsing() {
        let flags = FeatureFlags {
            cors_origins: Some("http://localhost:5173, http://localhost:3000,".to_string()),
            ..Default::default()
        };
        let origins = flags.cors_origins_list();
        assert_eq!(origins, vec!["http://localhost:5173", "http://localhost:3000"]);
    }

    #[test]
    fn test_restricted_cors_requires_origins() {
        let flags = FeatureFlags {
            cors: CorsPolicy::Restricted,
            ..Default::default()
        };
        assert!(flags.validate().is_err());
    }
}
