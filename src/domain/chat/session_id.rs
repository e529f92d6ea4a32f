//! Client-chosen session identifier.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Opaque identifier correlating a user's turns with one upstream
/// conversation.
///
/// Format: `user_<unix millis>_<random suffix><sequence>`. The process-wide
/// sequence keeps two identifiers generated in the same millisecond apart
/// even if the random part collides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let random = Uuid::new_v4().simple().to_string();
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("user_{}_{}{:x}", millis, &random[..9], seq))
    }

    /// Generates an identifier guaranteed to differ from `previous`.
    pub fn regenerate(previous: &SessionId) -> Self {
        loop {
            let next = Self::generate();
            if &next != previous {
                return next;
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
