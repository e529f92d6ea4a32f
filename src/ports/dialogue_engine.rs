//! Dialogue Engine Port - Interface to the upstream conversational service.
//!
//! The relay talks to exactly one engine over three calls: a status probe, the
//! REST webhook that turns a message into reply fragments, and a tracker
//! lookup for one sender's conversation.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoEngine;
//!
//! #[async_trait]
//! impl DialogueEngine for EchoEngine {
//!     async fn send_message(&self, request: &ChatRequest) -> Result<UpstreamReply, EngineError> {
//!         Ok(vec![json!({"text": request.message()})])
//!     }
//!     // ... other methods
//! }
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::relay::{ChatRequest, UpstreamReply};

/// Port for the upstream dialogue engine.
///
/// Implementations must bound every call with a timeout and report it as
/// [`EngineError::Timeout`] rather than waiting indefinitely.
#[async_trait]
pub trait DialogueEngine: Send + Sync {
    /// Probes the engine's root/status endpoint, returning its payload as is.
    async fn status(&self) -> Result<Value, EngineError>;

    /// Forwards one message to the REST webhook.
    async fn send_message(&self, request: &ChatRequest) -> Result<UpstreamReply, EngineError>;

    /// Fetches the conversation tracker for one sender, returning its payload as is.
    async fn tracker(&self, sender: &str) -> Result<Value, EngineError>;

    /// Base URL of the engine, for diagnostics.
    fn endpoint(&self) -> &str;
}

/// Dialogue engine errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Connection refused, DNS failure, or otherwise unreachable.
    #[error("connection to {endpoint} failed: {message}")]
    Unreachable {
        endpoint: String,
        message: String,
    },

    /// The call exceeded its timeout.
    #[error("request to {endpoint} timed out after {timeout_secs}s")]
    Timeout {
        endpoint: String,
        timeout_secs: u64,
    },

    /// The engine answered with a non-2xx status.
    #[error("engine responded with status {status}")]
    Status {
        status: u16,
        /// Response body, parsed as JSON when possible, else a JSON string.
        body: Value,
    },

    /// The engine answered 2xx with a body that could not be decoded.
    #[error("invalid engine response: {0}")]
    Decode(String),

    /// Any other transport failure.
    #[error("engine request failed: {0}")]
    Transport(String),
}

impl EngineError {
    /// Creates an unreachable error.
    pub fn unreachable(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unreachable {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            endpoint: endpoint.into(),
            timeout_secs,
        }
    }

    /// Creates a status error.
    pub fn status(status: u16, body: Value) -> Self {
        Self::Status { status, body }
    }
}
