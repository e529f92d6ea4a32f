//! Request and response DTOs for the relay endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::handlers::RelayChatCommand;
use crate::domain::relay::{ProxyError, ProxyErrorKind};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/chat`.
///
/// Both fields are optional here so that missing fields reach the handler's
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequestBody {
    pub sender: Option<String>,
    pub message: Option<String>,
}

impl From<ChatRequestBody> for RelayChatCommand {
    fn from(body: ChatRequestBody) -> Self {
        RelayChatCommand {
            sender: body.sender,
            message: body.message,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub upstream_endpoint: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn ok(service: impl Into<String>, upstream_endpoint: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.into(),
            upstream_endpoint: upstream_endpoint.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Error body shared by every relay endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error classification.
    pub kind: ProxyErrorKind,
    /// Human-readable error message.
    pub error: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<&ProxyError> for ErrorResponse {
    fn from(err: &ProxyError) -> Self {
        Self {
            kind: err.kind(),
            error: err.message().to_string(),
            details: err.details().cloned(),
        }
    }
}
