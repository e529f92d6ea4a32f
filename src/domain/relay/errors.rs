//! Client-facing relay errors.
//!
//! Every failed relay call resolves to exactly one [`ProxyError`]. The kind
//! decides the HTTP status; the message and optional details are what the
//! caller gets to see.

use serde::Serialize;
use serde_json::{json, Value};

/// Classification of a failed relay call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyErrorKind {
    /// Missing or empty request fields. No upstream call was made.
    InvalidRequest,
    /// Upstream refused the connection or could not be reached.
    UpstreamUnavailable,
    /// Upstream did not answer within the configured timeout.
    UpstreamTimeout,
    /// Upstream answered with a non-2xx status.
    UpstreamError,
    /// Anything else.
    RelayFailure,
}

impl ProxyErrorKind {
    /// Default HTTP status for this kind.
    ///
    /// `UpstreamError` mirrors the upstream status instead, see
    /// [`ProxyError::upstream_error`].
    pub fn default_status(&self) -> u16 {
        match self {
            ProxyErrorKind::InvalidRequest => 400,
            ProxyErrorKind::UpstreamUnavailable => 503,
            ProxyErrorKind::UpstreamTimeout => 504,
            ProxyErrorKind::UpstreamError => 502,
            ProxyErrorKind::RelayFailure => 500,
        }
    }
}

/// A classified relay failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ProxyError {
    kind: ProxyErrorKind,
    http_status: u16,
    message: String,
    details: Option<Value>,
}

impl ProxyError {
    fn new(kind: ProxyErrorKind, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            kind,
            http_status: kind.default_status(),
            message: message.into(),
            details,
        }
    }

    /// Request rejected before any upstream call.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProxyErrorKind::InvalidRequest, message, None)
    }

    /// Upstream could not be reached.
    pub fn upstream_unavailable(endpoint: &str, cause: impl Into<String>) -> Self {
        Self::new(
            ProxyErrorKind::UpstreamUnavailable,
            "Dialogue engine unavailable",
            Some(json!({
                "endpoint": endpoint,
                "cause": cause.into(),
            })),
        )
    }

    /// Upstream exceeded the timeout for this operation.
    pub fn upstream_timeout(endpoint: &str, timeout_secs: u64) -> Self {
        Self::new(
            ProxyErrorKind::UpstreamTimeout,
            format!("Dialogue engine did not respond within {}s", timeout_secs),
            Some(json!({
                "endpoint": endpoint,
                "timeout_secs": timeout_secs,
            })),
        )
    }

    /// Upstream answered with a non-2xx status. The status is mirrored and
    /// the upstream body is forwarded as details.
    ///
    /// Statuses outside the 4xx/5xx error range cannot be mirrored as an
    /// error and are reported as 502.
    pub fn upstream_error(status: u16, body: Value) -> Self {
        let http_status = if (400..=599).contains(&status) {
            status
        } else {
            ProxyErrorKind::UpstreamError.default_status()
        };
        Self {
            kind: ProxyErrorKind::UpstreamError,
            http_status,
            message: format!("Dialogue engine responded with status {}", status),
            details: if body.is_null() { None } else { Some(body) },
        }
    }

    /// Catch-all failure. Only the message reaches the client.
    pub fn relay_failure(message: impl Into<String>) -> Self {
        Self::new(ProxyErrorKind::RelayFailure, message, None)
    }

    pub fn kind(&self) -> ProxyErrorKind {
        self.kind
    }

    pub fn http_status(&self) -> u16 {
        self.http_status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}
