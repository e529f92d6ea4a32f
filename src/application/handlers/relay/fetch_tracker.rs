//! FetchTrackerHandler - Pass a sender's conversation tracker through

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::domain::relay::ProxyError;
use crate::ports::DialogueEngine;

/// Query for one sender's conversation tracker.
#[derive(Debug, Clone)]
pub struct FetchTrackerQuery {
    pub sender: String,
}

/// Handler for the tracker passthrough.
pub struct FetchTrackerHandler {
    engine: Arc<dyn DialogueEngine>,
}

impl FetchTrackerHandler {
    pub fn new(engine: Arc<dyn DialogueEngine>) -> Self {
        Self { engine }
    }

    /// Returns the tracker payload as received.
    ///
    /// An empty sender is `InvalidRequest`; every upstream failure is a
    /// generic `RelayFailure` wrapping the underlying message.
    pub async fn handle(&self, query: FetchTrackerQuery) -> Result<Value, ProxyError> {
        if query.sender.is_empty() {
            return Err(ProxyError::invalid_request("Field \"sender\" is required"));
        }

        let started = Instant::now();
        let result = self.engine.tracker(&query.sender).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        result
            .map(|tracker| {
                tracing::debug!(operation = "tracker", outcome = "ok", elapsed_ms);
                tracker
            })
            .map_err(|e| {
                tracing::warn!(operation = "tracker", outcome = "failed", elapsed_ms, "{}", e);
                ProxyError::relay_failure(format!("Failed to fetch conversation: {}", e))
            })
    }
}
