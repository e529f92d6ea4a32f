//! ProbeStatusHandler - Check whether the dialogue engine is answering

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::domain::relay::ProxyError;
use crate::ports::DialogueEngine;

/// Handler for the upstream status probe.
pub struct ProbeStatusHandler {
    engine: Arc<dyn DialogueEngine>,
}

impl ProbeStatusHandler {
    pub fn new(engine: Arc<dyn DialogueEngine>) -> Self {
        Self { engine }
    }

    /// Returns the engine's status payload as received.
    ///
    /// Any failure, including a timeout or an error status, is reported as
    /// `UpstreamUnavailable` with the endpoint and the underlying message.
    pub async fn handle(&self) -> Result<Value, ProxyError> {
        let started = Instant::now();
        let result = self.engine.status().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(payload) => {
                tracing::debug!(operation = "status", outcome = "ok", elapsed_ms);
                Ok(payload)
            }
            Err(e) => {
                tracing::warn!(
                    operation = "status",
                    outcome = "unavailable",
                    elapsed_ms,
                    "Error checking dialogue engine status: {}",
                    e
                );
                Err(ProxyError::upstream_unavailable(
                    self.engine.endpoint(),
                    e.to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::dialogue::MockDialogueEngine;
    use crate::domain::relay::ProxyErrorKind;
    use crate::ports::EngineError;
    use serde_json::json;

    #[tokio::test]
    async fn returns_engine_payload() {
        let engine = MockDialogueEngine::new().with_status(Ok(json!("Hello from Rasa: 3.6.0")));
        let handler = ProbeStatusHandler::new(Arc::new(engine));
        assert_eq!(handler.handle().await.unwrap(), json!("Hello from Rasa: 3.6.0"));
    }

    #[tokio::test]
    async fn failure_is_unavailable_with_endpoint_and_cause() {
        let engine = MockDialogueEngine::new()
            .with_status(Err(EngineError::unreachable("mock://dialogue-engine", "refused")));
        let handler = ProbeStatusHandler::new(Arc::new(engine));

        let err = handler.handle().await.unwrap_err();
        assert_eq!(err.kind(), ProxyErrorKind::UpstreamUnavailable);
        assert_eq!(err.http_status(), 503);
        let details = err.details().unwrap();
        assert_eq!(details["endpoint"], "mock://dialogue-engine");
        assert!(details["cause"].as_str().unwrap().contains("refused"));
    }

    #[tokio::test]
    async fn timeout_is_also_unavailable() {
        let engine = MockDialogueEngine::new()
            .with_status(Err(EngineError::timeout("mock://dialogue-engine", 5)));
        let handler = ProbeStatusHandler::new(Arc::new(engine));

        let err = handler.handle().await.unwrap_err();
        assert_eq!(err.kind(), ProxyErrorKind::UpstreamUnavailable);
    }
}
