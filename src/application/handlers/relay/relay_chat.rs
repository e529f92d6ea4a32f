//! RelayChatHandler - Validate a chat message and forward it upstream

use std::sync::Arc;
use std::time::Instant;

use crate::domain::relay::{ChatRequest, ProxyError, UpstreamReply};
use crate::ports::DialogueEngine;

use super::classify_engine_error;

/// Command to relay one chat message.
///
/// Fields are raw client input; validation happens in the handler.
#[derive(Debug, Clone, Default)]
pub struct RelayChatCommand {
    pub sender: Option<String>,
    pub message: Option<String>,
}

impl RelayChatCommand {
    pub fn new(sender: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sender: Some(sender.into()),
            message: Some(message.into()),
        }
    }
}

/// Handler for relaying chat messages.
pub struct RelayChatHandler {
    engine: Arc<dyn DialogueEngine>,
    verbose_logging: bool,
}

impl RelayChatHandler {
    pub fn new(engine: Arc<dyn DialogueEngine>) -> Self {
        Self {
            engine,
            verbose_logging: false,
        }
    }

    /// Logs sender and message contents for every call.
    pub fn with_verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose_logging = verbose;
        self
    }

    /// Validates, forwards, and classifies the outcome.
    ///
    /// Invalid input is rejected before any upstream call. On success the
    /// engine's fragments are returned in the order received.
    pub async fn handle(&self, cmd: RelayChatCommand) -> Result<UpstreamReply, ProxyError> {
        let request = ChatRequest::new(cmd.sender, cmd.message).map_err(|e| {
            tracing::debug!(operation = "chat", outcome = "invalid_request", "{}", e);
            ProxyError::from(e)
        })?;

        if self.verbose_logging {
            tracing::info!(
                operation = "chat",
                sender = request.sender(),
                message = request.message(),
                "Relaying message"
            );
        }

        let started = Instant::now();
        let result = self.engine.send_message(&request).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(reply) => {
                if self.verbose_logging {
                    tracing::info!(
                        operation = "chat",
                        outcome = "ok",
                        fragments = reply.len(),
                        elapsed_ms,
                        "Engine replied"
                    );
                } else {
                    tracing::info!(operation = "chat", outcome = "ok", elapsed_ms);
                }
                Ok(reply)
            }
            Err(e) => {
                let error = classify_engine_error(e, self.engine.endpoint());
                tracing::warn!(
                    operation = "chat",
                    outcome = ?error.kind(),
                    status = error.http_status(),
                    elapsed_ms,
                    "{}",
                    error
                );
                Err(error)
            }
        }
    }
}
