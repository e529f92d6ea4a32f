//! Relay Client Port - How the chat client reaches the relay service.

use async_trait::async_trait;

use crate::domain::chat::{ProbeOutcome, SessionId};
use crate::domain::relay::ReplyFragment;

/// Port used by the chat client driver.
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Checks whether the relay (and through it, the engine) is answering.
    async fn probe_status(&self) -> ProbeOutcome;

    /// Sends one chat message and returns the reply fragments in order.
    async fn send_chat(
        &self,
        session_id: &SessionId,
        message: &str,
    ) -> Result<Vec<ReplyFragment>, RelayClientError>;
}

/// Failures seen by the chat client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayClientError {
    /// The relay could not be reached.
    #[error("{0}")]
    Unreachable(String),

    /// The relay answered with an error status.
    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The relay's success body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),
}
