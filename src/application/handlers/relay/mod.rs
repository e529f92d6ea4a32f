//! Relay Command and Query Handlers
//!
//! One handler per relay operation. Each catches every engine failure and
//! returns it as a classified [`ProxyError`].
//!
//! ## Commands
//! - `RelayChat` - Validate a message and forward it to the engine
//!
//! ## Queries
//! - `ProbeStatus` - Engine status passthrough
//! - `FetchTracker` - Conversation tracker passthrough

mod fetch_tracker;
mod probe_status;
mod relay_chat;

pub use fetch_tracker::{FetchTrackerHandler, FetchTrackerQuery};
pub use probe_status::ProbeStatusHandler;
pub use relay_chat::{RelayChatCommand, RelayChatHandler};

use crate::domain::relay::ProxyError;
use crate::ports::EngineError;

/// Maps an engine failure on the chat path to its client-facing kind.
pub(crate) fn classify_engine_error(error: EngineError, endpoint: &str) -> ProxyError {
    match error {
        EngineError::Unreachable { message, .. } => {
            ProxyError::upstream_unavailable(endpoint, message)
        }
        EngineError::Timeout { timeout_secs, .. } => {
            ProxyError::upstream_timeout(endpoint, timeout_secs)
        }
        EngineError::Status { status, body } => ProxyError::upstream_error(status, body),
        EngineError::Decode(message) => {
            ProxyError::relay_failure(format!("Invalid reply from dialogue engine: {}", message))
        }
        EngineError::Transport(message) => {
            ProxyError::relay_failure(format!("Internal error: {}", message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::relay::ProxyErrorKind;
    use serde_json::Value;

    #[test]
    fn every_engine_error_has_a_kind() {
        let cases = [
            (EngineError::unreachable("e", "refused"), ProxyErrorKind::UpstreamUnavailable),
            (EngineError::timeout("e", 30), ProxyErrorKind::UpstreamTimeout),
            (EngineError::status(500, Value::Null), ProxyErrorKind::UpstreamError),
            (EngineError::Decode("bad".into()), ProxyErrorKind::RelayFailure),
            (EngineError::Transport("reset".into()), ProxyErrorKind::RelayFailure),
        ];

        for (error, kind) in cases {
            assert_eq!(classify_engine_error(error, "e").kind(), kind);
        }
    }
}
