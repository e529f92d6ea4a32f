//! Relay domain - the message-relay proxy contract.
//!
//! Request validation, reply fragments, and the classified errors the relay
//! hands back to its callers.

mod errors;
mod reply;
mod request;

pub use errors::{ProxyError, ProxyErrorKind};
pub use reply::{ReplyButton, ReplyFragment, UpstreamReply};
pub use request::{ChatRequest, ChatRequestError};

impl From<ChatRequestError> for ProxyError {
    fn from(err: ChatRequestError) -> Self {
        ProxyError::invalid_request(err.to_string())
    }
}
