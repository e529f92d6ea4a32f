//! Validated chat request.

use serde::Serialize;

/// Reasons a chat request is rejected before it is forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ChatRequestError {
    #[error("Fields \"sender\" and \"message\" are required")]
    MissingSender,

    #[error("Fields \"sender\" and \"message\" are required")]
    MissingMessage,
}

/// A chat message ready to be forwarded upstream.
///
/// Both fields are guaranteed non-empty; the only way to build one is
/// [`ChatRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    sender: String,
    message: String,
}

impl ChatRequest {
    /// Validates raw, possibly absent fields.
    ///
    /// Empty strings count as missing. Whitespace is not trimmed; a message
    /// of spaces is still forwarded as the client sent it.
    pub fn new(sender: Option<String>, message: Option<String>) -> Result<Self, ChatRequestError> {
        let sender = sender
            .filter(|s| !s.is_empty())
            .ok_or(ChatRequestError::MissingSender)?;
        let message = message
            .filter(|m| !m.is_empty())
            .ok_or(ChatRequestError::MissingMessage)?;
        Ok(Self { sender, message })
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
