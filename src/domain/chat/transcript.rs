//! Conversation transcript.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::relay::{ReplyButton, ReplyFragment};

/// Placeholder shown when a fragment carries nothing to display as text.
pub const NO_RESPONSE_TEXT: &str = "No response";

/// Seed turn after a reset.
pub const RESET_TEXT: &str = "Conversation reset!\n\nHow can I help you?";

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

/// One rendered line of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ReplyButton>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            timestamp: Utc::now(),
            buttons: Vec::new(),
            image: None,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
            timestamp: Utc::now(),
            buttons: Vec::new(),
            image: None,
        }
    }

    /// Bot turn rendered from one reply fragment.
    pub fn from_fragment(fragment: &ReplyFragment) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: fragment.display_text().unwrap_or(NO_RESPONSE_TEXT).to_string(),
            timestamp: Utc::now(),
            buttons: fragment.buttons.clone(),
            image: fragment.image.clone(),
        }
    }

    /// Synthetic bot turn describing a failed chat call.
    pub fn error(message: &str) -> Self {
        Self::bot(format!(
            "Connection error: {}\n\nPlease try again later.",
            message
        ))
    }

    /// Wall-clock time in the local zone, for display.
    pub fn local_time(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }
}

/// Ordered list of turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<Turn>);

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.0.push(turn);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Turn> {
        self.0.get(index)
    }

    pub fn last(&self) -> Option<&Turn> {
        self.0.last()
    }
}
