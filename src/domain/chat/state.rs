//! Chat client state and its reducer.
//!
//! All client-side mutation goes through [`ChatState::apply`]. The reducer
//! never performs I/O; it returns a [`ChatEffect`] describing the call the
//! driver should make, and the call's outcome comes back as another event.

use serde::Serialize;

use super::session_id::SessionId;
use super::status::{ConnectionStatus, ProbeOutcome};
use super::transcript::{Transcript, Turn, RESET_TEXT};
use crate::domain::relay::ReplyFragment;

/// Everything that can happen to a chat client.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// Client started; asks for one status probe.
    Initialized,
    /// The user asked to re-check the relay.
    ProbeRequested,
    /// Input field contents changed.
    InputChanged(String),
    /// The user submitted the current input.
    Submitted,
    /// A quick-reply button on a bot turn was clicked.
    ButtonSelected { turn: usize, button: usize },
    /// The relay answered a chat call.
    ReplyReceived {
        session_id: SessionId,
        fragments: Vec<ReplyFragment>,
    },
    /// A chat call failed.
    ReplyFailed {
        session_id: SessionId,
        message: String,
    },
    /// A status probe finished.
    StatusProbed(ProbeOutcome),
    /// Start over with a new session.
    Reset,
}

/// Work the driver must perform on behalf of the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEffect {
    ProbeStatus,
    SendChat { session_id: SessionId, message: String },
}

/// Complete client state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatState {
    session_id: SessionId,
    transcript: Transcript,
    status: ConnectionStatus,
    input: String,
    pending: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    /// Fresh state with a newly generated session identifier.
    pub fn new() -> Self {
        Self::with_session(SessionId::generate())
    }

    pub fn with_session(session_id: SessionId) -> Self {
        Self {
            session_id,
            transcript: Transcript::new(),
            status: ConnectionStatus::Checking,
            input: String::new(),
            pending: false,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether a UI should enable its send control.
    ///
    /// Submission is disabled while offline to avoid guaranteed-failure round
    /// trips. This is a UI hint only; [`ChatEvent::Submitted`] still goes
    /// through when offline so the outcome can correct a stale status.
    pub fn can_submit(&self) -> bool {
        !self.pending
            && self.status != ConnectionStatus::Offline
            && !self.input.trim().is_empty()
    }

    /// Applies one event and returns the effect to run, if any.
    pub fn apply(&mut self, event: ChatEvent) -> Option<ChatEffect> {
        match event {
            ChatEvent::Initialized | ChatEvent::ProbeRequested => Some(ChatEffect::ProbeStatus),
            ChatEvent::InputChanged(text) => {
                self.input = text;
                None
            }
            ChatEvent::Submitted => self.submit(),
            ChatEvent::ButtonSelected { turn, button } => {
                if let Some(payload) = self
                    .transcript
                    .get(turn)
                    .and_then(|t| t.buttons.get(button))
                    .map(|b| b.payload.clone())
                {
                    self.input = payload;
                }
                None
            }
            ChatEvent::ReplyReceived {
                session_id,
                fragments,
            } => {
                self.pending = false;
                if session_id != self.session_id {
                    tracing::debug!(stale = %session_id, "Dropping reply for a previous session");
                    return None;
                }
                for fragment in &fragments {
                    self.transcript.push(Turn::from_fragment(fragment));
                }
                self.status = ConnectionStatus::Online;
                None
            }
            ChatEvent::ReplyFailed {
                session_id,
                message,
            } => {
                self.pending = false;
                if session_id != self.session_id {
                    tracing::debug!(stale = %session_id, "Dropping failure for a previous session");
                    return None;
                }
                self.transcript.push(Turn::error(&message));
                self.status = ConnectionStatus::Offline;
                None
            }
            ChatEvent::StatusProbed(outcome) => {
                self.status = outcome.into();
                None
            }
            ChatEvent::Reset => {
                self.session_id = SessionId::regenerate(&self.session_id);
                self.transcript.clear();
                self.transcript.push(Turn::bot(RESET_TEXT));
                None
            }
        }
    }

    fn submit(&mut self) -> Option<ChatEffect> {
        if self.pending || self.input.trim().is_empty() {
            return None;
        }

        let message = std::mem::take(&mut self.input);
        self.transcript.push(Turn::user(message.clone()));
        self.pending = true;

        Some(ChatEffect::SendChat {
            session_id: self.session_id.clone(),
            message,
        })
    }
}
