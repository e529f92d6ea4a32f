//! Chat client domain.
//!
//! The client's transcript, session identifier and connection status, kept in
//! one [`ChatState`] and changed only through [`ChatEvent`]s.

mod session_id;
mod state;
mod status;
mod transcript;

pub use session_id::SessionId;
pub use state::{ChatEffect, ChatEvent, ChatState};
pub use status::{ConnectionStatus, ProbeOutcome};
pub use transcript::{Speaker, Transcript, Turn, NO_RESPONSE_TEXT, RESET_TEXT};
