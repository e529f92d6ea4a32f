//! Advisory connection status held by the chat client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status derived from the most recent probe or chat outcome.
///
/// Never authoritative: a submit is always allowed to try and correct it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Checking,
    Online,
    Offline,
    Error,
}

impl ConnectionStatus {
    /// Human-readable label for status indicators.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Checking => "Checking...",
            ConnectionStatus::Online => "Connected",
            ConnectionStatus::Offline => "Disconnected",
            ConnectionStatus::Error => "Error",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a status probe, as observed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The relay answered with success.
    Reachable,
    /// The relay answered, but with an error status.
    Rejected,
    /// The relay could not be reached at all.
    Unreachable,
}

impl From<ProbeOutcome> for ConnectionStatus {
    fn from(outcome: ProbeOutcome) -> Self {
        match outcome {
            ProbeOutcome::Reachable => ConnectionStatus::Online,
            ProbeOutcome::Rejected => ConnectionStatus::Error,
            ProbeOutcome::Unreachable => ConnectionStatus::Offline,
        }
    }
}
