//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod relay;

pub use relay::{
    FetchTrackerHandler, FetchTrackerQuery, ProbeStatusHandler, RelayChatCommand,
    RelayChatHandler,
};
