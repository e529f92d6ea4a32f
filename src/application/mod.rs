//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Relay handlers serve the HTTP API; the chat client driver runs the
//! client-side state on behalf of a front end.

pub mod chat_client;
pub mod handlers;

pub use chat_client::{ChatClient, ChatClientClosed, ChatCommand};
pub use handlers::{
    FetchTrackerHandler, FetchTrackerQuery, ProbeStatusHandler, RelayChatCommand,
    RelayChatHandler,
};
