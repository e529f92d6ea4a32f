//! Domain layer containing relay and chat types.
//!
//! # Module Organization
//!
//! - `relay` - Chat requests, reply fragments, and client-facing relay errors
//! - `chat` - Client-side session, transcript, connection status, and reducer

pub mod chat;
pub mod relay;
