//! Chat Relay - HTTP relay in front of a REST dialogue engine
//!
//! The relay validates chat messages, forwards them to the engine, and
//! reports every failure in one classified error shape. The chat client
//! keeps a session transcript and talks to the relay.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
