//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DialogueEngine` - The upstream conversational service the relay fronts
//! - `RelayClient` - How the chat client reaches the relay

mod dialogue_engine;
mod relay_client;

pub use dialogue_engine::{DialogueEngine, EngineError};
pub use relay_client::{RelayClient, RelayClientError};
