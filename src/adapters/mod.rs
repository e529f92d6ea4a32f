//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `dialogue` - Dialogue engine clients (REST, mock)
//! - `http` - Axum router for the relay API and static front end
//! - `relay_client` - Relay clients used by the chat client (HTTP, mock)

pub mod dialogue;
pub mod http;
pub mod relay_client;

pub use dialogue::{MockDialogueEngine, RestDialogueEngine};
pub use http::{build_router, RelayAppState};
pub use relay_client::{HttpRelayClient, MockRelayClient};
