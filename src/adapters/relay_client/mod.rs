//! Relay Client Adapters.
//!
//! - `HttpRelayClient` - Calls the relay's HTTP API
//! - `MockRelayClient` - Configurable mock for testing

mod http_client;
mod mock_client;

pub use http_client::HttpRelayClient;
pub use mock_client::MockRelayClient;
