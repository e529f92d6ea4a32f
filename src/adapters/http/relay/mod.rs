//! HTTP adapter for the relay.
//!
//! # Endpoints
//!
//! - `GET /health` - Relay liveness, independent of the engine
//! - `GET /api/`, `GET /api/status` - Engine status passthrough
//! - `POST /api/chat` - Relay a chat message
//! - `GET /api/conversations/{sender}/tracker` - Tracker passthrough

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{RelayApiError, RelayAppState, SERVICE_NAME};
pub use routes::relay_router;
