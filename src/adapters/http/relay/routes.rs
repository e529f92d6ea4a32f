//! Route configuration for relay endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::config::FeatureFlags;

use super::handlers::{conversation_tracker, engine_status, health, relay_chat, RelayAppState};

/// Creates the relay router.
///
/// Routes:
/// - `GET /health` - Relay liveness
/// - `GET /api`, `GET /api/`, `GET /api/status` - Engine status
/// - `POST /api/chat` - Relay a chat message
/// - `GET /api/conversations/:sender/tracker` - Tracker passthrough (when enabled)
pub fn relay_router(features: &FeatureFlags) -> Router<RelayAppState> {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api", get(engine_status))
        .route("/api/", get(engine_status))
        .route("/api/status", get(engine_status))
        .route("/api/chat", post(relay_chat));

    if features.enable_tracker {
        router.route("/api/conversations/:sender/tracker", get(conversation_tracker))
    } else {
        router
    }
}
