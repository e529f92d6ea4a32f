//! HTTP handlers for relay endpoints.
//!
//! These handlers connect Axum routes to the relay command/query handlers.
//! Every failure leaves here as a [`ProxyError`] in the shared error shape.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    FetchTrackerHandler, FetchTrackerQuery, ProbeStatusHandler, RelayChatCommand,
    RelayChatHandler,
};
use crate::config::FeatureFlags;
use crate::domain::relay::ProxyError;
use crate::ports::DialogueEngine;

use super::dto::{ChatRequestBody, ErrorResponse, HealthResponse};

pub const SERVICE_NAME: &str = "chat-relay";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the relay endpoints.
#[derive(Clone)]
pub struct RelayAppState {
    pub chat_handler: Arc<RelayChatHandler>,
    pub status_handler: Arc<ProbeStatusHandler>,
    pub tracker_handler: Arc<FetchTrackerHandler>,
    pub upstream_endpoint: String,
}

impl RelayAppState {
    pub fn new(engine: Arc<dyn DialogueEngine>, features: &FeatureFlags) -> Self {
        Self {
            chat_handler: Arc::new(
                RelayChatHandler::new(engine.clone())
                    .with_verbose_logging(features.verbose_logging),
            ),
            status_handler: Arc::new(ProbeStatusHandler::new(engine.clone())),
            tracker_handler: Arc::new(FetchTrackerHandler::new(engine.clone())),
            upstream_endpoint: engine.endpoint().to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness of the relay itself; never touches the engine
pub async fn health(State(state): State<RelayAppState>) -> impl IntoResponse {
    Json(HealthResponse::ok(SERVICE_NAME, state.upstream_endpoint))
}

/// GET /api/ and GET /api/status - Engine status passthrough
pub async fn engine_status(
    State(state): State<RelayAppState>,
) -> Result<impl IntoResponse, RelayApiError> {
    let status = state.status_handler.handle().await?;
    Ok(Json(status))
}

/// GET /api/conversations/:sender/tracker - Tracker passthrough
pub async fn conversation_tracker(
    State(state): State<RelayAppState>,
    Path(sender): Path<String>,
) -> Result<impl IntoResponse, RelayApiError> {
    let tracker = state
        .tracker_handler
        .handle(FetchTrackerQuery { sender })
        .await?;
    Ok(Json(tracker))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chat - Relay one message and return the engine's fragments
pub async fn relay_chat(
    State(state): State<RelayAppState>,
    payload: Result<Json<ChatRequestBody>, JsonRejection>,
) -> Result<impl IntoResponse, RelayApiError> {
    let Json(body) = payload?;
    let reply = state
        .chat_handler
        .handle(RelayChatCommand::from(body))
        .await?;
    Ok(Json(reply))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that renders a [`ProxyError`] as an HTTP response.
#[derive(Debug)]
pub struct RelayApiError(pub ProxyError);

impl From<ProxyError> for RelayApiError {
    fn from(err: ProxyError) -> Self {
        RelayApiError(err)
    }
}

impl From<JsonRejection> for RelayApiError {
    fn from(rejection: JsonRejection) -> Self {
        RelayApiError(ProxyError::invalid_request(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl IntoResponse for RelayApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn mirrored_upstream_status_is_kept() {
        let err = ProxyError::upstream_error(404, json!({"message": "no such bot"}));
        let response = RelayApiError(err).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["kind"], "upstream_error");
        assert_eq!(body["details"]["message"], "no such bot");
    }

    #[tokio::test]
    async fn relay_failure_carries_message_only() {
        let response = RelayApiError(ProxyError::relay_failure("Internal error: boom")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body, json!({"kind": "relay_failure", "error": "Internal error: boom"}));
    }
}
