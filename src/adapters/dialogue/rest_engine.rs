//! REST Dialogue Engine - Implementation of DialogueEngine over HTTP.
//!
//! Talks to a Rasa-style REST channel:
//!
//! - `GET  {base}/` - status payload
//! - `POST {base}/webhooks/rest/webhook` - `{sender, message}` in, reply fragments out
//! - `GET  {base}/conversations/{sender}/tracker` - conversation tracker
//!
//! # Configuration
//!
//! ```ignore
//! let engine = RestDialogueEngine::new(&config.upstream)?;
//! let reply = engine.send_message(&request).await?;
//! ```
//!
//! Each call carries its own timeout: short for the status and tracker
//! lookups, long for chat since it covers model inference.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::domain::relay::{ChatRequest, UpstreamReply};
use crate::ports::{DialogueEngine, EngineError};

/// Dialogue engine reached over its REST channel.
pub struct RestDialogueEngine {
    client: Client,
    base_url: Url,
    endpoint: String,
    status_timeout: Duration,
    chat_timeout: Duration,
    tracker_timeout: Duration,
}

impl RestDialogueEngine {
    /// Creates an engine client from upstream configuration.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Transport` if the base URL cannot be used as a
    /// base or the HTTP client cannot be built.
    pub fn new(config: &UpstreamConfig) -> Result<Self, EngineError> {
        let endpoint = config.base_url().to_string();
        let base_url = Url::parse(&endpoint)
            .map_err(|e| EngineError::Transport(format!("Invalid base URL {}: {}", endpoint, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(EngineError::Transport(format!(
                "Base URL cannot hold paths: {}",
                endpoint
            )));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| EngineError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            endpoint,
            status_timeout: config.status_timeout(),
            chat_timeout: config.chat_timeout(),
            tracker_timeout: config.tracker_timeout(),
        })
    }

    /// Builds an endpoint URL below the base, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn status_url(&self) -> Url {
        self.url(&[""])
    }

    fn webhook_url(&self) -> Url {
        self.url(&["webhooks", "rest", "webhook"])
    }

    fn tracker_url(&self, sender: &str) -> Url {
        self.url(&["conversations", sender, "tracker"])
    }

    /// Maps a reqwest failure onto the port's error kinds.
    fn classify(&self, e: reqwest::Error, timeout: Duration) -> EngineError {
        if e.is_timeout() {
            EngineError::timeout(&self.endpoint, timeout.as_secs())
        } else if e.is_connect() {
            EngineError::unreachable(&self.endpoint, e.to_string())
        } else if e.is_decode() {
            EngineError::Decode(e.to_string())
        } else {
            EngineError::Transport(e.to_string())
        }
    }

    /// Turns a non-2xx response into `EngineError::Status`, keeping the body.
    async fn check_status(&self, response: Response) -> Result<Response, EngineError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        tracing::warn!(status = status.as_u16(), "Dialogue engine returned an error status");
        Err(EngineError::status(status.as_u16(), body))
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: Response,
        timeout: Duration,
    ) -> Result<T, EngineError> {
        let response = self.check_status(response).await?;
        response.json::<T>().await.map_err(|e| self.classify(e, timeout))
    }
}

#[async_trait]
impl DialogueEngine for RestDialogueEngine {
    async fn status(&self) -> Result<Value, EngineError> {
        let timeout = self.status_timeout;
        let response = self
            .client
            .get(self.status_url())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| self.classify(e, timeout))?;

        // Some engines answer the root path with plain text.
        let response = self.check_status(response).await?;
        let text = response.text().await.map_err(|e| self.classify(e, timeout))?;
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    async fn send_message(&self, request: &ChatRequest) -> Result<UpstreamReply, EngineError> {
        let timeout = self.chat_timeout;
        let response = self
            .client
            .post(self.webhook_url())
            .header("Content-Type", "application/json")
            .json(request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| self.classify(e, timeout))?;

        self.read_json(response, timeout).await
    }

    async fn tracker(&self, sender: &str) -> Result<Value, EngineError> {
        let timeout = self.tracker_timeout;
        let response = self
            .client
            .get(self.tracker_url(sender))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| self.classify(e, timeout))?;

        self.read_json(response, timeout).await
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn engine_for(base_url: String) -> RestDialogueEngine {
        RestDialogueEngine::new(&UpstreamConfig {
            base_url,
            status_timeout_secs: 1,
            chat_timeout_secs: 1,
            tracker_timeout_secs: 1,
        })
        .unwrap()
    }

    fn chat_request(sender: &str, message: &str) -> ChatRequest {
        ChatRequest::new(Some(sender.to_string()), Some(message.to_string())).unwrap()
    }

    #[test]
    fn urls_are_built_below_base() {
        let engine = engine_for("http://engine:5005/rasa/".to_string());
        assert_eq!(engine.status_url().as_str(), "http://engine:5005/rasa/");
        assert_eq!(
            engine.webhook_url().as_str(),
            "http://engine:5005/rasa/webhooks/rest/webhook"
        );
    }

    #[test]
    fn tracker_sender_is_a_single_encoded_segment() {
        let engine = engine_for("http://engine:5005".to_string());
        assert_eq!(
            engine.tracker_url("a/b c").as_str(),
            "http://engine:5005/conversations/a%2Fb%20c/tracker"
        );
    }

    #[tokio::test]
    async fn send_message_posts_body_and_preserves_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhooks/rest/webhook"))
            .and(body_json(json!({"sender": "user_1", "message": "hola"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"recipient_id": "user_1", "text": "first"},
                {"recipient_id": "user_1", "text": "second"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let engine = engine_for(server.uri());
        let reply = engine.send_message(&chat_request("user_1", "hola")).await.unwrap();

        assert_eq!(
            reply,
            vec![
                json!({"recipient_id": "user_1", "text": "first"}),
                json!({"recipient_id": "user_1", "text": "second"}),
            ]
        );
    }

    #[tokio::test]
    async fn status_returns_payload_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "3.6.0"})))
            .mount(&server)
            .await;

        let engine = engine_for(server.uri());
        assert_eq!(engine.status().await.unwrap(), json!({"version": "3.6.0"}));
    }

    #[tokio::test]
    async fn status_text_body_is_returned_as_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Hello from Rasa: 3.6.0"))
            .mount(&server)
            .await;

        let engine = engine_for(server.uri());
        assert_eq!(engine.status().await.unwrap(), json!("Hello from Rasa: 3.6.0"));
    }

    #[tokio::test]
    async fn malformed_reply_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhooks/rest/webhook"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "a list"})))
            .mount(&server)
            .await;

        let engine = engine_for(server.uri());
        let err = engine.send_message(&chat_request("u", "m")).await.unwrap_err();
        assert!(matches!(err, EngineError::Decode(_)));
    }

    #[tokio::test]
    async fn non_success_status_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhooks/rest/webhook"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
            .mount(&server)
            .await;

        let engine = engine_for(server.uri());
        let err = engine.send_message(&chat_request("u", "m")).await.unwrap_err();
        assert_eq!(err, EngineError::status(500, json!({"message": "boom"})));
    }

    #[tokio::test]
    async fn slow_engine_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhooks/rest/webhook"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let engine = engine_for(server.uri());
        let err = engine.send_message(&chat_request("u", "m")).await.unwrap_err();
        assert!(matches!(err, EngineError::Timeout { timeout_secs: 1, .. }));
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let engine = engine_for(format!("http://{}", addr));
        let err = engine.status().await.unwrap_err();
        assert!(matches!(err, EngineError::Unreachable { .. }));
    }

    #[tokio::test]
    async fn tracker_fetches_sender_conversation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/conversations/user_1/tracker"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sender_id": "user_1"})))
            .mount(&server)
            .await;

        let engine = engine_for(server.uri());
        let tracker = engine.tracker("user_1").await.unwrap();
        assert_eq!(tracker["sender_id"], "user_1");
    }

    #[tokio::test]
    async fn empty_reply_is_valid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhooks/rest/webhook"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let engine = engine_for(server.uri());
        let reply = engine.send_message(&chat_request("u", "m")).await.unwrap();
        assert!(reply.is_empty());
    }
}
