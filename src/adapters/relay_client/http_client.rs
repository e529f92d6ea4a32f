//! HTTP Relay Client - Implementation of RelayClient against the relay's API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::domain::chat::{ProbeOutcome, SessionId};
use crate::domain::relay::ReplyFragment;
use crate::ports::{RelayClient, RelayClientError};

#[derive(Serialize)]
struct ChatBody<'a> {
    sender: &'a str,
    message: &'a str,
}

/// Error body returned by the relay.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Relay client over HTTP.
pub struct HttpRelayClient {
    client: Client,
    relay_url: String,
}

impl HttpRelayClient {
    /// Creates a client for the relay at `config.relay_url`.
    pub fn new(config: &ClientConfig) -> Result<Self, RelayClientError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RelayClientError::Unreachable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            relay_url: config.relay_url().to_string(),
        })
    }

    fn status_url(&self) -> String {
        format!("{}/api/", self.relay_url)
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.relay_url)
    }

    /// Builds a `Rejected` error, preferring the relay's own message.
    async fn rejected(response: Response) -> RelayClientError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        RelayClientError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn probe_status(&self) -> ProbeOutcome {
        match self.client.get(self.status_url()).send().await {
            Ok(response) if response.status().is_success() => ProbeOutcome::Reachable,
            Ok(response) => {
                tracing::debug!(status = response.status().as_u16(), "Relay status probe rejected");
                ProbeOutcome::Rejected
            }
            Err(e) => {
                tracing::debug!("Relay status probe failed: {}", e);
                ProbeOutcome::Unreachable
            }
        }
    }

    async fn send_chat(
        &self,
        session_id: &SessionId,
        message: &str,
    ) -> Result<Vec<ReplyFragment>, RelayClientError> {
        let response = self
            .client
            .post(self.chat_url())
            .json(&ChatBody {
                sender: session_id.as_str(),
                message,
            })
            .send()
            .await
            .map_err(|e| RelayClientError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }

        response
            .json::<Vec<ReplyFragment>>()
            .await
            .map_err(|e| RelayClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpRelayClient {
        HttpRelayClient::new(&ClientConfig {
            relay_url: server.uri(),
            timeout_secs: 2,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn send_chat_posts_session_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({"sender": "user_1", "message": "hola"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"text": "¡Hola!"}])))
            .expect(1)
            .mount(&server)
            .await;

        let fragments = client_for(&server)
            .send_chat(&SessionId::from("user_1"), "hola")
            .await
            .unwrap();

        assert_eq!(fragments, vec![ReplyFragment::text("¡Hola!")]);
    }

    #[tokio::test]
    async fn relay_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "kind": "upstream_unavailable",
                "error": "Dialogue engine unavailable"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .send_chat(&SessionId::from("user_1"), "hola")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RelayClientError::Rejected {
                status: 503,
                message: "Dialogue engine unavailable".to_string(),
            }
        );
        assert_eq!(err.to_string(), "HTTP 503: Dialogue engine unavailable");
    }

    #[tokio::test]
    async fn probe_maps_statuses_to_outcomes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert_eq!(client_for(&server).probe_status().await, ProbeOutcome::Rejected);
    }

    #[tokio::test]
    async fn probe_against_closed_port_is_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpRelayClient::new(&ClientConfig {
            relay_url: format!("http://{}", addr),
            timeout_secs: 2,
        })
        .unwrap();

        assert_eq!(client.probe_status().await, ProbeOutcome::Unreachable);
    }
}
