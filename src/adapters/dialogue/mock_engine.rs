//! Mock Dialogue Engine for testing.
//!
//! Provides a configurable in-memory implementation of the DialogueEngine
//! port, so relay behavior can be tested without a running engine.
//!
//! # Features
//!
//! - Queued chat replies, consumed in order
//! - Fixed status and tracker outcomes
//! - Simulated latency
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let engine = MockDialogueEngine::new()
//!     .with_reply(vec![json!({"text": "¡Hola!"})])
//!     .with_error(EngineError::timeout("mock://engine", 30));
//! ```

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::relay::{ChatRequest, UpstreamReply};
use crate::ports::{DialogueEngine, EngineError};

const MOCK_ENDPOINT: &str = "mock://dialogue-engine";

/// Mock dialogue engine for testing.
#[derive(Debug, Clone)]
pub struct MockDialogueEngine {
    /// Chat outcomes, consumed in order. An empty queue answers `[]`.
    replies: Arc<Mutex<VecDeque<Result<UpstreamReply, EngineError>>>>,
    status: Result<Value, EngineError>,
    tracker: Result<Value, EngineError>,
    /// Simulated latency per chat call.
    delay: Duration,
    /// Chat requests received, for verification.
    calls: Arc<Mutex<Vec<ChatRequest>>>,
    /// Senders whose tracker was requested.
    tracker_calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockDialogueEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDialogueEngine {
    /// Creates a healthy engine that answers every chat with no fragments.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            status: Ok(json!({"status": "ok"})),
            tracker: Ok(json!({"events": []})),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
            tracker_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful chat reply, returned exactly as given.
    pub fn with_reply(self, fragments: Vec<Value>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(fragments));
        self
    }

    /// Queues a chat failure.
    pub fn with_error(self, error: EngineError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets the status probe outcome.
    pub fn with_status(mut self, status: Result<Value, EngineError>) -> Self {
        self.status = status;
        self
    }

    /// Sets the tracker outcome.
    pub fn with_tracker(mut self, tracker: Result<Value, EngineError>) -> Self {
        self.tracker = tracker;
        self
    }

    /// Simulates latency on chat calls.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of chat calls received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Chat requests received, in order.
    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Senders whose tracker was requested, in order.
    pub fn tracker_calls(&self) -> Vec<String> {
        self.tracker_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DialogueEngine for MockDialogueEngine {
    async fn status(&self) -> Result<Value, EngineError> {
        self.status.clone()
    }

    async fn send_message(&self, request: &ChatRequest) -> Result<UpstreamReply, EngineError> {
        self.calls.lock().unwrap().push(request.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn tracker(&self, sender: &str) -> Result<Value, EngineError> {
        self.tracker_calls.lock().unwrap().push(sender.to_string());
        self.tracker.clone()
    }

    fn endpoint(&self) -> &str {
        MOCK_ENDPOINT
    }
}
