//! Mock Relay Client for testing the chat client without a relay.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::chat::{ProbeOutcome, SessionId};
use crate::domain::relay::ReplyFragment;
use crate::ports::{RelayClient, RelayClientError};

/// Mock relay client.
///
/// Chat outcomes are consumed in order; an empty queue answers with no
/// fragments.
#[derive(Debug, Clone)]
pub struct MockRelayClient {
    replies: Arc<Mutex<VecDeque<Result<Vec<ReplyFragment>, RelayClientError>>>>,
    probe: ProbeOutcome,
    delay: Duration,
    sent: Arc<Mutex<Vec<(String, String)>>>,
    probes: Arc<AtomicUsize>,
}

impl Default for MockRelayClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRelayClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            probe: ProbeOutcome::Reachable,
            delay: Duration::ZERO,
            sent: Arc::new(Mutex::new(Vec::new())),
            probes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_reply(self, fragments: Vec<ReplyFragment>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(fragments));
        self
    }

    pub fn with_error(self, error: RelayClientError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_probe(mut self, outcome: ProbeOutcome) -> Self {
        self.probe = outcome;
        self
    }

    /// Simulates latency on chat calls.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// `(sender, message)` pairs sent so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RelayClient for MockRelayClient {
    async fn probe_status(&self) -> ProbeOutcome {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.probe
    }

    async fn send_chat(
        &self,
        session_id: &SessionId,
        message: &str,
    ) -> Result<Vec<ReplyFragment>, RelayClientError> {
        self.sent
            .lock()
            .unwrap()
            .push((session_id.to_string(), message.to_string()));

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }
}
