//! Chat client driver.
//!
//! A single task owns the [`ChatState`]. Front ends send [`ChatCommand`]s over
//! a channel and read state snapshots from a `watch` channel; relay calls run
//! in their own tasks and report back as events, so the state is never shared
//! with an in-flight call.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::domain::chat::{ChatEffect, ChatEvent, ChatState};
use crate::ports::RelayClient;

const COMMAND_BUFFER: usize = 32;

/// Something a user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Replace the input field contents.
    Input(String),
    /// Submit the current input.
    Submit,
    /// Copy a quick-reply button's payload into the input field.
    SelectButton { turn: usize, button: usize },
    /// Start a new session.
    Reset,
    /// Re-check the relay.
    ProbeStatus,
}

impl From<ChatCommand> for ChatEvent {
    fn from(cmd: ChatCommand) -> Self {
        match cmd {
            ChatCommand::Input(text) => ChatEvent::InputChanged(text),
            ChatCommand::Submit => ChatEvent::Submitted,
            ChatCommand::SelectButton { turn, button } => ChatEvent::ButtonSelected { turn, button },
            ChatCommand::Reset => ChatEvent::Reset,
            ChatCommand::ProbeStatus => ChatEvent::ProbeRequested,
        }
    }
}

/// The driver task has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("chat client has shut down")]
pub struct ChatClientClosed;

/// Handle to a running chat client.
pub struct ChatClient {
    commands: mpsc::Sender<ChatCommand>,
    state: watch::Receiver<ChatState>,
    task: JoinHandle<()>,
}

impl ChatClient {
    /// Starts a client with a fresh session and probes the relay once.
    pub fn spawn(relay: Arc<dyn RelayClient>) -> Self {
        Self::spawn_with_state(relay, ChatState::new())
    }

    /// Starts a client from a given state.
    pub fn spawn_with_state(relay: Arc<dyn RelayClient>, initial: ChatState) -> Self {
        let (commands, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (publisher, state) = watch::channel(initial.clone());
        let task = tokio::spawn(run(initial, relay, command_rx, publisher));

        Self {
            commands,
            state,
            task,
        }
    }

    pub async fn send(&self, command: ChatCommand) -> Result<(), ChatClientClosed> {
        self.commands.send(command).await.map_err(|_| ChatClientClosed)
    }

    /// Types `text` into the input field and submits it.
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), ChatClientClosed> {
        self.send(ChatCommand::Input(text.into())).await?;
        self.send(ChatCommand::Submit).await
    }

    pub async fn reset(&self) -> Result<(), ChatClientClosed> {
        self.send(ChatCommand::Reset).await
    }

    pub async fn select_button(&self, turn: usize, button: usize) -> Result<(), ChatClientClosed> {
        self.send(ChatCommand::SelectButton { turn, button }).await
    }

    pub async fn probe_status(&self) -> Result<(), ChatClientClosed> {
        self.send(ChatCommand::ProbeStatus).await
    }

    /// Latest state snapshot.
    pub fn state(&self) -> ChatState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.state.clone()
    }

    /// Waits until the state satisfies `condition` and returns that snapshot.
    pub async fn wait_for(
        &self,
        condition: impl FnMut(&ChatState) -> bool,
    ) -> Result<ChatState, ChatClientClosed> {
        let mut rx = self.state.clone();
        let snapshot = rx.wait_for(condition).await.map_err(|_| ChatClientClosed)?;
        Ok(snapshot.clone())
    }

    /// Stops accepting commands and waits for the driver to finish.
    pub async fn shutdown(self) {
        drop(self.commands);
        let _ = self.task.await;
    }
}

async fn run(
    mut state: ChatState,
    relay: Arc<dyn RelayClient>,
    mut commands: mpsc::Receiver<ChatCommand>,
    publisher: watch::Sender<ChatState>,
) {
    let (outcome_tx, mut outcomes) = mpsc::unbounded_channel::<ChatEvent>();

    if let Some(effect) = state.apply(ChatEvent::Initialized) {
        dispatch(effect, &relay, &outcome_tx);
    }

    loop {
        let event = tokio::select! {
            cmd = commands.recv() => match cmd {
                Some(cmd) => ChatEvent::from(cmd),
                None => break,
            },
            Some(event) = outcomes.recv() => event,
        };

        if let Some(effect) = state.apply(event) {
            dispatch(effect, &relay, &outcome_tx);
        }
        publisher.send_replace(state.clone());
    }

    tracing::debug!(session = %state.session_id(), "Chat client stopped");
}

/// Runs an effect in its own task; the outcome comes back as an event.
fn dispatch(
    effect: ChatEffect,
    relay: &Arc<dyn RelayClient>,
    outcomes: &mpsc::UnboundedSender<ChatEvent>,
) {
    let relay = Arc::clone(relay);
    let outcomes = outcomes.clone();

    match effect {
        ChatEffect::ProbeStatus => {
            tokio::spawn(async move {
                let outcome = relay.probe_status().await;
                let _ = outcomes.send(ChatEvent::StatusProbed(outcome));
            });
        }
        ChatEffect::SendChat {
            session_id,
            message,
        } => {
            tokio::spawn(async move {
                let event = match relay.send_chat(&session_id, &message).await {
                    Ok(fragments) => ChatEvent::ReplyReceived {
                        session_id,
                        fragments,
                    },
                    Err(e) => {
                        tracing::warn!(session = %session_id, "Chat call failed: {}", e);
                        ChatEvent::ReplyFailed {
                            session_id,
                            message: e.to_string(),
                        }
                    }
                };
                let _ = outcomes.send(event);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::relay_client::MockRelayClient;
    use crate::domain::chat::{ConnectionStatus, ProbeOutcome, SessionId, Speaker};
    use crate::domain::relay::ReplyFragment;
    use crate::ports::RelayClientError;
    use std::time::Duration;

    #[tokio::test]
    async fn initialization_probes_once() {
        let relay = MockRelayClient::new().with_probe(ProbeOutcome::Reachable);
        let client = ChatClient::spawn(Arc::new(relay.clone()));

        let state = client
            .wait_for(|s| s.status() != ConnectionStatus::Checking)
            .await
            .unwrap();

        assert_eq!(state.status(), ConnectionStatus::Online);
        assert_eq!(relay.probe_count(), 1);
        assert!(state.transcript().is_empty());
    }

    #[tokio::test]
    async fn round_trip_yields_user_and_bot_turns() {
        let relay = MockRelayClient::new().with_reply(vec![ReplyFragment::text("¡Hola!")]);
        let client = ChatClient::spawn_with_state(
            Arc::new(relay.clone()),
            ChatState::with_session(SessionId::from("user_1")),
        );

        client.submit("hola").await.unwrap();
        let state = client
            .wait_for(|s| s.transcript().len() == 2 && !s.is_pending())
            .await
            .unwrap();

        let turns = state.transcript().turns();
        assert_eq!(turns[0].speaker, Speaker::User);
        assert_eq!(turns[0].text, "hola");
        assert_eq!(turns[1].speaker, Speaker::Bot);
        assert_eq!(turns[1].text, "¡Hola!");
        assert_eq!(state.status(), ConnectionStatus::Online);
        assert_eq!(relay.sent(), vec![("user_1".to_string(), "hola".to_string())]);
    }

    #[tokio::test]
    async fn unreachable_relay_renders_error_turn_and_goes_offline() {
        let relay = MockRelayClient::new()
            .with_probe(ProbeOutcome::Unreachable)
            .with_error(RelayClientError::Unreachable("connection refused".into()));
        let client = ChatClient::spawn(Arc::new(relay));

        client.submit("hola").await.unwrap();
        let state = client
            .wait_for(|s| s.transcript().len() == 2 && s.status() == ConnectionStatus::Offline)
            .await
            .unwrap();

        assert!(state.transcript().turns()[1].text.contains("connection refused"));
        assert_eq!(state.status(), ConnectionStatus::Offline);
    }

    #[tokio::test]
    async fn second_submit_while_pending_is_ignored() {
        let relay = MockRelayClient::new()
            .with_reply(vec![ReplyFragment::text("done")])
            .with_delay(Duration::from_millis(100));
        let client = ChatClient::spawn(Arc::new(relay.clone()));

        client.submit("first").await.unwrap();
        client.submit("second").await.unwrap();
        let state = client.wait_for(|s| s.transcript().len() == 2).await.unwrap();

        assert_eq!(relay.sent().len(), 1);
        assert_eq!(state.transcript().turns()[0].text, "first");
        assert_eq!(state.input(), "second");
    }

    #[tokio::test]
    async fn selected_button_waits_for_submit() {
        let relay = MockRelayClient::new()
            .with_reply(vec![ReplyFragment::text("Pick one").with_button("Masters", "/masters")])
            .with_reply(vec![ReplyFragment::text("Great choice")]);
        let client = ChatClient::spawn_with_state(
            Arc::new(relay.clone()),
            ChatState::with_session(SessionId::from("user_1")),
        );

        client.submit("programs").await.unwrap();
        client
            .wait_for(|s| s.transcript().len() == 2 && !s.is_pending())
            .await
            .unwrap();

        client.select_button(1, 0).await.unwrap();
        let state = client.wait_for(|s| s.input() == "/masters").await.unwrap();
        assert_eq!(state.transcript().len(), 2);
        assert_eq!(relay.sent().len(), 1);

        client.send(ChatCommand::Submit).await.unwrap();
        let state = client
            .wait_for(|s| s.transcript().len() == 4 && !s.is_pending())
            .await
            .unwrap();

        assert_eq!(state.transcript().turns()[2].text, "/masters");
        assert_eq!(state.transcript().turns()[3].text, "Great choice");
        assert_eq!(relay.sent()[1], ("user_1".to_string(), "/masters".to_string()));
    }

    #[tokio::test]
    async fn reset_makes_no_relay_call() {
        let relay = MockRelayClient::new();
        let client = ChatClient::spawn(Arc::new(relay.clone()));
        let before = client.state().session_id().clone();

        client.reset().await.unwrap();
        let state = client.wait_for(|s| s.transcript().len() == 1).await.unwrap();

        assert_ne!(state.session_id(), &before);
        assert!(relay.sent().is_empty());
        client.shutdown().await;
    }
}
