//! chat-client - terminal front end for the chat relay.
//!
//! Each line typed is sent as a message. Commands:
//! `/<n>` copies quick-reply button `n` from the latest bot turn into the
//! input, and an empty line or `/send` sends the input as it stands.
//! `/reset` starts a new session, `/status` re-checks the relay and
//! `/quit` exits.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use chat_relay::adapters::relay_client::HttpRelayClient;
use chat_relay::application::{ChatClient, ChatCommand};
use chat_relay::config::ClientConfig;
use chat_relay::domain::chat::{ChatState, ConnectionStatus, SessionId, Speaker, Turn};
use chat_relay::domain::relay::ReplyButton;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::load()?;
    config.validate()?;

    let relay = HttpRelayClient::new(&config)?;
    let client = ChatClient::spawn(Arc::new(relay));
    let mut updates = client.subscribe();
    let mut view = View::new(&client.state());

    println!("Connected to {} (type /quit to exit)", config.relay_url());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                view.render(&state);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !handle_line(&client, &updates, line.trim()).await? {
                    break;
                }
            }
        }
    }

    client.shutdown().await;
    Ok(())
}

/// One line of terminal input.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Quit,
    Reset,
    Status,
    /// Send the current input.
    Send,
    /// Quick-reply button, 1-based.
    Pick(usize),
    Text(&'a str),
}

impl<'a> Line<'a> {
    fn parse(line: &'a str) -> Self {
        match line {
            "/quit" | "/exit" => Line::Quit,
            "/reset" => Line::Reset,
            "/status" => Line::Status,
            "" | "/send" => Line::Send,
            _ => match line.strip_prefix('/').and_then(|n| n.parse::<usize>().ok()) {
                Some(choice) => Line::Pick(choice),
                None => Line::Text(line),
            },
        }
    }
}

/// Returns `false` when the user asked to quit.
async fn handle_line(
    client: &ChatClient,
    updates: &watch::Receiver<ChatState>,
    line: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    match Line::parse(line) {
        Line::Quit => return Ok(false),
        Line::Reset => client.reset().await?,
        Line::Status => client.probe_status().await?,
        Line::Send => {
            if state_is_pending(updates) {
                println!("  (waiting for a reply)");
            } else if updates.borrow().input().trim().is_empty() {
                println!("  (nothing to send)");
            } else {
                client.send(ChatCommand::Submit).await?;
            }
        }
        Line::Pick(choice) => {
            let state = updates.borrow().clone();
            let picked = last_buttons_turn(&state).and_then(|(turn, buttons)| {
                let index = choice.checked_sub(1)?;
                buttons.get(index).map(|b| (turn, index, b.payload.clone()))
            });
            match picked {
                Some((_, _, payload)) if payload.is_empty() => {
                    println!("  (quick reply {} has no payload)", choice)
                }
                Some((turn, index, payload)) => {
                    client.select_button(turn, index).await?;
                    println!("  (input: {}; press Enter or /send to send)", payload);
                }
                None => println!("  (no quick reply {})", choice),
            }
        }
        Line::Text(text) => {
            if state_is_pending(updates) {
                println!("  (waiting for a reply)");
            } else {
                client.submit(text).await?;
            }
        }
    }
    Ok(true)
}

fn state_is_pending(updates: &watch::Receiver<ChatState>) -> bool {
    updates.borrow().is_pending()
}

/// Index and buttons of the most recent bot turn offering buttons.
fn last_buttons_turn(state: &ChatState) -> Option<(usize, &[ReplyButton])> {
    state
        .transcript()
        .turns()
        .iter()
        .enumerate()
        .rev()
        .find(|(_, t)| t.speaker == Speaker::Bot && !t.buttons.is_empty())
        .map(|(i, t)| (i, t.buttons.as_slice()))
}

/// Tracks what has already been printed.
struct View {
    session: SessionId,
    printed: usize,
    status: ConnectionStatus,
}

impl View {
    fn new(state: &ChatState) -> Self {
        Self {
            session: state.session_id().clone(),
            printed: 0,
            status: state.status(),
        }
    }

    fn render(&mut self, state: &ChatState) {
        if state.status() != self.status {
            self.status = state.status();
            println!("[status: {}]", self.status.label());
        }

        if state.session_id() != &self.session {
            self.session = state.session_id().clone();
            self.printed = 0;
            println!("[session: {}]", self.session);
        }

        for turn in state.transcript().turns().iter().skip(self.printed) {
            print_turn(turn);
        }
        self.printed = state.transcript().len();
    }
}

fn print_turn(turn: &Turn) {
    let who = match turn.speaker {
        Speaker::User => "you",
        Speaker::Bot => "bot",
    };
    println!("{} {}> {}", turn.local_time(), who, turn.text);
    if let Some(image) = &turn.image {
        println!("      [image] {}", image);
    }
    for (i, button) in turn.buttons.iter().enumerate() {
        println!("      /{} {}", i + 1, button.title);
    }
}
