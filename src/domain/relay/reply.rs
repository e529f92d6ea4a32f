//! Reply fragments returned by the dialogue engine.
//!
//! The relay forwards the engine's reply array untouched as
//! [`UpstreamReply`]. [`ReplyFragment`] is the client's reading of one
//! element and tolerates anything the engine may send.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A quick-reply button attached to a fragment.
///
/// URL buttons carry no `payload`; it reads as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyButton {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub payload: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReplyButton {
    pub fn new(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            payload: payload.into(),
            extra: Map::new(),
        }
    }
}

/// One structured unit of a bot response, as read by the chat client.
///
/// Every field is optional upstream, and `null` reads the same as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyFragment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub buttons: Vec<ReplyButton>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ReplyButton>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ReplyButton>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ReplyFragment {
    /// Creates a text-only fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Adds a quick-reply button.
    pub fn with_button(mut self, title: impl Into<String>, payload: impl Into<String>) -> Self {
        self.buttons.push(ReplyButton::new(title, payload));
        self
    }

    /// Sets the image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Text to display: a non-empty `text`, else a non-empty `custom.text`.
    pub fn display_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| {
                self.custom
                    .as_ref()
                    .and_then(|c| c.get("text"))
                    .and_then(Value::as_str)
                    .filter(|t| !t.is_empty())
            })
    }
}

/// The engine's reply array for one chat turn, element for element as
/// received. Order is the engine's intended message sequence.
pub type UpstreamReply = Vec<Value>;
