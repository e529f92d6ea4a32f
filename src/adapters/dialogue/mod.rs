//! Dialogue Engine Adapters.
//!
//! Implementations of the DialogueEngine port.
//!
//! ## Available Adapters
//!
//! - `RestDialogueEngine` - Rasa-style REST channel over HTTP
//! - `MockDialogueEngine` - Configurable mock for testing

mod mock_engine;
mod rest_engine;

pub use mock_engine::MockDialogueEngine;
pub use rest_engine::RestDialogueEngine;
