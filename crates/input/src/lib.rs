//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into one-shot [`Command`](crate::types::Command)s
//! and tracks held movement keys as an [`InputState`](crate::types::InputState)
//! that the physics engine samples once per frame.

pub mod handler;
pub mod map;

pub use tui_blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
