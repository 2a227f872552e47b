//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s. Buffering,
//! reversal prevention and timing live in the core; this crate only names keys.

pub mod map;

pub use tui_snake_types as types;

pub use map::{handle_key_event, should_quit};
