//! Terminal input (game-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. Each press
//! becomes exactly one action; there is no key repeat handling here, the
//! terminal's own auto-repeat is passed through as further presses.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_press, should_quit};
