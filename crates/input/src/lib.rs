//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events onto the logical [`crate::types::Command`] set.
//! There is no repeat handling here: terminals deliver their own auto-repeat as
//! repeated press events, and each one is a single step.

pub mod map;

pub use pet_tetris_types as types;

pub use map::{handle_key_event, should_quit};
