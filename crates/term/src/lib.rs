//! Terminal rendering for the pet tetris demo host.
//!
//! Rendering happens in two steps: [`GameView`] paints a session snapshot and
//! the current flavor line into a [`FrameBuffer`] (pure, testable), then
//! [`TerminalRenderer`] writes only the cells that changed since the previous
//! frame.
//!
//! Board cells are two columns wide to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use pet_tetris_core as core;
pub use pet_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
