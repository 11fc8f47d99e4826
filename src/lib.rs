//! Pet Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so hosts and integration
//! tests can write `pet_tetris::{core, engine, feedback, ...}`.

pub use pet_tetris_core as core;
pub use pet_tetris_engine as engine;
pub use pet_tetris_feedback as feedback;
pub use pet_tetris_input as input;
pub use pet_tetris_term as term;
pub use pet_tetris_types as types;
