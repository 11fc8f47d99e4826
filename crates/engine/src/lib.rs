//! Engine - runs a game session against the clock
//!
//! The core crate knows nothing about time. This crate adds the gravity
//! cadence: a [`TickScheduler`] owns one tokio task that advances the session
//! every period, and a [`GameDriver`] serializes that task with input handlers
//! through a single mutex.
//!
//! Session events (line clears, game over) are forwarded to an optional
//! unbounded channel as soon as they are raised. Nothing in this crate waits on
//! the receiving side.

pub mod config;
pub mod driver;
pub mod scheduler;

pub use pet_tetris_core as core;
pub use pet_tetris_types as types;

pub use config::EngineConfig;
pub use driver::{lock_session, EventSender, GameDriver, SharedSession};
pub use scheduler::TickScheduler;
