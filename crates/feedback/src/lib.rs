//! Feedback channel - flavor text from the chat companion
//!
//! Game events are handed to a [`Notifier`] (the chat service, or a stand-in)
//! in detached tasks. Whatever comes back replaces the displayed flavor text,
//! which hosts read through a `tokio::sync::watch` receiver.
//!
//! The channel also tracks the pet's [`Mood`](types::Mood), which follows game
//! events directly and never waits on the notifier.
//!
//! Nothing here reports back into the game: a slow, failing or silent notifier
//! only ever changes the text.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use pet_tetris_feedback::{FeedbackChannel, FeedbackConfig, OfflineNotifier};
//! use pet_tetris_types::GameEvent;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let channel = FeedbackChannel::spawn(
//!     &tokio::runtime::Handle::current(),
//!     Arc::new(OfflineNotifier::new()),
//!     FeedbackConfig::default(),
//! );
//! let mut text = channel.subscribe();
//!
//! channel.sender().send(GameEvent::LinesCleared { count: 2, score: 200 }).unwrap();
//! text.changed().await.unwrap();
//! assert!(!text.borrow().is_empty());
//! # }
//! ```

pub mod channel;
pub mod config;
pub mod error;
pub mod notifier;

pub use pet_tetris_types as types;

pub use channel::FeedbackChannel;
pub use config::{FeedbackConfig, Language};
pub use error::FeedbackError;
pub use notifier::{prompt_for, NotifyFuture, Notifier, OfflineNotifier};
