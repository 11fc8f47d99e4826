//! The seam to the chat service.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::FeedbackError;
use crate::types::GameEvent;

/// Pending answer from a [`Notifier`]
pub type NotifyFuture = Pin<Box<dyn Future<Output = Result<String, FeedbackError>> + Send>>;

/// Something that turns a game event into a line of flavor text.
///
/// Implementations usually format [`prompt_for`] and send it to the chat
/// service. The returned future runs in a detached task, so it may take as long
/// as it likes.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, event: GameEvent) -> NotifyFuture;
}

/// System prompt describing `event` to the chat companion
pub fn prompt_for(event: &GameEvent) -> String {
    match *event {
        GameEvent::LinesCleared { count, .. } => {
            format!("[System: User cleared {count} lines in Tetris! Cheer!]")
        }
        GameEvent::GameOver { .. } => {
            "[System: Game Over in Tetris. Comfort the user gently.]".to_string()
        }
    }
}

const CHEERS: &[&str] = &[
    "Sweet! Those rows melted like sugar!",
    "Look at you go, tower chef!",
    "Another layer gone. Delicious!",
];

const COMFORTS: &[&str] = &[
    "Aww, the tower toppled. Want to bake another one?",
    "That was a tall stack! Let's try again together.",
];

/// Answers from a fixed list of lines, for hosts without a chat service.
#[derive(Debug, Default)]
pub struct OfflineNotifier {
    next: AtomicUsize,
}

impl OfflineNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn pick(&self, lines: &[&str]) -> String {
        let i = self.next.fetch_add(1, Ordering::Relaxed);
        lines[i % lines.len()].to_string()
    }
}

impl Notifier for OfflineNotifier {
    fn notify(&self, event: GameEvent) -> NotifyFuture {
        let text = match event {
            GameEvent::LinesCleared { count: 4.., .. } => "FOUR rows! Laki is dancing!".to_string(),
            GameEvent::LinesCleared { .. } => self.pick(CHEERS),
            GameEvent::GameOver { .. } => self.pick(COMFORTS),
        };
        Box::pin(async move { Ok(text) })
    }
}
