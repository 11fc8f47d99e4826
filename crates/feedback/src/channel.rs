//! Fire-and-forget delivery of game events to a [`Notifier`].
//!
//! The worker task reads events from an unbounded channel, so the game side
//! never waits: `send` on the returned sender is synchronous and never blocks.
//! Each event gets its own detached task; whichever answer lands last is the
//! one on display.
//!
//! The pet's mood reacts to the same events without asking the notifier: a
//! line clear makes it happy for a while, a game over makes it shy, and
//! start/reset bring back the mentor face.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::FeedbackConfig;
use crate::error::FeedbackError;
use crate::notifier::{prompt_for, Notifier};
use crate::types::{GameEvent, Mood};

/// What the host shows next to the board
struct Display {
    text: watch::Sender<String>,
    /// Mood plus the number of mood changes so far
    mood: watch::Sender<(Mood, u64)>,
}

impl Display {
    fn new() -> Self {
        Self {
            text: watch::channel(String::new()).0,
            mood: watch::channel((Mood::default(), 0)).0,
        }
    }

    /// Set the mood and return its epoch
    fn set_mood(&self, mood: Mood) -> u64 {
        let mut epoch = 0;
        self.mood.send_modify(|(current, changes)| {
            *current = mood;
            *changes += 1;
            epoch = *changes;
        });
        epoch
    }

    /// Back to the mentor face, unless the mood changed after `epoch`
    fn settle(&self, epoch: u64) {
        self.mood.send_if_modified(|(current, changes)| {
            if *changes != epoch {
                return false;
            }
            *current = Mood::Mentor;
            *changes += 1;
            true
        });
    }

    fn react(self: &Arc<Self>, event: &GameEvent, config: &FeedbackConfig, handle: &Handle) {
        match event {
            GameEvent::LinesCleared { .. } => {
                let epoch = self.set_mood(Mood::Happy);
                let display = Arc::clone(self);
                let happy_for = config.happy_for;
                handle.spawn(async move {
                    tokio::time::sleep(happy_for).await;
                    display.settle(epoch);
                });
            }
            GameEvent::GameOver { .. } => {
                self.set_mood(Mood::Shy);
            }
        }
    }
}

pub struct FeedbackChannel {
    events: mpsc::UnboundedSender<GameEvent>,
    display: Arc<Display>,
    config: FeedbackConfig,
    worker: JoinHandle<()>,
}

impl FeedbackChannel {
    /// Spawn the worker on `handle`. The displayed text starts empty and the
    /// mood starts at [`Mood::Mentor`].
    pub fn spawn(handle: &Handle, notifier: Arc<dyn Notifier>, config: FeedbackConfig) -> Self {
        let (events, rx) = mpsc::unbounded_channel();
        let display = Arc::new(Display::new());

        let worker = handle.spawn(run_worker(
            rx,
            notifier,
            Arc::clone(&display),
            config.clone(),
            handle.clone(),
        ));

        Self {
            events,
            display,
            config,
            worker,
        }
    }

    /// Sender to hand to the game driver
    pub fn sender(&self) -> mpsc::UnboundedSender<GameEvent> {
        self.events.clone()
    }

    /// Receiver of the displayed flavor text
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.display.text.subscribe()
    }

    /// Current flavor text
    pub fn text(&self) -> String {
        self.display.text.borrow().clone()
    }

    /// Current pet mood
    pub fn mood(&self) -> Mood {
        self.display.mood.borrow().0
    }

    /// Receiver of the pet mood, paired with a change counter
    pub fn subscribe_mood(&self) -> watch::Receiver<(Mood, u64)> {
        self.display.mood.subscribe()
    }

    /// Replace the displayed text directly
    pub fn announce(&self, text: impl Into<String>) {
        self.display.text.send_replace(text.into());
    }

    pub fn announce_start(&self) {
        self.display.set_mood(Mood::Mentor);
        self.announce(self.config.start_text.clone());
    }

    pub fn announce_reset(&self) {
        self.display.set_mood(Mood::Mentor);
        self.announce(self.config.reset_text.clone());
    }
}

impl Drop for FeedbackChannel {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<GameEvent>,
    notifier: Arc<dyn Notifier>,
    display: Arc<Display>,
    config: FeedbackConfig,
    handle: Handle,
) {
    while let Some(event) = rx.recv().await {
        display.react(&event, &config, &handle);
        if !config.enabled {
            log::debug!("feedback disabled, dropping {event:?}");
            continue;
        }
        log::debug!("notify: {}", prompt_for(&event));
        let answer = notifier.notify(event);
        let display = Arc::clone(&display);
        let fallback = config.fallback_text.clone();

        handle.spawn(async move {
            match answer.await.and_then(non_empty) {
                Ok(line) => {
                    display.text.send_replace(line);
                }
                Err(err) if err.shows_fallback() => {
                    log::warn!("feedback for {event:?} failed: {err}");
                    display.text.send_replace(fallback);
                }
                Err(err) => log::debug!("feedback for {event:?}: {err}"),
            }
        });
    }
    log::debug!("feedback worker exiting: all senders dropped");
}

fn non_empty(line: String) -> Result<String, FeedbackError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(FeedbackError::Empty);
    }
    Ok(trimmed.to_string())
}
