//! Terminal runner for the pet tetris mini game.
//!
//! Gravity runs on a tokio task owned by the engine; this thread only reads
//! keys, forwards commands and redraws. Flavor text comes from an offline
//! notifier standing in for the chat companion; the pet mood shown next to it
//! follows game events.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use tokio::runtime::Runtime;

use pet_tetris::engine::{EngineConfig, GameDriver};
use pet_tetris::feedback::{FeedbackChannel, FeedbackConfig, OfflineNotifier};
use pet_tetris::input::{handle_key_event, should_quit};
use pet_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use pet_tetris::types::Command;

/// Redraw cadence while waiting for input
const FRAME: Duration = Duration::from_millis(33);

fn main() -> Result<()> {
    let runtime = Runtime::new()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&runtime, &mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(runtime: &Runtime, term: &mut TerminalRenderer) -> Result<()> {
    let feedback = FeedbackChannel::spawn(
        runtime.handle(),
        Arc::new(OfflineNotifier::new()),
        FeedbackConfig::from_env(),
    );
    let mut driver = GameDriver::new(
        &EngineConfig::from_env(),
        runtime.handle().clone(),
        Some(feedback.sender()),
    );

    driver.start();
    feedback.announce_start();

    let view = GameView::default();
    let flavor = feedback.subscribe();
    let moods = feedback.subscribe_mood();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let snap = driver.snapshot();
        let (mood, _) = *moods.borrow();
        view.render_into(&snap, mood, flavor.borrow().as_str(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if !event::poll(FRAME)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    break;
                }
                let Some(command) = handle_key_event(key) else {
                    continue;
                };
                if command == Command::Restart {
                    feedback.announce_reset();
                }
                driver.handle(command);
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }

    log::info!("leaving at score {}", driver.score());
    driver.stop();
    Ok(())
}
