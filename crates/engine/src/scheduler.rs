//! Fixed-period tick scheduler.
//!
//! One owned tokio task per scheduler. `start` replaces any running task, so a
//! session never has two tick loops; `stop` (and `Drop`) aborts it. The task
//! also ends by itself once the session reports inactive after a tick.
//!
//! Aborting a task cannot cancel a tick that is already blocked on the session
//! lock, so every loop carries a generation number and re-checks it under the
//! lock. `stop` bumps the generation before returning: a tick that acquires
//! the lock afterwards sees a stale generation and exits without touching the
//! session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::driver::{forward_events, lock_session, EventSender, SharedSession};

pub struct TickScheduler {
    handle: Handle,
    period: Duration,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl TickScheduler {
    pub fn new(handle: Handle, period: Duration) -> Self {
        Self {
            handle,
            period,
            generation: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }

    /// (Re)start ticking `session`. The first tick fires one period from now.
    pub fn start(&mut self, session: SharedSession, events: Option<EventSender>) {
        self.stop();
        let period = self.period;
        let ticket = Ticket {
            generation: Arc::clone(&self.generation),
            issued: self.generation.load(Ordering::SeqCst),
        };
        self.task = Some(self.handle.spawn(run_ticks(session, events, period, ticket)));
        log::debug!("tick scheduler started ({period:?})");
    }

    /// Abort the tick task if one is running. Ticks already waiting on the
    /// session lock are invalidated too.
    pub fn stop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
            log::debug!("tick scheduler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Generation a tick loop was started under
struct Ticket {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl Ticket {
    fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.issued
    }
}

async fn run_ticks(
    session: SharedSession,
    events: Option<EventSender>,
    period: Duration,
    ticket: Ticket,
) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let still_active = {
            let mut session = lock_session(&session);
            if !ticket.is_current() {
                log::debug!("stale tick dropped");
                break;
            }
            session.tick();
            forward_events(&mut session, events.as_ref());
            session.is_active()
        };

        if !still_active {
            log::debug!("session inactive, tick loop exiting");
            break;
        }
    }
}
