//! Game driver: single-writer access to a session.
//!
//! The tick task and every input handler go through the same mutex, so a tick
//! never interleaves with a move or a rotation. The driver also owns the tick
//! scheduler and keeps its lifecycle in step with the session: started on
//! start/reset, stopped whenever the session goes inactive.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::config::EngineConfig;
use crate::core::{GameSession, SessionSnapshot};
use crate::scheduler::TickScheduler;
use crate::types::{Command, GameEvent, RenderGrid};

/// A session shared between the tick task and input handlers
pub type SharedSession = Arc<Mutex<GameSession>>;

/// Outbound event channel (usually the feedback channel's sender)
pub type EventSender = mpsc::UnboundedSender<GameEvent>;

/// Lock a shared session. A poisoned lock still yields the session: every
/// mutation completes before the guard drops, so the state is consistent.
pub fn lock_session(session: &SharedSession) -> MutexGuard<'_, GameSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Move queued session events to `events`. Without a listener they are dropped.
pub fn forward_events(session: &mut GameSession, events: Option<&EventSender>) {
    for event in session.drain_events() {
        let Some(tx) = events else {
            continue;
        };
        if tx.send(event).is_err() {
            log::debug!("event listener gone, dropping {event:?}");
        }
    }
}

pub struct GameDriver {
    session: SharedSession,
    scheduler: TickScheduler,
    events: Option<EventSender>,
}

impl GameDriver {
    /// Create a driver with a fresh idle session built from `config`
    pub fn new(config: &EngineConfig, handle: Handle, events: Option<EventSender>) -> Self {
        Self::with_session(GameSession::new(config.seed), config, handle, events)
    }

    /// Create a driver around an existing session
    pub fn with_session(
        session: GameSession,
        config: &EngineConfig,
        handle: Handle,
        events: Option<EventSender>,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            scheduler: TickScheduler::new(handle, config.tick_period),
            events,
        }
    }

    /// Start a game if none is running, and the tick loop with it
    pub fn start(&mut self) -> bool {
        if self.scheduler.is_running() && self.is_active() {
            return false;
        }
        self.scheduler.stop();
        let started = {
            let mut session = lock_session(&self.session);
            let started = session.start();
            forward_events(&mut session, self.events.as_ref());
            started
        };
        self.sync_scheduler();
        started
    }

    /// New game: clear everything and restart the tick loop. The old loop is
    /// retired before the session is touched, so none of its ticks can land
    /// on the new game.
    pub fn reset(&mut self) {
        self.scheduler.stop();
        {
            let mut session = lock_session(&self.session);
            session.reset();
            forward_events(&mut session, self.events.as_ref());
        }
        self.sync_scheduler();
    }

    /// Leave the game: stop ticking and deactivate the session
    pub fn stop(&mut self) {
        self.scheduler.stop();
        lock_session(&self.session).stop();
    }

    /// Apply one input command synchronously
    pub fn handle(&mut self, command: Command) -> bool {
        if command == Command::Restart {
            self.reset();
            return true;
        }

        let (applied, still_active) = {
            let mut session = lock_session(&self.session);
            let applied = session.apply(command);
            forward_events(&mut session, self.events.as_ref());
            (applied, session.is_active())
        };
        if !still_active {
            self.scheduler.stop();
        }
        applied
    }

    /// Restart the tick task when the session is active, stop it otherwise
    fn sync_scheduler(&mut self) {
        if lock_session(&self.session).is_active() {
            self.scheduler.start(Arc::clone(&self.session), self.events.clone());
        } else {
            self.scheduler.stop();
        }
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        lock_session(&self.session).snapshot()
    }

    pub fn render_grid(&self) -> RenderGrid {
        lock_session(&self.session).render_grid()
    }

    pub fn score(&self) -> u32 {
        lock_session(&self.session).score()
    }

    pub fn is_active(&self) -> bool {
        lock_session(&self.session).is_active()
    }

    /// Shared handle to the session, for hosts that need direct access
    pub fn session(&self) -> SharedSession {
        Arc::clone(&self.session)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::{PieceSequence, Phase};
    use crate::types::PieceKind;

    const PERIOD: Duration = Duration::from_millis(800);

    fn driver_of(kind: PieceKind, events: Option<EventSender>) -> GameDriver {
        let config = EngineConfig::default().with_tick_period(PERIOD);
        let session = GameSession::with_source(PieceSequence::repeat(kind));
        GameDriver::with_session(session, &config, Handle::current(), events)
    }

    fn active_y(driver: &GameDriver) -> i8 {
        driver.snapshot().active.map(|a| a.y).unwrap_or(-1)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_move_the_piece_down_each_period() {
        let mut driver = driver_of(PieceKind::O, None);
        assert!(driver.start());
        assert!(driver.is_ticking());
        assert_eq!(active_y(&driver), 0);

        tokio::time::sleep(PERIOD / 2).await;
        assert_eq!(active_y(&driver), 0);

        tokio::time::sleep(PERIOD * 3).await;
        assert_eq!(active_y(&driver), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_tick_loop() {
        let mut driver = driver_of(PieceKind::O, None);
        driver.start();
        tokio::time::sleep(PERIOD + PERIOD / 2).await;
        assert_eq!(active_y(&driver), 1);

        driver.stop();
        assert!(!driver.is_ticking());
        tokio::time::sleep(PERIOD * 5).await;
        assert_eq!(active_y(&driver), 1);
        assert_eq!(driver.snapshot().phase, Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn input_does_not_reset_the_tick_schedule() {
        let mut driver = driver_of(PieceKind::O, None);
        driver.start();
        tokio::time::sleep(PERIOD / 2).await;

        // Manual drop half-way through a period.
        assert!(driver.handle(Command::SoftDropStep));
        assert_eq!(active_y(&driver), 1);

        // The scheduled tick still lands at the original deadline.
        tokio::time::sleep(PERIOD / 2 + Duration::from_millis(10)).await;
        assert_eq!(active_y(&driver), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn game_over_stops_ticking_and_reset_restarts() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut driver = driver_of(PieceKind::O, Some(tx));
        driver.start();

        {
            let session = driver.session();
            let mut session = lock_session(&session);
            session.board_mut().set(4, 2, Some(PieceKind::T));
        }
        // O at rows 0..=1 rests on (4, 2): locks, and the next O cannot spawn.
        assert!(driver.handle(Command::SoftDropStep));
        assert!(!driver.is_active());
        assert!(!driver.is_ticking());
        assert_eq!(rx.try_recv().ok(), Some(GameEvent::GameOver { score: 0 }));

        driver.handle(Command::Restart);
        assert!(driver.is_active());
        assert!(driver.is_ticking());
        tokio::time::sleep(PERIOD + PERIOD / 2).await;
        assert_eq!(active_y(&driver), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_replaces_the_running_loop() {
        let mut driver = driver_of(PieceKind::I, None);
        driver.start();
        tokio::time::sleep(PERIOD / 2).await;
        driver.reset();
        driver.reset();

        // One loop only: exactly one row per period after the last reset.
        tokio::time::sleep(PERIOD * 2 + PERIOD / 4).await;
        assert_eq!(active_y(&driver), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_loop_forwards_line_clears() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut driver = driver_of(PieceKind::I, Some(tx));
        driver.start();
        {
            let session = driver.session();
            let mut session = lock_session(&session);
            // Leave exactly the spawn columns of the I (3..=6) open on the floor row.
            for x in (0..3).chain(7..10) {
                session.board_mut().set(x, 19, Some(PieceKind::J));
            }
        }

        // 19 falling ticks, then the 20th locks and clears the row.
        tokio::time::sleep(PERIOD * 20 + PERIOD / 2).await;
        assert_eq!(
            rx.try_recv().ok(),
            Some(GameEvent::LinesCleared { count: 1, score: 100 })
        );
        assert_eq!(driver.score(), 100);
        assert!(driver.is_ticking());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn reset_drops_a_tick_blocked_on_the_lock() {
        let period = Duration::from_millis(40);
        let config = EngineConfig::default().with_tick_period(period);
        let session = GameSession::with_source(PieceSequence::repeat(PieceKind::O));
        let mut driver = GameDriver::with_session(session, &config, Handle::current(), None);
        driver.start();

        for _ in 0..10 {
            {
                // Hold the lock past a tick deadline so the tick task parks on it.
                let session = driver.session();
                let _guard = lock_session(&session);
                std::thread::sleep(period * 2);
            }
            driver.reset();
            tokio::time::sleep(Duration::from_millis(5)).await;
            assert_eq!(active_y(&driver), 0);
        }
    }
}
