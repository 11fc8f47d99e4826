//! Game session module - the spawn / fall / lock / clear cycle
//!
//! This module ties together the board, the active piece controller and the
//! piece source. Every transition runs synchronously inside one call, so a
//! caller only ever observes [`Phase::Idle`], [`Phase::Falling`] or
//! [`Phase::GameOver`] between calls.
//!
//! Events (`LinesCleared`, `GameOver`) are queued rather than delivered; the
//! host drains them with [`GameSession::drain_events`] and decides how to
//! notify anyone. The session never waits on an observer.

use std::vec::Drain;

use crate::board::Board;
use crate::collision::collides;
use crate::piece::ActivePiece;
use crate::rng::{PieceSource, RandomPieces};
use crate::snapshot::{ActiveSnapshot, SessionSnapshot};
use crate::types::{Command, GameEvent, RenderGrid, BOARD_HEIGHT, BOARD_WIDTH, POINTS_PER_LINE};

/// State machine position of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not started, or stopped by the host
    Idle,
    Spawning,
    Falling,
    Locking,
    LineClearing,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Spawning => "spawning",
            Phase::Falling => "falling",
            Phase::Locking => "locking",
            Phase::LineClearing => "lineClearing",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Result of one fall step (a tick or a manual drop)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Session inactive or no piece; nothing happened
    Ignored,
    /// The piece fell one row
    Fell,
    /// The piece locked and a new one spawned
    Locked { lines_cleared: u32 },
    /// The lock (or the following spawn) ended the game
    GameOver,
}

/// Complete game session state
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    active: Option<ActivePiece>,
    source: Box<dyn PieceSource>,
    /// Only ever increases within a game: `POINTS_PER_LINE` per cleared line.
    score: u32,
    lines: u32,
    pieces: u32,
    is_active: bool,
    phase: Phase,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create an idle session drawing uniformly random pieces.
    ///
    /// `Some(seed)` makes the piece order reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_source(RandomPieces::new(seed)),
            None => Self::with_source(RandomPieces::from_entropy()),
        }
    }

    /// Create an idle session with a custom piece source
    pub fn with_source(source: impl PieceSource + 'static) -> Self {
        Self {
            board: Board::new(),
            active: None,
            source: Box::new(source),
            score: 0,
            lines: 0,
            pieces: 0,
            is_active: false,
            phase: Phase::Idle,
            events: Vec::new(),
        }
    }

    /// Start a game if none is running
    pub fn start(&mut self) -> bool {
        if self.is_active {
            return false;
        }
        self.reset();
        true
    }

    /// Clear the board and score, reactivate, and spawn the first piece.
    ///
    /// Serves as both "new game" and "try again".
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.pieces = 0;
        self.is_active = true;
        log::info!("game session reset");
        self.spawn_piece();
    }

    /// Deactivate without a game over (the player left the game).
    ///
    /// The board and piece stay visible; no event is queued.
    pub fn stop(&mut self) {
        if !self.is_active {
            return;
        }
        self.is_active = false;
        self.phase = Phase::Idle;
        log::info!("game session stopped at score {}", self.score);
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Lines cleared in the current game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Pieces spawned in the current game
    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for hosts that seed a puzzle layout before play
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Take the queued events, oldest first
    pub fn drain_events(&mut self) -> Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// The falling piece, if input may act on it
    fn controllable(&self) -> Option<ActivePiece> {
        if !self.is_active {
            return None;
        }
        self.active
    }

    /// Move the active piece one column (`-1` left, `+1` right)
    pub fn move_piece(&mut self, direction: i8) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        match piece.try_move(&self.board, direction) {
            Some(moved) => {
                self.active = Some(moved);
                true
            }
            None => false,
        }
    }

    /// Rotate the active piece clockwise (no wall kicks)
    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        match piece.try_rotate(&self.board) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Fall one row without locking. Returns whether the piece moved.
    pub fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        match piece.try_fall(&self.board) {
            Some(fallen) => {
                self.active = Some(fallen);
                true
            }
            None => false,
        }
    }

    /// Fall one row, or lock when the piece cannot fall.
    ///
    /// This is both the gravity tick and the manual drop command.
    pub fn drop_step(&mut self) -> StepOutcome {
        if self.controllable().is_none() {
            return StepOutcome::Ignored;
        }
        if self.soft_drop() {
            return StepOutcome::Fell;
        }
        self.lock_piece()
    }

    /// Gravity tick
    pub fn tick(&mut self) -> StepOutcome {
        self.drop_step()
    }

    /// Fall until grounded, then lock
    pub fn hard_drop(&mut self) -> StepOutcome {
        if self.controllable().is_none() {
            return StepOutcome::Ignored;
        }
        while self.soft_drop() {}
        self.lock_piece()
    }

    /// Apply a logical input command
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_piece(-1),
            Command::MoveRight => self.move_piece(1),
            Command::Rotate => self.rotate(),
            Command::SoftDropStep => self.drop_step() != StepOutcome::Ignored,
            Command::HardDrop => self.hard_drop() != StepOutcome::Ignored,
            Command::Restart => {
                self.reset();
                true
            }
        }
    }

    /// Lock the active piece, clear rows, score, and spawn the next piece
    fn lock_piece(&mut self) -> StepOutcome {
        let Some(piece) = self.active else {
            return StepOutcome::Ignored;
        };
        self.phase = Phase::Locking;

        let cells = piece.cells();
        // Part of the piece never entered the field: overflow.
        if cells.iter().any(|&(_, y)| y < 0) {
            self.game_over();
            return StepOutcome::GameOver;
        }
        if !self.board.lock_cells(&cells, piece.kind) {
            log::warn!("lock of {:?} at ({}, {}) overlaps the board", piece.kind, piece.x, piece.y);
            self.game_over();
            return StepOutcome::GameOver;
        }
        self.active = None;

        let cleared = self.board.clear_full_rows();
        let lines_cleared = cleared.len() as u32;
        log::debug!(
            "locked {:?} at ({}, {}), cleared {}",
            piece.kind,
            piece.x,
            piece.y,
            lines_cleared
        );

        if lines_cleared > 0 {
            self.phase = Phase::LineClearing;
            self.lines += lines_cleared;
            self.score = self.score.saturating_add(lines_cleared * POINTS_PER_LINE);
            self.events.push(GameEvent::LinesCleared {
                count: lines_cleared,
                score: self.score,
            });
        }

        if !self.spawn_piece() {
            return StepOutcome::GameOver;
        }
        StepOutcome::Locked { lines_cleared }
    }

    /// Draw the next kind and place it at the spawn position
    fn spawn_piece(&mut self) -> bool {
        self.phase = Phase::Spawning;
        let kind = self.source.next_kind();
        let piece = ActivePiece::spawn(kind);
        self.active = Some(piece);

        // Spawned on top of locked cells: it can never enter the field.
        if collides(&piece, &self.board, 0, 0) {
            self.game_over();
            return false;
        }

        self.pieces += 1;
        self.phase = Phase::Falling;
        log::debug!("spawned {:?} at ({}, {})", kind, piece.x, piece.y);
        true
    }

    /// The offending piece stays as `active` so the final frame still shows it.
    fn game_over(&mut self) {
        self.is_active = false;
        self.phase = Phase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("game over at score {}", self.score);
    }

    /// Copy of the locked board with the active piece drawn on top.
    ///
    /// Piece cells outside the visible field are skipped. Neither the board
    /// nor the piece is touched.
    pub fn render_grid(&self) -> RenderGrid {
        let mut grid = [[0u8; BOARD_WIDTH]; BOARD_HEIGHT];
        self.board.write_grid(&mut grid);
        if let Some(piece) = self.active {
            let id = piece.kind.type_id();
            for (x, y) in piece.cells() {
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    grid[y as usize][x as usize] = id;
                }
            }
        }
        grid
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.grid = self.render_grid();
        out.active = self.active.map(ActiveSnapshot::from);
        out.score = self.score;
        out.lines = self.lines;
        out.pieces = self.pieces;
        out.is_active = self.is_active;
        out.phase = self.phase;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    fn set_active(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PieceSequence;
    use crate::shapes::shape_for;
    use crate::types::PieceKind;

    fn session_of(kind: PieceKind) -> GameSession {
        let mut session = GameSession::with_source(PieceSequence::repeat(kind));
        session.start();
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::new(Some(1));
        assert!(!session.is_active());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.active().is_none());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_start_spawns_centered_piece() {
        let session = session_of(PieceKind::I);
        assert!(session.is_active());
        assert_eq!(session.phase(), Phase::Falling);
        let piece = session.active().unwrap();
        assert_eq!((piece.x, piece.y), (3, 0));
        assert_eq!(session.pieces(), 1);
    }

    #[test]
    fn test_start_is_noop_while_active() {
        let mut session = session_of(PieceKind::O);
        session.move_piece(-1);
        assert!(!session.start());
        assert_eq!(session.active().unwrap().x, 3);
    }

    #[test]
    fn test_controls_ignored_when_inactive() {
        let mut session = GameSession::with_source(PieceSequence::repeat(PieceKind::T));
        assert!(!session.move_piece(1));
        assert!(!session.rotate());
        assert!(!session.soft_drop());
        assert_eq!(session.tick(), StepOutcome::Ignored);
        assert_eq!(session.hard_drop(), StepOutcome::Ignored);

        session.start();
        session.stop();
        let before = session.active();
        assert!(!session.move_piece(1));
        assert!(!session.rotate());
        assert_eq!(session.tick(), StepOutcome::Ignored);
        assert_eq!(session.active(), before);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_tick_falls_then_locks() {
        let mut session = session_of(PieceKind::O);
        for _ in 0..18 {
            assert_eq!(session.tick(), StepOutcome::Fell);
        }
        assert_eq!(session.tick(), StepOutcome::Locked { lines_cleared: 0 });
        assert_eq!(session.board().get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(session.board().get(5, 18), Some(Some(PieceKind::O)));
        // Next piece spawned at the top.
        assert_eq!(session.active().unwrap().y, 0);
        assert_eq!(session.pieces(), 2);
    }

    #[test]
    fn test_lock_clears_line_and_scores() {
        let mut session = session_of(PieceKind::I);
        for x in 0..6 {
            session.board_mut().set(x, 19, Some(PieceKind::J));
        }
        // I spawns at x=3; move right to cover columns 6..=9.
        for _ in 0..3 {
            assert!(session.move_piece(1));
        }
        assert_eq!(session.hard_drop(), StepOutcome::Locked { lines_cleared: 1 });
        assert_eq!(session.score(), 100);
        assert_eq!(session.lines(), 1);
        assert_eq!(session.board().filled_count(), 0);
        let events: Vec<_> = session.drain_events().collect();
        assert_eq!(events, vec![GameEvent::LinesCleared { count: 1, score: 100 }]);
    }

    #[test]
    fn test_four_line_clear_scores_flat() {
        let mut session = session_of(PieceKind::I);
        for y in 16..20 {
            for x in 0..9 {
                session.board_mut().set(x, y, Some(PieceKind::L));
            }
        }
        assert!(session.rotate());
        // Vertical I sits in column 3 after rotation; push it to column 9.
        while session.move_piece(1) {}
        assert_eq!(session.active().unwrap().x, 9);
        assert_eq!(session.hard_drop(), StepOutcome::Locked { lines_cleared: 4 });
        assert_eq!(session.score(), 400);
    }

    #[test]
    fn test_game_over_on_negative_row_leaves_board_untouched() {
        let mut session = session_of(PieceKind::T);
        session.board_mut().set(5, 2, Some(PieceKind::S));
        let before = session.board().clone();

        // Vertical I over rows -2..=1, resting on the block at row 2.
        session.set_active(ActivePiece {
            shape: shape_for(PieceKind::I).rotate_cw(),
            x: 5,
            y: -2,
            kind: PieceKind::I,
        });

        assert_eq!(session.tick(), StepOutcome::GameOver);
        assert!(!session.is_active());
        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.board(), &before);
        let events: Vec<_> = session.drain_events().collect();
        assert_eq!(events, vec![GameEvent::GameOver { score: 0 }]);
    }

    /// Park the current O at the left wall, block the spawn area, then lock.
    fn force_spawn_overflow(session: &mut GameSession) -> StepOutcome {
        while session.move_piece(-1) {}
        // The next O spawns over columns 4..=5, rows 0..=1.
        session.board_mut().set(4, 1, Some(PieceKind::T));
        session.hard_drop()
    }

    #[test]
    fn test_spawn_overflow_is_game_over() {
        let mut session = session_of(PieceKind::O);
        assert_eq!(force_spawn_overflow(&mut session), StepOutcome::GameOver);
        assert!(!session.is_active());
        // The locked piece is on the board; the blocked spawn wrote nothing.
        assert_eq!(session.board().get(0, 19), Some(Some(PieceKind::O)));
        assert_eq!(session.board().get(5, 0), Some(None));
        assert_eq!(session.board().filled_count(), 5);
        let events: Vec<_> = session.drain_events().collect();
        assert_eq!(events, vec![GameEvent::GameOver { score: 0 }]);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut session = session_of(PieceKind::O);
        force_spawn_overflow(&mut session);
        assert!(!session.is_active());

        assert!(session.apply(Command::Restart));
        assert!(session.is_active());
        assert_eq!(session.score(), 0);
        assert_eq!(session.board().filled_count(), 0);
        assert_eq!(session.phase(), Phase::Falling);
    }

    #[test]
    fn test_render_grid_overlays_without_mutating() {
        let mut session = session_of(PieceKind::T);
        session.board_mut().set(0, 19, Some(PieceKind::L));

        let mut grid = session.render_grid();
        assert_eq!(grid[19][0], 7);
        assert_eq!(grid[0][5], 3);
        assert_eq!(grid[1][4], 3);
        assert_eq!(grid[0][4], 0);

        // Editing the copy does not reach the session.
        grid[19][0] = 0;
        assert_eq!(session.board().get(0, 19), Some(Some(PieceKind::L)));
        assert_eq!(session.board().get(5, 0), Some(None));
    }

    #[test]
    fn test_render_grid_skips_cells_above_field() {
        let mut session = session_of(PieceKind::I);
        session.set_active(ActivePiece {
            shape: shape_for(PieceKind::I).rotate_cw(),
            x: 2,
            y: -2,
            kind: PieceKind::I,
        });
        let grid = session.render_grid();
        assert_eq!(grid[0][2], 1);
        assert_eq!(grid[1][2], 1);
        assert_eq!(grid[2][2], 0);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let session = session_of(PieceKind::S);
        let snap = session.snapshot();
        assert!(snap.is_active);
        assert_eq!(snap.phase, Phase::Falling);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.active.unwrap().kind, PieceKind::S);
        assert_eq!(snap.grid, session.render_grid());
    }
}
