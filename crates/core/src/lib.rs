//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game and nothing else.
//! It has no dependency on timers, UI, networking or the chat service; the tick
//! cadence and notifications live in the engine and feedback crates.
//!
//! # Module Structure
//!
//! - [`shapes`]: the 7 tetromino matrices and clockwise rotation
//! - [`rng`]: uniform random and fixed-sequence piece sources
//! - [`board`]: 10x20 locked-cell grid with line clearing
//! - [`collision`]: the collision oracle
//! - [`piece`]: the active piece and its move / rotate / fall operations
//! - [`session`]: the spawn, fall, lock, clear state machine with scoring
//! - [`snapshot`]: copy-out render state for hosts
//!
//! # Game Rules
//!
//! - Pieces spawn centered at the top (`x = 5 - width / 2`, `y = 0`)
//! - Rotation is a plain clockwise matrix turn with no wall kicks
//! - A piece that cannot fall on a tick locks immediately (no lock delay)
//! - Each cleared line is worth 100 points, with no multi-line bonus
//! - The game ends when a piece locks partly above the field or cannot spawn
//!
//! # Example
//!
//! ```
//! use pet_tetris_core::{GameSession, PieceSequence, StepOutcome};
//! use pet_tetris_types::{Command, PieceKind};
//!
//! let mut game = GameSession::with_source(PieceSequence::repeat(PieceKind::O));
//! game.start();
//!
//! game.apply(Command::MoveLeft);
//! game.apply(Command::Rotate);
//! assert_eq!(game.tick(), StepOutcome::Fell);
//!
//! game.apply(Command::HardDrop);
//! assert_eq!(game.score(), 0);
//! assert_eq!(game.render_grid()[19][3], PieceKind::O.type_id());
//! ```

pub mod board;
pub mod collision;
pub mod piece;
pub mod rng;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use pet_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{collides, collides_shape};
pub use piece::ActivePiece;
pub use rng::{PieceSequence, PieceSource, RandomPieces};
pub use session::{GameSession, Phase, StepOutcome};
pub use shapes::{shape_for, Shape};
pub use snapshot::{ActiveSnapshot, SessionSnapshot};
