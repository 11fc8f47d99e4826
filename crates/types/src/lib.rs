//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, scheduler, feedback, terminal host).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Cell Values
//!
//! On the render surface a cell is a `u8`: `0` is empty and `1..=7` is the
//! identity of the tetromino that occupies it (I=1, O=2, T=3, S=4, Z=5, J=6, L=7).
//!
//! # Examples
//!
//! ```
//! use pet_tetris_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.type_id(), 3);
//! assert_eq!(PieceKind::from_type_id(3), Some(PieceKind::T));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Default gravity tick period in milliseconds
pub const TICK_MS: u64 = 800;

/// Points awarded per cleared line. Flat: a 4-line clear scores 4x this.
pub const POINTS_PER_LINE: u32 = 100;

/// A cell on the locked board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by the given piece kind
pub type Cell = Option<PieceKind>;

/// Copy of the visible playfield as cell values, row-major (`grid[y][x]`).
pub type RenderGrid = [[u8; BOARD_WIDTH]; BOARD_HEIGHT];

/// The seven tetromino piece kinds
///
/// Declaration order matches the type id (`I` is 1, `L` is 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in type id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Identity index used as the cell value (1..=7).
    pub fn type_id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::type_id`]; `0` and values above 7 yield `None`.
    ///
    /// ```
    /// use pet_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_type_id(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_type_id(7), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_type_id(0), None);
    /// assert_eq!(PieceKind::from_type_id(8), None);
    /// ```
    pub fn from_type_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }
}

/// Logical input commands accepted by a game session
///
/// These are the only input the engine knows about; key codes and other device
/// details stay in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Fall one row, locking the piece if it cannot fall
    SoftDropStep,
    /// Fall until grounded, then lock
    HardDrop,
    /// Start a fresh game (also "try again" after game over)
    Restart,
}

/// Outbound event emitted by a session after a lock.
///
/// Events carry the score at the time they were raised so observers never need
/// to read back into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// One lock removed `count` rows.
    LinesCleared { count: u32, score: u32 },
    /// The session became inactive because a piece could not enter the field.
    GameOver { score: u32 },
}

/// Expression of the companion pet next to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mood {
    /// Resting expression while a game runs
    #[default]
    Mentor,
    /// Shown for a short while after a line clear
    Happy,
    /// Shown after a game over, until the next game
    Shy,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Mentor => "MENTOR",
            Mood::Happy => "HAPPY",
            Mood::Shy => "SHY",
        }
    }
}
