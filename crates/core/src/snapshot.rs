//! Copy-out render state for hosts.

use crate::piece::ActivePiece;
use crate::session::Phase;
use crate::types::{PieceKind, RenderGrid, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub width: u8,
    pub height: u8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            x: value.x,
            y: value.y,
            width: value.shape.width() as u8,
            height: value.shape.height() as u8,
        }
    }
}

/// Everything a host needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    /// Locked board with the active piece overlaid
    pub grid: RenderGrid,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub pieces: u32,
    pub is_active: bool,
    pub phase: Phase,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            grid: [[0u8; BOARD_WIDTH]; BOARD_HEIGHT],
            active: None,
            score: 0,
            lines: 0,
            pieces: 0,
            is_active: false,
            phase: Phase::Idle,
        }
    }
}
