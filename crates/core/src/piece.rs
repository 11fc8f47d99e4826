//! Active piece controller
//!
//! An [`ActivePiece`] is a value: every successful move, rotation or fall
//! returns a new piece and leaves the old one untouched. Each operation asks the
//! collision oracle first and returns `None` when the change is rejected.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::collision::{collides, collides_shape};
use crate::shapes::{shape_for, Shape};
use crate::types::{PieceKind, BOARD_WIDTH};

/// Absolute board coordinates of a piece's filled cells.
pub type PieceCells = ArrayVec<(i8, i8), 16>;

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    /// Current orientation (a derived matrix after rotations)
    pub shape: Shape,
    /// Column of the bounding box's left edge
    pub x: i8,
    /// Row of the bounding box's top edge; negative while above the field
    pub y: i8,
    pub kind: PieceKind,
}

/// Spawn column: the bounding box is centered, rounding toward the left.
pub fn spawn_x(shape: &Shape) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape.width() / 2) as i8
}

impl ActivePiece {
    /// Create a piece of `kind` at the spawn position (centered, row 0)
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = shape_for(kind);
        Self {
            shape,
            x: spawn_x(&shape),
            y: 0,
            kind,
        }
    }

    /// Absolute coordinates of every filled sub-cell
    pub fn cells(&self) -> PieceCells {
        self.shape
            .filled()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Shift one column left (`-1`) or right (`+1`)
    pub fn try_move(&self, board: &Board, direction: i8) -> Option<Self> {
        if direction != -1 && direction != 1 {
            return None;
        }
        if collides(self, board, direction, 0) {
            return None;
        }
        Some(Self {
            x: self.x + direction,
            ..*self
        })
    }

    /// Rotate clockwise in place; rejected outright on collision (no kicks)
    pub fn try_rotate(&self, board: &Board) -> Option<Self> {
        let rotated = self.shape.rotate_cw();
        if collides_shape(&rotated, self.x, self.y, board) {
            return None;
        }
        Some(Self {
            shape: rotated,
            ..*self
        })
    }

    /// Fall one row
    pub fn try_fall(&self, board: &Board) -> Option<Self> {
        if collides(self, board, 0, 1) {
            return None;
        }
        Some(Self {
            y: self.y + 1,
            ..*self
        })
    }

    /// Lowest position reachable by falling straight down
    pub fn landing(&self, board: &Board) -> Self {
        let mut piece = *self;
        while let Some(next) = piece.try_fall(board) {
            piece = next;
        }
        piece
    }
}
