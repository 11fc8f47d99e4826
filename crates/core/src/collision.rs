//! Collision oracle
//!
//! Pure validity checks for a piece at a hypothetical position or orientation.
//! Cells above the visible field (negative row) skip the occupancy check but
//! still have to respect the side walls.

use crate::board::Board;
use crate::piece::ActivePiece;
use crate::shapes::Shape;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Would `piece`, shifted by `(offset_x, offset_y)`, leave the field or overlap a locked cell?
pub fn collides(piece: &ActivePiece, board: &Board, offset_x: i8, offset_y: i8) -> bool {
    collides_shape(&piece.shape, piece.x + offset_x, piece.y + offset_y, board)
}

/// Same test for a candidate shape whose bounding box sits at `(x, y)`.
pub fn collides_shape(shape: &Shape, x: i8, y: i8, board: &Board) -> bool {
    shape.filled().any(|(dx, dy)| {
        let bx = x + dx;
        let by = y + dy;
        bx < 0
            || bx >= BOARD_WIDTH as i8
            || by >= BOARD_HEIGHT as i8
            || (by >= 0 && board.is_occupied(bx, by))
    })
}
