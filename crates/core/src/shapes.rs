//! Shape catalog - tetromino cell matrices
//!
//! Each base shape is the rotation-0 matrix of one piece kind. A filled sub-cell
//! holds the piece's type id, so a shape can be written straight onto the board.
//! Rotation never mutates a matrix; it builds the rotated copy.

use crate::types::PieceKind;

/// Largest side of any tetromino bounding box.
pub const MAX_SHAPE_DIM: usize = 4;

/// Immutable `rows x cols` matrix of sub-cells (0 = empty).
///
/// Storage is a fixed 4x4 array; only the top-left `rows x cols` block is
/// meaningful and everything outside it stays zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

const fn shape(rows: u8, cols: u8, cells: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM]) -> Shape {
    Shape { rows, cols, cells }
}

const I_SHAPE: Shape = shape(1, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]);
const O_SHAPE: Shape = shape(2, 2, [[2, 2, 0, 0], [2, 2, 0, 0], [0; 4], [0; 4]]);
const T_SHAPE: Shape = shape(2, 3, [[0, 3, 0, 0], [3, 3, 3, 0], [0; 4], [0; 4]]);
const S_SHAPE: Shape = shape(2, 3, [[0, 4, 4, 0], [4, 4, 0, 0], [0; 4], [0; 4]]);
const Z_SHAPE: Shape = shape(2, 3, [[5, 5, 0, 0], [0, 5, 5, 0], [0; 4], [0; 4]]);
const J_SHAPE: Shape = shape(2, 3, [[6, 0, 0, 0], [6, 6, 6, 0], [0; 4], [0; 4]]);
const L_SHAPE: Shape = shape(2, 3, [[0, 0, 7, 0], [7, 7, 7, 0], [0; 4], [0; 4]]);

/// Get the canonical (rotation-0) shape for a piece kind
pub fn shape_for(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

impl Shape {
    /// Build a shape from explicit rows.
    ///
    /// Returns `None` when the matrix is empty, ragged, or larger than 4x4.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height > MAX_SHAPE_DIM || width == 0 || width > MAX_SHAPE_DIM {
            return None;
        }
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }

        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            cells[r][..width].copy_from_slice(row);
        }
        Some(shape(height as u8, width as u8, cells))
    }

    /// Number of rows in the bounding box
    pub fn height(&self) -> usize {
        self.rows as usize
    }

    /// Number of columns in the bounding box
    pub fn width(&self) -> usize {
        self.cols as usize
    }

    /// Sub-cell value at (row, col); 0 outside the bounding box.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        if row >= self.height() || col >= self.width() {
            return 0;
        }
        self.cells[row][col]
    }

    /// One row of the matrix, trimmed to the shape width; empty past the last row.
    pub fn row(&self, row: usize) -> &[u8] {
        if row >= self.height() {
            return &[];
        }
        &self.cells[row][..self.width()]
    }

    /// Offsets `(col, row)` of every filled sub-cell, top-left first.
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height()).flat_map(move |r| {
            (0..self.width())
                .filter(move |&c| self.cells[r][c] != 0)
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Clockwise quarter turn.
    ///
    /// An `R x C` matrix becomes `C x R` with `new[r][c] = old[R - 1 - c][r]`:
    /// the transpose with each row reversed.
    pub fn rotate_cw(&self) -> Shape {
        let old_rows = self.height();
        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in cells.iter_mut().enumerate().take(self.width()) {
            for (c, cell) in row.iter_mut().enumerate().take(old_rows) {
                *cell = self.cells[old_rows - 1 - c][r];
            }
        }
        shape(self.cols, self.rows, cells)
    }
}
