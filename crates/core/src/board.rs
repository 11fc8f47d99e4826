//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Storage is an owned array of rows so that line clearing can move whole rows.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, RenderGrid, BOARD_HEIGHT, BOARD_WIDTH};

/// One board row
pub type Row = [Cell; BOARD_WIDTH];

const EMPTY_ROW: Row = [None; BOARD_WIDTH];

/// Row indices removed by one clear, bottom to top, in pre-clear coordinates.
pub type ClearedRows = ArrayVec<usize, BOARD_HEIGHT>;

/// The game board - 10 columns x 20 rows of locked cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            rows: [EMPTY_ROW; BOARD_HEIGHT],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<(usize, usize)> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((x as usize, y as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|(x, y)| self.rows[y][x])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some((x, y)) => {
                self.rows[y][x] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Borrow one row
    pub fn row(&self, y: usize) -> Option<&Row> {
        self.rows.get(y)
    }

    /// Number of filled cells on the board
    pub fn filled_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Write `kind` into every absolute cell in `cells`.
    ///
    /// All-or-nothing: returns false without touching the board if any cell is
    /// out of bounds or already occupied.
    pub fn lock_cells(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> bool {
        if !cells.iter().all(|&(x, y)| self.is_valid(x, y)) {
            return false;
        }
        for &(x, y) in cells {
            self.set(x, y, Some(kind));
        }
        true
    }

    /// Remove every full row and compact the rest toward the bottom
    ///
    /// Scans bottom to top with a write cursor: rows that are not full are moved
    /// down to the cursor, full rows are skipped. Rows above the cursor become
    /// empty. Several non-contiguous full rows are handled in one pass and the
    /// surviving rows keep their relative order.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut write_y = BOARD_HEIGHT;

        for read_y in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    self.rows[write_y] = self.rows[read_y];
                }
            }
        }

        for row in &mut self.rows[..write_y] {
            *row = EMPTY_ROW;
        }

        cleared
    }

    /// Copy the board into a cell-value grid (0 empty, 1..=7 type id)
    pub fn write_grid(&self, out: &mut RenderGrid) {
        for (dst, src) in out.iter_mut().zip(self.rows.iter()) {
            for (d, s) in dst.iter_mut().zip(src.iter()) {
                *d = s.map_or(0, |kind| kind.type_id());
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.rows = [EMPTY_ROW; BOARD_HEIGHT];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
