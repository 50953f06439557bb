//! Board module - manages the game grid
//!
//! The board is a 10x15 grid where each cell is empty or holds the kind of the
//! piece that locked there. Uses a flat array for cache locality and zero
//! allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..14
//! (top to bottom). Rows above the board (y < 0) are never stored.

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 15 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_column_in_bounds(x: i8) -> bool {
        x >= 0 && x < BOARD_WIDTH as i8
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        y < BOARD_HEIGHT as usize && self.row(y).iter().all(|cell| cell.is_none())
    }

    /// Cells of row `y`.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Remove the `count` rows ending at `bottom` and drop everything above
    /// them by `count`, emptying the vacated top rows.
    pub fn collapse_rows(&mut self, bottom: usize, count: usize) {
        if count == 0 || bottom >= BOARD_HEIGHT as usize || count > bottom + 1 {
            return;
        }

        let width = BOARD_WIDTH as usize;
        // copy_within handles the overlapping ranges
        self.cells
            .copy_within(0..(bottom + 1 - count) * width, count * width);
        for cell in &mut self.cells[..count * width] {
            *cell = None;
        }
    }

    /// Write one cell of a locking piece. Rows above the board are ignored.
    pub fn lock_cell(&mut self, x: i8, y: i8, kind: PieceKind) {
        if y < 0 {
            return;
        }
        self.set(x, y, Some(kind));
    }

    /// Loss check: anything in the top visible row.
    pub fn is_top_row_occupied(&self) -> bool {
        !self.is_row_empty(0)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Reset to all empty (game restart)
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Copy cell ids (0 empty, kind + 1 filled) into a row-major grid.
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * BOARD_WIDTH as usize + x].map_or(0, PieceKind::cell_id);
            }
        }
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// `.` is empty; a piece letter fills the cell with that kind; any other
    /// character fills with `I`. Handy for scenario setup.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_rows(&["OO........", "IIIIIIIII."]);
    /// assert!(board.is_occupied(0, 13));
    /// assert!(!board.is_occupied(9, 14));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let top = BOARD_HEIGHT as usize - rows.len().min(BOARD_HEIGHT as usize);
        for (i, line) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            for (x, ch) in line.chars().take(BOARD_WIDTH as usize).enumerate() {
                if ch == '.' {
                    continue;
                }
                let kind = PieceKind::from_str(&ch.to_string()).unwrap_or(PieceKind::I);
                board.set(x as i8, (top + i) as i8, Some(kind));
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
