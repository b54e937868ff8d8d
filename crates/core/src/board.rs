//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is empty or holds the
//! kind of the piece that settled there. Storage is a flat row-major vector
//! allocated once; only cell values change after construction.
//!
//! Coordinates: `(col, row)` where `col` runs left to right and `row` top to
//! bottom. Coordinates are signed so callers can ask about cells just outside
//! the grid (a piece hanging over an edge) without casting.

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_DIM};

/// The settled-cell grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the default 10x20 dimensions
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create a new empty board with the given dimensions
    ///
    /// # Panics
    ///
    /// Panics if either side is zero or larger than [`MAX_BOARD_DIM`].
    pub fn with_size(width: u8, height: u8) -> Self {
        assert!(
            (1..=MAX_BOARD_DIM).contains(&width) && (1..=MAX_BOARD_DIM).contains(&height),
            "board dimensions must be within 1..={MAX_BOARD_DIM}, got {width}x{height}"
        );
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, col: i8, row: i8) -> Option<usize> {
        if !self.is_inside_bounds(col, row) {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn is_inside_bounds(&self, col: i8, row: i8) -> bool {
        col >= 0 && row >= 0 && (col as u8) < self.width && (row as u8) < self.height
    }

    /// Check if position is inside the grid and filled
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Get cell at `(col, row)`, `None` if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Settle a cell. Returns false (and changes nothing) if out of bounds.
    pub fn set_cell(&mut self, col: i8, row: i8, kind: PieceKind) -> bool {
        self.write(col, row, Some(kind))
    }

    /// Empty a cell. Returns false (and changes nothing) if out of bounds.
    pub fn clear_cell(&mut self, col: i8, row: i8) -> bool {
        self.write(col, row, None)
    }

    fn write(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Cells of one row, left to right
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    pub fn row(&self, row: usize) -> &[Cell] {
        let width = self.width as usize;
        &self.cells[row * width..(row + 1) * width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.height as usize && self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Empty a single row in place (no shifting)
    pub fn clear_row(&mut self, row: usize) {
        if row >= self.height as usize {
            return;
        }
        let width = self.width as usize;
        self.cells[row * width..(row + 1) * width].fill(None);
    }

    /// Remove `row`, shift every row above it down by one and put an empty
    /// row at the top. The grid keeps its dimensions.
    pub fn remove_row_and_shift_down(&mut self, row: usize) {
        if row >= self.height as usize {
            return;
        }
        let width = self.width as usize;

        // Rows 0..row move to 1..=row; copy_within handles the overlap.
        self.cells.copy_within(0..row * width, width);
        self.clear_row(0);
    }

    /// Empty the whole grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Flat row-major view of every cell
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of settled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Export shape ids (0 = empty) row-major into `out`, reusing its allocation.
    pub fn write_id_grid(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|c| c.map_or(0, |k| k.id())));
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
