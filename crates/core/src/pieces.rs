//! Pieces module - tetromino catalog and matrix rotation
//!
//! Every shape is a small occupancy matrix sized to its tight bounding box:
//! the I piece is 1x4, the O piece 2x2 and the remaining five are 2x3.
//! Rotation rebuilds the matrix (so a 1x4 becomes a 4x1); the caller keeps the
//! top-left corner where it was and decides whether the result fits.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, RotateDirection, MINOS_PER_PIECE};

/// Largest matrix side in the catalog
pub const MAX_MATRIX_DIM: usize = 4;

/// Offset of a single occupied cell relative to the matrix's top-left corner
pub type MinoOffset = (i8, i8);

/// Rectangular occupancy matrix of at most 4x4 cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_MATRIX_DIM]; MAX_MATRIX_DIM],
}

impl ShapeMatrix {
    /// Build from row bit patterns; the lowest `cols` bits of each row are
    /// read most-significant first (`0b010` is `.#.`).
    const fn from_rows(rows: u8, cols: u8, bits: [u8; MAX_MATRIX_DIM]) -> Self {
        let mut cells = [[false; MAX_MATRIX_DIM]; MAX_MATRIX_DIM];
        let mut r = 0;
        while r < rows as usize {
            let mut c = 0;
            while c < cols as usize {
                cells[r][c] = (bits[r] >> (cols as usize - 1 - c)) & 1 == 1;
                c += 1;
            }
            r += 1;
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Occupancy at `(col, row)` of the matrix; false outside it
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// Occupied cells as `(col, row)` offsets, scanning row by row
    pub fn occupied(&self) -> ArrayVec<MinoOffset, MINOS_PER_PIECE> {
        let mut out = ArrayVec::new();
        for row in 0..self.rows as usize {
            for col in 0..self.cols as usize {
                if self.cells[row][col] {
                    let _ = out.try_push((col as i8, row as i8));
                }
            }
        }
        out
    }

    /// A 90° rotation of this matrix.
    ///
    /// Clockwise: transpose, then reverse each row.
    /// Counter-clockwise: transpose, then reverse the row order.
    pub fn rotated(&self, direction: RotateDirection) -> Self {
        let (rows, cols) = (self.cols as usize, self.rows as usize);
        let mut cells = [[false; MAX_MATRIX_DIM]; MAX_MATRIX_DIM];

        for (r, out_row) in cells.iter_mut().enumerate().take(rows) {
            for (c, out) in out_row.iter_mut().enumerate().take(cols) {
                // Transposed cell (r, c) is source (c, r).
                *out = match direction {
                    RotateDirection::Cw => self.cells[cols - 1 - c][r],
                    RotateDirection::Ccw => self.cells[c][rows - 1 - r],
                };
            }
        }

        Self {
            rows: rows as u8,
            cols: cols as u8,
            cells,
        }
    }

    /// Same dimensions and same occupied cells
    pub fn same_occupancy(&self, other: &ShapeMatrix) -> bool {
        self == other
    }
}

const I_SHAPE: ShapeMatrix = ShapeMatrix::from_rows(1, 4, [0b1111, 0, 0, 0]);
const O_SHAPE: ShapeMatrix = ShapeMatrix::from_rows(2, 2, [0b11, 0b11, 0, 0]);
const T_SHAPE: ShapeMatrix = ShapeMatrix::from_rows(2, 3, [0b010, 0b111, 0, 0]);
const S_SHAPE: ShapeMatrix = ShapeMatrix::from_rows(2, 3, [0b011, 0b110, 0, 0]);
const Z_SHAPE: ShapeMatrix = ShapeMatrix::from_rows(2, 3, [0b110, 0b011, 0, 0]);
const J_SHAPE: ShapeMatrix = ShapeMatrix::from_rows(2, 3, [0b100, 0b111, 0, 0]);
const L_SHAPE: ShapeMatrix = ShapeMatrix::from_rows(2, 3, [0b001, 0b111, 0, 0]);

/// Spawn orientation of a piece kind
pub fn shape_of(kind: PieceKind) -> ShapeMatrix {
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

/// A piece: its kind, current matrix and the board position of the matrix's
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    /// Column of the matrix's left edge
    pub x: i8,
    /// Row of the matrix's top edge
    pub y: i8,
}

impl Piece {
    /// A piece in spawn orientation at `(x, y)`
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            matrix: shape_of(kind),
            x,
            y,
        }
    }

    /// Absolute board coordinates of the occupied cells
    pub fn cells(&self) -> ArrayVec<(i8, i8), MINOS_PER_PIECE> {
        self.matrix
            .occupied()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Lowest board row any occupied cell reaches
    pub fn bottom_row(&self) -> i8 {
        self.cells().iter().map(|&(_, y)| y).max().unwrap_or(self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_dimensions() {
        assert_eq!((shape_of(PieceKind::I).rows(), shape_of(PieceKind::I).cols()), (1, 4));
        assert_eq!((shape_of(PieceKind::O).rows(), shape_of(PieceKind::O).cols()), (2, 2));
        for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
            let m = shape_of(kind);
            assert_eq!((m.rows(), m.cols()), (2, 3), "{:?}", kind);
        }
    }

    #[test]
    fn test_every_shape_has_four_minos() {
        for kind in PieceKind::ALL {
            assert_eq!(shape_of(kind).occupied().len(), MINOS_PER_PIECE);
        }
    }

    #[test]
    fn test_t_shape_cells() {
        // .#.
        // ###
        assert_eq!(
            shape_of(PieceKind::T).occupied().as_slice(),
            &[(1, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    #[test]
    fn test_rotate_t_clockwise() {
        // #.
        // ##
        // #.
        let r = shape_of(PieceKind::T).rotated(RotateDirection::Cw);
        assert_eq!((r.rows(), r.cols()), (3, 2));
        assert_eq!(r.occupied().as_slice(), &[(0, 0), (0, 1), (1, 1), (0, 2)]);
    }

    #[test]
    fn test_rotate_t_counter_clockwise() {
        // .#
        // ##
        // .#
        let r = shape_of(PieceKind::T).rotated(RotateDirection::Ccw);
        assert_eq!((r.rows(), r.cols()), (3, 2));
        assert_eq!(r.occupied().as_slice(), &[(1, 0), (0, 1), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_cw_then_ccw_is_identity() {
        for kind in PieceKind::ALL {
            let m = shape_of(kind);
            assert_eq!(
                m.rotated(RotateDirection::Cw).rotated(RotateDirection::Ccw),
                m
            );
        }
    }

    #[test]
    fn test_piece_cells_are_absolute() {
        let piece = Piece::new(PieceKind::O, 4, 7);
        assert_eq!(piece.cells().as_slice(), &[(4, 7), (5, 7), (4, 8), (5, 8)]);
        assert_eq!(piece.bottom_row(), 8);
    }
}
