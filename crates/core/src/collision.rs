//! Collision detection between a piece and the board.
//!
//! A piece collides when any occupied cell is left or right of the grid, at or
//! below the bottom edge, or on a settled cell. Cells above the top edge
//! (negative rows) only take part in the horizontal check, so a piece may sit
//! partly above the visible grid.

use crate::board::Board;
use crate::pieces::{Piece, ShapeMatrix};

/// Whether `piece` overlaps the walls, the floor or settled cells.
pub fn collides(piece: &Piece, board: &Board) -> bool {
    collides_at(&piece.matrix, piece.x, piece.y, board)
}

/// Whether `matrix` placed with its top-left corner at `(x, y)` collides.
pub fn collides_at(matrix: &ShapeMatrix, x: i8, y: i8, board: &Board) -> bool {
    matrix.occupied().iter().any(|&(dx, dy)| {
        let col = x + dx;
        let row = y + dy;

        if col < 0 || col >= board.width() as i8 || row >= board.height() as i8 {
            return true;
        }

        row >= 0 && board.is_occupied(col, row)
    })
}
