//! Lock & sweep - merges a landed piece into the board and removes full rows.

use crate::board::Board;
use crate::pieces::Piece;

/// Write the piece's kind into every board cell it covers.
///
/// Cells above the top edge are dropped: that part of the piece never became
/// visible.
pub fn merge_piece(board: &mut Board, piece: &Piece) {
    for (col, row) in piece.cells() {
        if row >= 0 {
            board.set_cell(col, row, piece.kind);
        }
    }
}

/// Remove every complete row, compacting the rows above. Returns the number of
/// rows removed.
///
/// Scans bottom to top; after a removal the same index is tested again since
/// the row above has slid into it.
pub fn sweep_full_rows(board: &mut Board) -> u32 {
    let mut cleared = 0;
    let mut row = board.height() as usize;

    while row > 0 {
        if board.is_row_full(row - 1) {
            board.remove_row_and_shift_down(row - 1);
            cleared += 1;
        } else {
            row -= 1;
        }
    }

    cleared
}
