//! Board tests - grid contract, row removal and the sweep scan

use blockfall::core::sweep::{merge_piece, sweep_full_rows};
use blockfall::core::{Board, Piece};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, row: i8, kind: PieceKind) {
    for col in 0..board.width() as i8 {
        board.set_cell(col, row, kind);
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for row in 0..BOARD_HEIGHT as i8 {
        for col in 0..BOARD_WIDTH as i8 {
            assert!(board.is_inside_bounds(col, row));
            assert!(!board.is_occupied(col, row), "({}, {}) should be empty", col, row);
            assert_eq!(board.get(col, row), Some(None));
        }
    }
}

#[test]
fn test_board_bounds() {
    let board = Board::with_size(4, 6);
    assert!(board.is_inside_bounds(0, 0));
    assert!(board.is_inside_bounds(3, 5));
    assert!(!board.is_inside_bounds(-1, 0));
    assert!(!board.is_inside_bounds(0, -1));
    assert!(!board.is_inside_bounds(4, 0));
    assert!(!board.is_inside_bounds(0, 6));
    assert_eq!(board.get(4, 0), None);
}

#[test]
fn test_board_set_and_clear_cell() {
    let mut board = Board::new();

    assert!(board.set_cell(5, 10, PieceKind::T));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(board.is_occupied(5, 10));

    assert!(board.clear_cell(5, 10));
    assert!(!board.is_occupied(5, 10));

    assert!(!board.set_cell(-1, 0, PieceKind::T));
    assert!(!board.set_cell(0, BOARD_HEIGHT as i8, PieceKind::T));
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_row_full_detection() {
    let mut board = Board::new();
    for col in 0..9 {
        board.set_cell(col, 19, PieceKind::J);
    }
    assert!(!board.is_row_full(19));
    board.set_cell(9, 19, PieceKind::L);
    assert!(board.is_row_full(19));
}

#[test]
fn test_remove_row_keeps_dimensions_and_inserts_empty_top() {
    let mut board = Board::new();
    fill_row(&mut board, 0, PieceKind::Z);
    board.set_cell(3, 10, PieceKind::S);
    fill_row(&mut board, 19, PieceKind::I);

    board.remove_row_and_shift_down(19);

    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.cells().len(), BOARD_WIDTH as usize * BOARD_HEIGHT as usize);
    // Fresh empty row at the top, everything above 19 moved down one.
    assert!(board.row(0).iter().all(|c| c.is_none()));
    assert!(board.is_row_full(1));
    assert!(board.is_occupied(3, 11));
    assert!(!board.is_occupied(3, 10));
    assert!(!board.is_row_full(19));
}

#[test]
fn test_remove_top_row() {
    let mut board = Board::with_size(3, 3);
    fill_row(&mut board, 0, PieceKind::O);
    board.remove_row_and_shift_down(0);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_sweep_adjacent_full_rows() {
    let mut board = Board::new();
    fill_row(&mut board, 18, PieceKind::I);
    fill_row(&mut board, 19, PieceKind::I);
    board.set_cell(0, 17, PieceKind::T);

    assert_eq!(sweep_full_rows(&mut board), 2);
    assert!(board.is_occupied(0, 19));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_sweep_non_adjacent_full_rows() {
    let mut board = Board::new();
    fill_row(&mut board, 19, PieceKind::I);
    board.set_cell(2, 18, PieceKind::T);
    fill_row(&mut board, 17, PieceKind::L);
    board.set_cell(5, 16, PieceKind::Z);

    assert_eq!(sweep_full_rows(&mut board), 2);
    // The partial rows keep their order and settle at the bottom.
    assert!(board.is_occupied(2, 19));
    assert!(board.is_occupied(5, 18));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_sweep_four_rows() {
    let mut board = Board::new();
    for row in 16..20 {
        fill_row(&mut board, row, PieceKind::I);
    }
    assert_eq!(sweep_full_rows(&mut board), 4);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_merge_drops_cells_above_board() {
    let mut board = Board::new();
    // A T whose nub sits at row -1.
    let piece = Piece::new(PieceKind::T, 0, -1);
    merge_piece(&mut board, &piece);

    assert_eq!(board.filled_count(), 3);
    assert!(board.is_occupied(0, 0));
    assert!(board.is_occupied(1, 0));
    assert!(board.is_occupied(2, 0));
}

#[test]
fn test_id_grid() {
    let mut board = Board::with_size(2, 2);
    board.set_cell(0, 0, PieceKind::I);
    board.set_cell(1, 1, PieceKind::L);

    let mut ids = Vec::new();
    board.write_id_grid(&mut ids);
    assert_eq!(ids, vec![1, 0, 0, 7]);
}
