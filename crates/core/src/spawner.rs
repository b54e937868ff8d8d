//! Spawner - produces the next active piece with a one-piece lookahead.

use crate::board::Board;
use crate::collision::collides;
use crate::pieces::{shape_of, Piece};
use crate::rng::PieceSource;
use crate::types::PieceKind;

/// Outcome of a spawn attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnResult {
    Spawned(Piece),
    /// The new piece overlaps the board at its spawn position
    Blocked(Piece),
}

/// Column that centers a matrix `piece_width` wide on a board `board_width` wide
pub fn spawn_column(board_width: u8, piece_width: u8) -> i8 {
    (board_width / 2) as i8 - (piece_width / 2) as i8
}

#[derive(Debug)]
pub struct Spawner {
    source: Box<dyn PieceSource>,
    next: Option<PieceKind>,
}

impl Spawner {
    pub fn new(source: Box<dyn PieceSource>) -> Self {
        Self { source, next: None }
    }

    /// The buffered next piece, if one has been drawn
    pub fn peek(&self) -> Option<PieceKind> {
        self.next
    }

    /// Drop the buffered piece (session reset)
    pub fn clear(&mut self) {
        self.next = None;
    }

    /// Promote the buffered piece (drawing one first if the buffer is empty),
    /// refill the buffer and place the piece top-center.
    pub fn spawn(&mut self, board: &Board) -> SpawnResult {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.source.next_kind(),
        };
        self.next = Some(self.source.next_kind());

        let x = spawn_column(board.width(), shape_of(kind).cols());
        let piece = Piece::new(kind, x, 0);

        if collides(&piece, board) {
            SpawnResult::Blocked(piece)
        } else {
            SpawnResult::Spawned(piece)
        }
    }
}
