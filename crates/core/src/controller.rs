//! Piece controller - owns the active piece and applies player moves to it.
//!
//! Every positional change is tried on a copy and committed only when the
//! copy does not collide, so the active piece never overlaps the walls, the
//! floor or settled cells.

use crate::board::Board;
use crate::collision::{collides, collides_at};
use crate::pieces::Piece;
use crate::types::RotateDirection;

/// Kick offsets in search order for a matrix `width` columns wide:
/// `0, +1, -1, +2, -2, ... , +width, -width`.
pub fn kick_offsets(width: u8) -> impl Iterator<Item = i8> {
    std::iter::once(0).chain((1..=width as i8).flat_map(|d| [d, -d]))
}

/// Rotate `piece` on `board`, searching horizontal kicks.
///
/// Returns the rotated piece and the kick that made it fit, or `None` when no
/// offset within the rotated matrix's width works.
pub fn try_rotate(piece: &Piece, board: &Board, direction: RotateDirection) -> Option<(Piece, i8)> {
    let candidate = piece.matrix.rotated(direction);

    for kick in kick_offsets(candidate.cols()) {
        let x = piece.x + kick;
        if !collides_at(&candidate, x, piece.y, board) {
            return Some((
                Piece {
                    matrix: candidate,
                    x,
                    ..*piece
                },
                kick,
            ));
        }
    }

    None
}

/// Holds the active falling piece, if any.
#[derive(Debug, Clone, Default)]
pub struct PieceController {
    active: Option<Piece>,
}

impl PieceController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// Install a freshly spawned piece.
    pub fn replace(&mut self, piece: Piece) {
        self.active = Some(piece);
    }

    /// Remove the active piece (it is being locked or discarded).
    pub fn take(&mut self) -> Option<Piece> {
        self.active.take()
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Translate the active piece by `(dx, dy)` if the result fits.
    ///
    /// A `false` for a downward move means the piece has landed; locking is
    /// the caller's job.
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.translated(dx, dy);
        if collides(&moved, board) {
            return false;
        }

        self.active = Some(moved);
        true
    }

    /// Rotate the active piece with kick recovery. Returns the accepted kick
    /// offset; on failure the piece is unchanged.
    pub fn try_rotate(&mut self, board: &Board, direction: RotateDirection) -> Option<i8> {
        let active = self.active?;
        let (rotated, kick) = try_rotate(&active, board, direction)?;
        self.active = Some(rotated);
        Some(kick)
    }

    /// Row the active piece would come to rest on if dropped straight down.
    pub fn landing_y(&self, board: &Board) -> Option<i8> {
        let mut probe = self.active?;
        while !collides(&probe.translated(0, 1), board) {
            probe.y += 1;
        }
        Some(probe.y)
    }
}
