use crate::pieces::{Piece, ShapeMatrix};
use crate::types::{Phase, PieceKind};

/// Read-only view of a piece for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            x: value.x,
            y: value.y,
        }
    }
}

impl PieceSnapshot {
    /// Absolute board coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .occupied()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major shape ids, 0 = empty
    pub board: Vec<u8>,
    pub active: Option<PieceSnapshot>,
    /// Row the active piece would land on
    pub ghost_y: Option<i8>,
    /// Buffered next piece, in spawn orientation
    pub next: Option<PieceSnapshot>,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    /// Shape id at `(col, row)`, 0 when empty or out of range
    pub fn cell(&self, col: usize, row: usize) -> u8 {
        if col >= self.width as usize || row >= self.height as usize {
            return 0;
        }
        self.board[row * self.width as usize + col]
    }

    pub fn playable(&self) -> bool {
        self.phase.is_running()
    }
}
