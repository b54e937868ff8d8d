//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data types shared by the game core, the input
//! mapping and the terminal renderer. Everything here is dependency-free.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Boards of any size between
//! 1 and [`MAX_BOARD_DIM`] cells per side can be built by the core.
//!
//! - **Columns**: indexed `0..width` left to right
//! - **Rows**: indexed `0..height` top to bottom
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Host frame interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 100 | Interval decrease per level |
//! | `MIN_DROP_MS` | 100 | Interval floor |
//!
//! The drop interval for level `L` is `max(MIN_DROP_MS, BASE_DROP_MS - (L - 1) * DROP_STEP_MS)`.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.id(), 3);
//! assert_eq!(PieceKind::from_id(3), Some(piece));
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Largest supported board side. Keeps every board coordinate (plus a piece
/// matrix and kick offset) inside `i8`.
pub const MAX_BOARD_DIM: u8 = 64;

/// Number of occupied cells in every catalog piece
pub const MINOS_PER_PIECE: usize = 4;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval decrease per level
pub const DROP_STEP_MS: u32 = 100;

/// Gravity interval floor
pub const MIN_DROP_MS: u32 = 100;

/// Cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per cleared line at level 1 (scaled linearly by level)
pub const POINTS_PER_LINE: u32 = 100;


/// The seven tetromino piece kinds
///
/// The discriminant order is the catalog order; [`PieceKind::id`] is the
/// 1-based position in it and doubles as the renderer's color index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Shape identifier (1..=7)
    pub fn id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]; `0` and anything above `7` are not pieces.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell settled by a piece of that kind
pub type Cell = Option<PieceKind>;

/// Translation requested by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// `(d_col, d_row)` offset of a single step
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Quarter-turn direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Cw,
    Ccw,
}

/// Game actions that can be applied to a session
///
/// These are what the key map produces. Anything the keyboard sends that does
/// not map to one of these is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (locks when blocked)
    SoftDrop,
    /// Drop piece until it locks
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Start a fresh session
    Start,
    /// Clear everything and return to the ready state
    Reset,
}

impl GameAction {
    /// Parse action from a camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATECW"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            "start" => Some(GameAction::Start),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
            GameAction::Start => "start",
            GameAction::Reset => "reset",
        }
    }
}

/// Session lifecycle
///
/// `Ready` → `Running` ⇄ `Paused`, `Running` → `GameOver`; any phase →
/// `Ready` on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Ready,
    Running,
    Paused,
    GameOver,
}

impl Phase {
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Running)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Phase::Paused)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Phase::GameOver)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver => "game_over",
        }
    }
}

/// Core-side event emitted after a piece locks.
///
/// Consumed by observers (the event log, the frontend).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_delta: u32,
    /// Level after this lock was scored
    pub level: u32,
    pub level_up: bool,
    /// The spawn that followed this lock was blocked
    pub game_over: bool,
}
