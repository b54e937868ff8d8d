//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game: the board, the
//! seven shapes, collision, piece movement with rotation kicks, locking and
//! row clearing, spawning and the gravity clock. It has **zero dependencies**
//! on terminals, files or the environment, so the same seed always plays the
//! same game.
//!
//! # Module Structure
//!
//! - [`board`]: playfield grid, row checks and row removal
//! - [`pieces`]: shape matrices, rotation and positioned pieces
//! - [`collision`]: the single legality check for a candidate placement
//! - [`controller`]: the active piece, movement and the kick search
//! - [`sweep`]: merging a locked piece and removing full rows
//! - [`scoring`]: progression rules and session counters
//! - [`rng`]: piece sources (seeded uniform, scripted)
//! - [`spawner`]: next-piece buffer and spawn placement
//! - [`clock`]: gravity scheduling against host time
//! - [`game_state`]: the session that ties everything together
//! - [`snapshot`]: read-only view for renderers
//!
//! # Rules
//!
//! - Pieces are chosen uniformly at random; the next one is always visible.
//! - Rotation tries the rotated shape in place, then shifted right 1, left 1,
//!   right 2, left 2 and so on up to the shape's width.
//! - A blocked downward move locks the piece. Full rows are removed and
//!   everything above shifts down.
//! - Clearing `n` rows scores `n * 100 * level`. Every 10 lines the level goes
//!   up and gravity gets 100ms faster, down to 100ms.
//! - The game ends when a new piece cannot be placed.
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.apply_action(GameAction::Start);
//! assert_eq!(game.phase(), Phase::Running);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.stats().pieces_locked, 1);
//! assert_eq!(game.board().filled_count(), 4);
//! ```

pub mod board;
pub mod clock;
pub mod collision;
pub mod controller;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod spawner;
pub mod sweep;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use clock::{GameClock, ManualTime, MonotonicTime, TimeSource};
pub use collision::collides;
pub use controller::PieceController;
pub use game_state::{Frame, GameState};
pub use pieces::{shape_of, Piece, ShapeMatrix};
pub use rng::{PieceSource, ScriptedSource, SimpleRng, UniformSource};
pub use scoring::{Rules, SessionStats};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use spawner::{SpawnResult, Spawner};
