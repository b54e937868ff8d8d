//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: the view draws a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a framebuffer of styled
//! glyphs, and the renderer flushes that framebuffer to the terminal with
//! `crossterm`, rewriting only what changed.
//!
//! Board cells are drawn two columns wide to compensate for the aspect ratio
//! of terminal glyphs.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
