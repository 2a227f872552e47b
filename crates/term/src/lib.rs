//! Terminal rendering for the snake game.
//!
//! A small, game-oriented rendering layer: views draw core snapshots into a
//! framebuffer, and the renderer flushes only the glyphs that changed.
//! No widget toolkit is involved, which keeps the 2-columns-per-cell aspect
//! ratio under precise control.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{phase_overlay, phase_tint, segment_glyphs, GameView, MenuView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
