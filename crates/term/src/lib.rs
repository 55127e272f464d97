//! Terminal front-end for the tile board.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget toolkits and instead renders a `GameSnapshot` into a
//! simple framebuffer that is flushed to the terminal with crossterm.
//!
//! Tiles are drawn 4 columns wide and 2 rows tall so they stay roughly
//! square, and `GameView::board_layout` hands the same geometry back to the
//! core so mouse positions land on the tile drawn under the cursor.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tile_rush_core as core;
pub use tile_rush_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
