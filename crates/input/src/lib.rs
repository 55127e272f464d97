//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` mouse and key events into [`InputEvent`] values that a front-end
//! forwards to the core. Mouse positions are passed through in terminal cell
//! coordinates; the core's board layout turns them into grid cells.

pub mod map;

pub use tile_rush_types as types;

pub use map::{handle_key_event, handle_mouse_event, map_event, should_quit, InputEvent};
