//! Tile Rush (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tile_rush::{core,input,term,types}` and ships the
//! terminal binary.

pub use tile_rush_core as core;
pub use tile_rush_input as input;
pub use tile_rush_term as term;
pub use tile_rush_types as types;
