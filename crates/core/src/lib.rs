//! Core match engine - pure, deterministic, and testable
//!
//! This crate contains every game rule: the grid, drag-to-swap resolution,
//! run detection, gravity refill, and the combo/damage/opponent state machine.
//! It has **no dependencies** on terminals, windows, or audio, which makes it:
//!
//! - **Deterministic**: the same seed deals the same board and the same refills
//! - **Testable**: every rule is exercised by unit and integration tests
//! - **Portable**: any front-end that can report pointer positions can drive it
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size tile grid with bounds-checked access
//! - [`matcher`]: detection of runs of three or more identical tiles
//! - [`gravity`]: per-column compaction and refill
//! - [`swap`]: pointer-to-cell mapping and adjacent-swap validation
//! - [`board`]: drag lifecycle tying the pieces above together
//! - [`encounter`]: combo, damage, and opponent progression
//! - [`game`]: one encounter as an owned value, driven by pointer events
//! - [`rng`]: seeded uniform tile source
//! - [`config`]: serde-backed configuration
//!
//! # Game Rules
//!
//! - **Swaps**: drag a tile onto one of its four neighbours; anything else is ignored
//! - **Matches**: runs of 3+ in a row or column clear; overlapping runs count each cell once
//! - **No dead swaps**: a swap that forms no run is undone
//! - **Gravity**: survivors fall, fresh tiles drop in from the top (one pass per swap)
//! - **Damage**: 10 per cleared tile, also added to the ticket score
//! - **Opponents**: Man (150), Old Woman (250), Kid & Dog (500); beating the last
//!   ends the encounter
//!
//! # Example
//!
//! ```
//! use tile_rush_core::{Game, GameConfig};
//! use tile_rush_core::types::PointerPos;
//!
//! let mut game = Game::new(GameConfig::default().with_seed(12345)).unwrap();
//!
//! // Drag from the tile at (0, 0) to its right neighbour and release.
//! game.pointer_down(PointerPos::new(50, 50));
//! game.pointer_move(PointerPos::new(150, 50));
//! let report = game.pointer_up();
//!
//! // Either the swap matched and dealt damage, or it was undone.
//! assert_eq!(report.damage, report.cleared as u32 * 10);
//! assert_eq!(game.grid().count_empty(), 0);
//! ```

pub mod board;
pub mod config;
pub mod encounter;
pub mod error;
pub mod game;
pub mod gravity;
pub mod grid;
pub mod matcher;
pub mod rng;
pub mod snapshot;
pub mod swap;

pub use tile_rush_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardState, Resolution, SwapOutcome};
pub use config::{ComboPolicy, GameConfig, GravityMode, InitialFill};
pub use encounter::{EncounterState, EncounterStatus, MatchReport};
pub use error::{CoreError, CoreResult};
pub use game::{Game, TurnReport};
pub use gravity::{apply_gravity, GravityReport};
pub use grid::Grid;
pub use matcher::{find_matches, Axis, MatchSet, Run};
pub use rng::TileSource;
pub use snapshot::GameSnapshot;
pub use swap::{AppliedSwap, BoardLayout, DragGesture, SwapController, SwapRejection};
