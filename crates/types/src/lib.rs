//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behavior beyond conversions, making them
//! usable in any context (core engine, terminal rendering, input mapping).
//!
//! # Grid Dimensions
//!
//! The default playfield is 5 rows by 6 columns:
//!
//! - **Rows**: 5 (indexed 0-4, top to bottom)
//! - **Columns**: 6 (indexed 0-5, left to right)
//! - **Tile size**: 100 pointer units per side
//!
//! # Encounter Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_RUN` | 3 | Shortest run that counts as a match |
//! | `DAMAGE_PER_TILE` | 10 | Damage (and tickets) per matched tile |
//! | `TICK_MS` | 16 | Front-end frame interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use tile_rush_types::{CellPos, OpponentKind, TileKind, GRID_COLS, GRID_ROWS};
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(TileKind::from_str("Bus"), Some(TileKind::Bus));
//!
//! // Orthogonal adjacency
//! assert!(CellPos::new(2, 3).is_adjacent(CellPos::new(2, 4)));
//! assert!(!CellPos::new(2, 3).is_adjacent(CellPos::new(3, 4)));
//!
//! // Opponent roster lookup by ordinal
//! assert_eq!(OpponentKind::ALL[0].base_health(), 150);
//!
//! assert_eq!(GRID_ROWS, 5);
//! assert_eq!(GRID_COLS, 6);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of grid rows
pub const GRID_ROWS: usize = 5;

/// Default number of grid columns
pub const GRID_COLS: usize = 6;

/// Default tile edge length in pointer units
pub const TILE_SIZE: u32 = 100;

/// Shortest run of identical tiles that counts as a match
pub const MIN_RUN: usize = 3;

/// Damage dealt per matched tile
pub const DAMAGE_PER_TILE: u32 = 10;

/// Front-end frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Token kinds that can occupy a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Car,
    Scooter,
    Bus,
    Train,
    Bike,
}

impl TileKind {
    /// Every tile kind, in ordinal order
    pub const ALL: [TileKind; 5] = [
        TileKind::Car,
        TileKind::Scooter,
        TileKind::Bus,
        TileKind::Train,
        TileKind::Bike,
    ];

    /// Ordinal index into [`TileKind::ALL`]
    pub fn index(self) -> usize {
        match self {
            TileKind::Car => 0,
            TileKind::Scooter => 1,
            TileKind::Bus => 2,
            TileKind::Train => 3,
            TileKind::Bike => 4,
        }
    }

    /// Look up a kind by ordinal
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse tile kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_rush_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_str("car"), Some(TileKind::Car));
    /// assert_eq!(TileKind::from_str("TRAIN"), Some(TileKind::Train));
    /// assert_eq!(TileKind::from_str("unicycle"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "car" => Some(TileKind::Car),
            "scooter" => Some(TileKind::Scooter),
            "bus" => Some(TileKind::Bus),
            "train" => Some(TileKind::Train),
            "bike" => Some(TileKind::Bike),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Car => "car",
            TileKind::Scooter => "scooter",
            TileKind::Bus => "bus",
            TileKind::Train => "train",
            TileKind::Bike => "bike",
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell (cleared by a match, awaiting refill)
/// - `Some(TileKind)`: Cell holding a token
pub type Cell = Option<TileKind>;

/// Grid coordinate, `row` counted from the top and `col` from the left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when `other` is one of the four orthogonal neighbours
    pub fn is_adjacent(&self, other: CellPos) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

/// Pointer position in the presentation layer's coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointerPos {
    pub x: i32,
    pub y: i32,
}

impl PointerPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Opponents faced in order over one encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    Man,
    OldWoman,
    KidAndDog,
}

impl OpponentKind {
    /// Default roster order
    pub const ALL: [OpponentKind; 3] = [
        OpponentKind::Man,
        OpponentKind::OldWoman,
        OpponentKind::KidAndDog,
    ];

    /// Starting health when this opponent comes up
    pub fn base_health(self) -> u32 {
        match self {
            OpponentKind::Man => 150,
            OpponentKind::OldWoman => 250,
            OpponentKind::KidAndDog => 500,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            OpponentKind::Man => "Man",
            OpponentKind::OldWoman => "Old Woman",
            OpponentKind::KidAndDog => "Kid & Dog",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OpponentKind::Man => "man",
            OpponentKind::OldWoman => "old_woman",
            OpponentKind::KidAndDog => "kid_and_dog",
        }
    }
}
