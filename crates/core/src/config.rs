//! Encounter configuration
//!
//! Every knob has a default matching the classic game (5x6 grid, 10 damage
//! per tile, three opponents). Configs deserialize from JSON with missing
//! fields filled from [`GameConfig::default`].

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::swap::BoardLayout;
use crate::types::{
    OpponentKind, PointerPos, TileKind, DAMAGE_PER_TILE, GRID_COLS, GRID_ROWS, MIN_RUN, TILE_SIZE,
};

/// Largest accepted `damage_per_tile`
pub const MAX_DAMAGE_PER_TILE: u32 = 1_000_000;

/// Whether the combo counter survives an unproductive swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComboPolicy {
    /// Combo counts every productive match in the encounter and never resets
    #[default]
    Session,
    /// A reverted swap resets the combo to zero
    ResetOnMiss,
}

/// When cleared cells are refilled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GravityMode {
    /// Refill runs as part of resolving the swap
    #[default]
    Immediate,
    /// Cleared cells stay empty until `apply_gravity` is called
    Deferred,
}

/// How the grid is populated at encounter start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialFill {
    /// No run of three exists on the starting grid
    #[default]
    NoMatches,
    /// Plain uniform fill; pre-existing runs are left for the first swap
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub tile_width: u32,
    pub tile_height: u32,
    pub damage_per_tile: u32,
    pub roster: Vec<OpponentKind>,
    pub tile_kinds: Vec<TileKind>,
    pub combo_policy: ComboPolicy,
    pub gravity_mode: GravityMode,
    /// Re-run detection after each refill until the grid is stable
    pub cascade: bool,
    pub initial_fill: InitialFill,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            tile_width: TILE_SIZE,
            tile_height: TILE_SIZE,
            damage_per_tile: DAMAGE_PER_TILE,
            roster: OpponentKind::ALL.to_vec(),
            tile_kinds: TileKind::ALL.to_vec(),
            combo_policy: ComboPolicy::default(),
            gravity_mode: GravityMode::default(),
            cascade: false,
            initial_fill: InitialFill::default(),
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Parse a JSON config and validate it
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(CoreError::InvalidConfig(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(CoreError::InvalidConfig("tile size must be non-zero".into()));
        }
        if self.damage_per_tile == 0 || self.damage_per_tile > MAX_DAMAGE_PER_TILE {
            return Err(CoreError::InvalidConfig(format!(
                "damage per tile must be in 1..={MAX_DAMAGE_PER_TILE}, got {}",
                self.damage_per_tile
            )));
        }
        if self.roster.is_empty() {
            return Err(CoreError::InvalidConfig("roster must name at least one opponent".into()));
        }
        if self.tile_kinds.is_empty() {
            return Err(CoreError::InvalidConfig("at least one tile kind is required".into()));
        }
        if self.initial_fill == InitialFill::NoMatches && distinct(&self.tile_kinds) < MIN_RUN {
            return Err(CoreError::InvalidConfig(format!(
                "a match-free initial fill needs at least {} distinct tile kinds",
                MIN_RUN
            )));
        }
        Ok(())
    }

    /// Pointer layout anchored at (0, 0)
    pub fn layout(&self) -> BoardLayout {
        BoardLayout::new(PointerPos::default(), self.tile_width, self.tile_height)
    }
}

fn distinct(kinds: &[TileKind]) -> usize {
    let mut seen = [false; TileKind::ALL.len()];
    for kind in kinds {
        seen[kind.index()] = true;
    }
    seen.iter().filter(|s| **s).count()
}
