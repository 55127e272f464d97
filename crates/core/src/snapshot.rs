use serde::Serialize;

use crate::board::BoardState;
use crate::swap::DragGesture;
use crate::types::{Cell, CellPos, OpponentKind, GRID_COLS, GRID_ROWS};

/// Read-only view of a game for renderers and observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major cells, `rows * cols` long
    pub cells: Vec<Cell>,
    pub board_state: BoardState,
    pub drag: Option<DragGesture>,
    pub level: u32,
    pub last_level: u32,
    pub opponent: OpponentKind,
    pub opponent_health: u32,
    pub max_health: u32,
    pub combo: u32,
    /// Cumulative damage, shown as tickets
    pub score: u32,
    pub complete: bool,
    /// Cells cleared by the most recent swap (all passes)
    pub last_cleared: usize,
    pub last_damage: u32,
    pub episode_id: u32,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn cell(&self, pos: CellPos) -> Cell {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        self.cells[pos.row * self.cols + pos.col]
    }

    /// Health as a fraction in `[0, 1]`
    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.opponent_health as f32 / self.max_health as f32
    }

    pub fn playable(&self) -> bool {
        !self.complete && self.board_state != BoardState::Settling
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            cells: vec![None; GRID_ROWS * GRID_COLS],
            board_state: BoardState::Idle,
            drag: None,
            level: 1,
            last_level: 1,
            opponent: OpponentKind::Man,
            opponent_health: 0,
            max_health: 0,
            combo: 0,
            score: 0,
            complete: false,
            last_cleared: 0,
            last_damage: 0,
            episode_id: 0,
            seed: 0,
        }
    }
}
