//! Board module - drag lifecycle and swap resolution
//!
//! The board owns the grid and ties the pieces together:
//!
//! ```text
//! Idle --handle_drag--> Dragging --continue_drag*--> end_drag --> Idle
//!                                                        \-> Settling (deferred gravity)
//! ```
//!
//! Resolving a drag is synchronous: the swap controller validates and applies
//! the swap, the detector runs once, an unproductive swap is reverted, and a
//! productive one clears its cells and (in immediate mode) refills them.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{GameConfig, GravityMode, InitialFill};
use crate::error::CoreResult;
use crate::gravity::{self, GravityReport};
use crate::grid::Grid;
use crate::matcher::{find_matches, would_match_at, MatchSet};
use crate::rng::TileSource;
use crate::swap::{neighbors, AppliedSwap, BoardLayout, DragGesture, SwapController, SwapRejection};
use crate::types::{CellPos, PointerPos, TileKind};

/// Upper bound on chained detect/clear/refill passes per swap
const MAX_CASCADE_PASSES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardState {
    Idle,
    Dragging,
    /// Matched cells are empty and wait for `apply_gravity`
    Settling,
}

/// Result of ending a drag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapOutcome {
    /// No drag was in progress
    Ignored,
    Rejected(SwapRejection),
    /// The swap formed no run and was undone
    Reverted(AppliedSwap),
    Matched(Resolution),
}

/// A productive swap and every detection pass it caused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub swap: AppliedSwap,
    /// First entry is the swap's own match; later entries are cascades
    pub passes: Vec<MatchSet>,
}

impl Resolution {
    pub fn cleared(&self) -> usize {
        self.passes.iter().map(MatchSet::len).sum()
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    swaps: SwapController,
    source: TileSource,
    state: BoardState,
    gravity_mode: GravityMode,
    cascade: bool,
    last_passes: Vec<MatchSet>,
}

impl Board {
    /// Build and fill a board from a validated config
    pub fn new(config: &GameConfig) -> CoreResult<Self> {
        config.validate()?;
        let mut source = TileSource::with_kinds(config.seed, &config.tile_kinds);
        let mut grid = Grid::new(config.rows, config.cols);
        fill(&mut grid, &mut source, config.initial_fill);

        Ok(Self::from_grid(grid, config.layout(), source)
            .with_gravity_mode(config.gravity_mode)
            .with_cascade(config.cascade))
    }

    /// Wrap an existing grid (fixtures, replays)
    pub fn from_grid(grid: Grid, layout: BoardLayout, source: TileSource) -> Self {
        Self {
            grid,
            swaps: SwapController::new(layout),
            source,
            state: BoardState::Idle,
            gravity_mode: GravityMode::Immediate,
            cascade: false,
            last_passes: Vec::new(),
        }
    }

    pub fn with_gravity_mode(mut self, mode: GravityMode) -> Self {
        self.gravity_mode = mode;
        self
    }

    pub fn with_cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn gesture(&self) -> Option<DragGesture> {
        self.swaps.gesture()
    }

    pub fn layout(&self) -> BoardLayout {
        self.swaps.layout()
    }

    pub fn set_layout(&mut self, layout: BoardLayout) {
        self.swaps.set_layout(layout);
    }

    pub fn seed(&self) -> u64 {
        self.source.seed()
    }

    /// Pointer-down: start a gesture
    ///
    /// Restarts any gesture already in progress. Ignored while settling.
    pub fn handle_drag(&mut self, pointer: PointerPos) -> Option<CellPos> {
        if self.state == BoardState::Settling {
            return None;
        }
        let start = self.swaps.begin_drag(&self.grid, pointer);
        self.state = BoardState::Dragging;
        Some(start)
    }

    /// Pointer-move: hover feedback only
    pub fn continue_drag(&mut self, pointer: PointerPos) -> Option<CellPos> {
        if self.state != BoardState::Dragging {
            return None;
        }
        self.swaps.continue_drag(&self.grid, pointer)
    }

    /// Pointer-up at the last tracked position
    pub fn end_drag(&mut self) -> SwapOutcome {
        match self.swaps.gesture() {
            Some(gesture) if self.state == BoardState::Dragging => self.resolve(gesture.pointer),
            _ => SwapOutcome::Ignored,
        }
    }

    /// Pointer-up at `pointer`
    pub fn release(&mut self, pointer: PointerPos) -> SwapOutcome {
        if self.state != BoardState::Dragging {
            return SwapOutcome::Ignored;
        }
        self.resolve(pointer)
    }

    fn resolve(&mut self, pointer: PointerPos) -> SwapOutcome {
        self.state = BoardState::Idle;
        self.last_passes.clear();

        let swap = match self.swaps.end_drag(&mut self.grid, pointer) {
            Ok(swap) => swap,
            Err(reason) => {
                debug!(?reason, "swap rejected");
                return SwapOutcome::Rejected(reason);
            }
        };

        let matches = find_matches(&self.grid);
        if matches.is_empty() {
            // Unproductive swaps never persist.
            let _ = self.grid.swap(swap.from, swap.to);
            debug!(from = ?swap.from, to = ?swap.to, "swap reverted");
            return SwapOutcome::Reverted(swap);
        }

        info!(from = ?swap.from, to = ?swap.to, cleared = matches.len(), "match");
        self.clear(&matches);
        self.last_passes.push(matches);

        match self.gravity_mode {
            GravityMode::Deferred => self.state = BoardState::Settling,
            GravityMode::Immediate => {
                gravity::apply_gravity(&mut self.grid, &mut self.source);
                if self.cascade {
                    self.run_cascade();
                }
            }
        }

        SwapOutcome::Matched(Resolution {
            swap,
            passes: self.last_passes.clone(),
        })
    }

    fn run_cascade(&mut self) {
        for _ in 1..MAX_CASCADE_PASSES {
            let matches = find_matches(&self.grid);
            if matches.is_empty() {
                return;
            }
            info!(pass = self.last_passes.len() + 1, cleared = matches.len(), "cascade");
            self.clear(&matches);
            self.last_passes.push(matches);
            gravity::apply_gravity(&mut self.grid, &mut self.source);
        }
    }

    fn clear(&mut self, matches: &MatchSet) {
        for pos in matches.iter() {
            let _ = self.grid.set(pos, None);
        }
    }

    /// Match found by the most recent resolved swap (empty if none)
    ///
    /// Read-only; calling it repeatedly returns the same result.
    pub fn check_matches(&self) -> MatchSet {
        self.last_passes.first().cloned().unwrap_or_default()
    }

    /// Every detection pass from the most recent resolved swap
    pub fn last_passes(&self) -> &[MatchSet] {
        &self.last_passes
    }

    /// Refill cleared cells
    ///
    /// A no-op when nothing is empty, so calling it after an immediate-mode
    /// resolution is harmless.
    pub fn apply_gravity(&mut self) -> GravityReport {
        if self.grid.count_empty() == 0 {
            return GravityReport {
                filled_per_column: vec![0; self.grid.cols()],
            };
        }
        let report = gravity::apply_gravity(&mut self.grid, &mut self.source);
        if self.state == BoardState::Settling {
            self.state = BoardState::Idle;
        }
        report
    }

    /// Find some adjacent swap that would form a run
    pub fn hint(&self) -> Option<AppliedSwap> {
        let mut trial = self.grid.clone();
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                let from = CellPos::new(row, col);
                for to in neighbors(from, self.grid.rows(), self.grid.cols()) {
                    // Each pair once: only look right and down.
                    if to < from {
                        continue;
                    }
                    let _ = trial.swap(from, to);
                    let productive = !find_matches(&trial).is_empty();
                    let _ = trial.swap(from, to);
                    if productive {
                        return Some(AppliedSwap { from, to });
                    }
                }
            }
        }
        None
    }
}

/// Populate every cell of `grid` from `source`
pub fn fill(grid: &mut Grid, source: &mut TileSource, policy: InitialFill) {
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let pos = CellPos::new(row, col);
            let kind = match policy {
                InitialFill::Random => source.draw(),
                InitialFill::NoMatches => {
                    let blocked: Vec<TileKind> = source
                        .kinds()
                        .iter()
                        .copied()
                        .filter(|k| would_match_at(grid, pos, *k))
                        .collect();
                    source.draw_excluding(&blocked)
                }
            };
            let _ = grid.set(pos, Some(kind));
        }
    }
}
