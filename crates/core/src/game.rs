//! Game module - one encounter as an owned value
//!
//! `Game` couples the [`Board`] to the [`EncounterState`]: pointer events go
//! to the board, and every match the board resolves is reported to the
//! encounter as damage. Nothing here is global, so any number of games can
//! run side by side.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::board::{Board, SwapOutcome};
use crate::config::GameConfig;
use crate::encounter::EncounterState;
use crate::error::CoreResult;
use crate::gravity::GravityReport;
use crate::grid::Grid;
use crate::matcher::MatchSet;
use crate::snapshot::GameSnapshot;
use crate::swap::{AppliedSwap, BoardLayout};
use crate::types::{CellPos, PointerPos};

/// What one pointer-up did, for the caller's feedback (sound, flashes, UI)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    pub outcome: SwapOutcome,
    /// Cells cleared across every pass
    pub cleared: usize,
    pub damage: u32,
    pub combo: u32,
    /// Level entered during this turn, if any
    pub advanced_to: Option<u32>,
    pub completed: bool,
}

impl TurnReport {
    fn idle(outcome: SwapOutcome, combo: u32) -> Self {
        Self {
            outcome,
            cleared: 0,
            damage: 0,
            combo,
            advanced_to: None,
            completed: false,
        }
    }

    pub fn matched(&self) -> bool {
        matches!(self.outcome, SwapOutcome::Matched(_))
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    board: Board,
    encounter: EncounterState,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    last_turn: Option<TurnReport>,
}

impl Game {
    pub fn new(config: GameConfig) -> CoreResult<Self> {
        let board = Board::new(&config)?;
        let encounter = encounter_for(&config);
        Ok(Self {
            config,
            board,
            encounter,
            episode_id: 0,
            last_turn: None,
        })
    }

    /// Start an encounter on a prepared board (fixtures, replays)
    ///
    /// The board keeps its own grid, layout and tile source; `config` supplies
    /// the encounter rules and the seed used by `restart`.
    pub fn from_board(config: GameConfig, board: Board) -> CoreResult<Self> {
        config.validate()?;
        let encounter = encounter_for(&config);
        Ok(Self {
            config,
            board,
            encounter,
            episode_id: 0,
            last_turn: None,
        })
    }

    /// Start a fresh encounter with a new board
    ///
    /// The seed is offset by the episode so each restart deals a new grid
    /// while staying reproducible. The current pointer layout is kept.
    #[instrument(skip(self), fields(episode = self.episode_id + 1))]
    pub fn restart(&mut self) -> CoreResult<()> {
        let episode_id = self.episode_id.wrapping_add(1);
        let config = self
            .config
            .clone()
            .with_seed(self.config.seed.wrapping_add(u64::from(episode_id)));
        let layout = self.board.layout();

        self.board = Board::new(&config)?;
        self.board.set_layout(layout);
        self.encounter = encounter_for(&self.config);
        self.episode_id = episode_id;
        self.last_turn = None;
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn grid(&self) -> &Grid {
        self.board.grid()
    }

    pub fn encounter(&self) -> &EncounterState {
        &self.encounter
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn is_complete(&self) -> bool {
        self.encounter.is_complete()
    }

    pub fn last_turn(&self) -> Option<&TurnReport> {
        self.last_turn.as_ref()
    }

    pub fn layout(&self) -> BoardLayout {
        self.board.layout()
    }

    /// Re-anchor pointer mapping (e.g. after the front-end resized)
    pub fn set_layout(&mut self, layout: BoardLayout) {
        self.board.set_layout(layout);
    }

    #[instrument(level = "debug", skip(self))]
    pub fn pointer_down(&mut self, pointer: PointerPos) -> Option<CellPos> {
        if self.is_complete() {
            return None;
        }
        self.board.handle_drag(pointer)
    }

    pub fn pointer_move(&mut self, pointer: PointerPos) -> Option<CellPos> {
        if self.is_complete() {
            return None;
        }
        self.board.continue_drag(pointer)
    }

    /// Pointer-up at the last tracked position
    #[instrument(level = "debug", skip(self))]
    pub fn pointer_up(&mut self) -> TurnReport {
        let outcome = self.board.end_drag();
        self.settle(outcome)
    }

    /// Pointer-up at `pointer`
    #[instrument(level = "debug", skip(self))]
    pub fn pointer_up_at(&mut self, pointer: PointerPos) -> TurnReport {
        let outcome = self.board.release(pointer);
        self.settle(outcome)
    }

    fn settle(&mut self, outcome: SwapOutcome) -> TurnReport {
        let mut report = TurnReport::idle(outcome, self.encounter.combo());

        match &report.outcome {
            SwapOutcome::Matched(resolution) => {
                for pass in &resolution.passes {
                    let applied = self.encounter.report_match(pass.len());
                    report.cleared += pass.len();
                    report.damage = report.damage.saturating_add(applied.damage);
                    report.advanced_to = applied.advanced_to.or(report.advanced_to);
                    report.completed |= applied.completed;
                }
            }
            SwapOutcome::Reverted(_) => self.encounter.record_miss(),
            SwapOutcome::Ignored | SwapOutcome::Rejected(_) => {}
        }
        report.combo = self.encounter.combo();

        debug!(
            cleared = report.cleared,
            damage = report.damage,
            health = self.encounter.opponent_health(),
            "turn settled"
        );
        if !matches!(report.outcome, SwapOutcome::Ignored) {
            self.last_turn = Some(report.clone());
        }
        report
    }

    /// Match set from the most recent swap (empty if it matched nothing)
    pub fn check_matches(&self) -> MatchSet {
        self.board.check_matches()
    }

    /// Refill cleared cells (needed only with deferred gravity)
    pub fn apply_gravity(&mut self) -> GravityReport {
        self.board.apply_gravity()
    }

    pub fn hint(&self) -> Option<AppliedSwap> {
        self.board.hint()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let grid = self.board.grid();
        out.rows = grid.rows();
        out.cols = grid.cols();
        out.cells.clear();
        out.cells.extend_from_slice(grid.cells());
        out.board_state = self.board.state();
        out.drag = self.board.gesture();
        out.level = self.encounter.level();
        out.last_level = self.encounter.last_level();
        out.opponent = self.encounter.opponent();
        out.opponent_health = self.encounter.opponent_health();
        out.max_health = self.encounter.max_health();
        out.combo = self.encounter.combo();
        out.score = self.encounter.score();
        out.complete = self.encounter.is_complete();
        out.last_cleared = self.last_turn.as_ref().map_or(0, |t| t.cleared);
        out.last_damage = self.last_turn.as_ref().map_or(0, |t| t.damage);
        out.episode_id = self.episode_id;
        out.seed = self.board.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn encounter_for(config: &GameConfig) -> EncounterState {
    EncounterState::new(&config.roster)
        .with_damage_per_tile(config.damage_per_tile)
        .with_combo_policy(config.combo_policy)
}
