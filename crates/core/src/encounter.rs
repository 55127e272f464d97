//! Encounter state - combo, damage and opponent progression
//!
//! Every productive match is reported here as a tile count. Damage is the
//! count times a fixed multiplier; it is added to the score and subtracted
//! from the current opponent's health (clamped at zero). An opponent at zero
//! health either hands over to the next one in the roster or, for the last
//! opponent, completes the encounter.

use serde::Serialize;
use tracing::info;

use crate::config::ComboPolicy;
use crate::types::{OpponentKind, DAMAGE_PER_TILE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterStatus {
    InProgress,
    /// Terminal; carries the final score
    Complete { final_score: u32 },
}

/// Outcome of applying one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MatchReport {
    pub damage: u32,
    /// The damaged opponent reached zero health
    pub defeated: bool,
    /// Level entered because of this match, if any
    pub advanced_to: Option<u32>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncounterState {
    roster: Vec<OpponentKind>,
    damage_per_tile: u32,
    combo_policy: ComboPolicy,
    /// 1-based index into `roster`
    level: u32,
    opponent_health: u32,
    max_health: u32,
    combo: u32,
    score: u32,
    status: EncounterStatus,
}

impl EncounterState {
    /// Start an encounter against the first opponent of `roster`
    ///
    /// An empty roster falls back to the default three opponents.
    pub fn new(roster: &[OpponentKind]) -> Self {
        let roster = if roster.is_empty() {
            OpponentKind::ALL.to_vec()
        } else {
            roster.to_vec()
        };
        let health = roster[0].base_health();
        Self {
            roster,
            damage_per_tile: DAMAGE_PER_TILE,
            combo_policy: ComboPolicy::default(),
            level: 1,
            opponent_health: health,
            max_health: health,
            combo: 0,
            score: 0,
            status: EncounterStatus::InProgress,
        }
    }

    /// Every match must hurt: zero is raised to one.
    pub fn with_damage_per_tile(mut self, damage_per_tile: u32) -> Self {
        self.damage_per_tile = damage_per_tile.max(1);
        self
    }

    pub fn with_combo_policy(mut self, policy: ComboPolicy) -> Self {
        self.combo_policy = policy;
        self
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn last_level(&self) -> u32 {
        self.roster.len() as u32
    }

    pub fn opponent(&self) -> OpponentKind {
        self.roster[(self.level as usize - 1).min(self.roster.len() - 1)]
    }

    pub fn roster(&self) -> &[OpponentKind] {
        &self.roster
    }

    pub fn opponent_health(&self) -> u32 {
        self.opponent_health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> EncounterStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status, EncounterStatus::Complete { .. })
    }

    /// Apply a match of `matched_tiles` cells
    ///
    /// Ignored (zero report) once the encounter is complete or for an empty match.
    pub fn report_match(&mut self, matched_tiles: usize) -> MatchReport {
        if self.is_complete() || matched_tiles == 0 {
            return MatchReport::default();
        }

        let damage = (matched_tiles as u32).saturating_mul(self.damage_per_tile);
        self.combo = self.combo.saturating_add(1);
        self.score = self.score.saturating_add(damage);
        self.opponent_health = self.opponent_health.saturating_sub(damage);

        let mut report = MatchReport {
            damage,
            ..MatchReport::default()
        };
        if self.opponent_health > 0 {
            return report;
        }

        report.defeated = true;
        if self.level >= self.last_level() {
            self.status = EncounterStatus::Complete {
                final_score: self.score,
            };
            report.completed = true;
            info!(score = self.score, "encounter complete");
        } else {
            self.level += 1;
            let health = self.opponent().base_health();
            self.opponent_health = health;
            self.max_health = health;
            report.advanced_to = Some(self.level);
            info!(
                level = self.level,
                opponent = self.opponent().as_str(),
                health,
                "next opponent"
            );
        }
        report
    }

    /// Note an unproductive swap
    pub fn record_miss(&mut self) {
        if self.combo_policy == ComboPolicy::ResetOnMiss {
            self.combo = 0;
        }
    }
}

impl Default for EncounterState {
    fn default() -> Self {
        Self::new(&OpponentKind::ALL)
    }
}
