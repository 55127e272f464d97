//! Gravity pass - compacts columns and refills from the top
//!
//! Per column, surviving tiles fall to the lowest rows while keeping their
//! relative order; the rows left vacant at the top receive fresh tiles from a
//! [`TileSource`]. Refill is uniform and does not try to avoid new runs.

use crate::grid::Grid;
use crate::rng::TileSource;
use crate::types::{Cell, CellPos};

/// What one gravity pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GravityReport {
    /// Fresh tiles written per column (index = column)
    pub filled_per_column: Vec<usize>,
}

impl GravityReport {
    /// Total fresh tiles across all columns
    pub fn filled(&self) -> usize {
        self.filled_per_column.iter().sum()
    }
}

/// Apply one gravity pass to every column
pub fn apply_gravity(grid: &mut Grid, source: &mut TileSource) -> GravityReport {
    let mut report = GravityReport {
        filled_per_column: Vec::with_capacity(grid.cols()),
    };
    for col in 0..grid.cols() {
        report.filled_per_column.push(settle_column(grid, col, source));
    }
    report
}

/// Compact and refill one column, returning the number of fresh tiles
fn settle_column(grid: &mut Grid, col: usize, source: &mut TileSource) -> usize {
    let rows = grid.rows();
    let survivors: Vec<Cell> = (0..rows)
        .map(|row| grid.get(CellPos::new(row, col)).ok().flatten())
        .filter(Option::is_some)
        .collect();

    let vacant = rows - survivors.len();
    if vacant == 0 {
        return 0;
    }

    // Survivors keep top-to-bottom order and end at the bottom row.
    for (i, cell) in survivors.into_iter().enumerate() {
        let _ = grid.set(CellPos::new(vacant + i, col), cell);
    }
    for row in 0..vacant {
        let _ = grid.set(CellPos::new(row, col), Some(source.draw()));
    }
    vacant
}
