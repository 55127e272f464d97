//! Match detection - finds runs of identical tiles
//!
//! A run is a maximal horizontal or vertical sequence of at least [`MIN_RUN`]
//! cells holding the same tile kind. Rows are scanned left to right and
//! columns top to bottom; every qualifying cell is unioned into one
//! [`MatchSet`]. Detection is pure and depends only on the grid contents.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::grid::Grid;
use crate::types::{Cell, CellPos, TileKind, MIN_RUN};

/// Direction a run was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Row,
    Column,
}

/// One qualifying run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Run {
    pub kind: TileKind,
    pub axis: Axis,
    /// Top-most (column) or left-most (row) cell of the run
    pub start: CellPos,
    pub len: usize,
}

impl Run {
    /// Cells covered by this run
    pub fn cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        (0..self.len).map(move |i| match self.axis {
            Axis::Row => CellPos::new(self.start.row, self.start.col + i),
            Axis::Column => CellPos::new(self.start.row + i, self.start.col),
        })
    }
}

/// Result of one detection pass
///
/// Cells are deduplicated and iterate in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchSet {
    cells: BTreeSet<CellPos>,
    runs: Vec<Run>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct matched cells (the scoring count)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        self.cells.contains(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.cells.iter().copied()
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    fn record(&mut self, run: Run) {
        self.cells.extend(run.cells());
        self.runs.push(run);
    }
}

/// Scan the whole grid for runs
pub fn find_matches(grid: &Grid) -> MatchSet {
    let mut set = MatchSet::new();

    for row in 0..grid.rows() {
        let line = (0..grid.cols()).map(|col| CellPos::new(row, col));
        scan_line(grid, line, Axis::Row, &mut set);
    }
    for col in 0..grid.cols() {
        let line = (0..grid.rows()).map(|row| CellPos::new(row, col));
        scan_line(grid, line, Axis::Column, &mut set);
    }

    set
}

fn scan_line(
    grid: &Grid,
    line: impl Iterator<Item = CellPos>,
    axis: Axis,
    set: &mut MatchSet,
) {
    let mut current: Cell = None;
    let mut start = CellPos::new(0, 0);
    let mut len = 0usize;

    for pos in line {
        let cell = grid.get(pos).ok().flatten();
        if cell.is_some() && cell == current {
            len += 1;
            continue;
        }
        flush_run(current, start, len, axis, set);
        current = cell;
        start = pos;
        len = usize::from(cell.is_some());
    }
    flush_run(current, start, len, axis, set);
}

fn flush_run(cell: Cell, start: CellPos, len: usize, axis: Axis, set: &mut MatchSet) {
    if let Some(kind) = cell {
        if len >= MIN_RUN {
            set.record(Run {
                kind,
                axis,
                start,
                len,
            });
        }
    }
}

/// Would placing `kind` at `pos` complete a run with the two cells to its
/// left or the two cells above it?
///
/// Used by the row-major initial fill, where cells to the right and below are
/// still empty.
pub fn would_match_at(grid: &Grid, pos: CellPos, kind: TileKind) -> bool {
    let same = |row: usize, col: usize| {
        grid.get(CellPos::new(row, col)).ok().flatten() == Some(kind)
    };

    let left = pos.col >= 2 && same(pos.row, pos.col - 1) && same(pos.row, pos.col - 2);
    let above = pos.row >= 2 && same(pos.row - 1, pos.col) && same(pos.row - 2, pos.col);
    left || above
}
