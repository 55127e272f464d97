//! Grid module - owns the rectangular array of tiles
//!
//! The grid is `rows x cols` cells, each either empty or holding a [`TileKind`].
//! Uses a flat vector in row-major order; dimensions are fixed at construction.
//! Coordinates: (row, col) where row 0 is the top and col 0 is the left edge.

use crate::error::{CoreError, CoreResult};
use crate::types::{Cell, CellPos, TileKind};

/// The tile grid - fixed dimensions, flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Build a grid from explicit rows (top to bottom)
    ///
    /// Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> CoreResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(CoreError::InvalidConfig("grid must not be empty".into()));
        }
        if rows.iter().any(|r| r.len() != width) {
            return Err(CoreError::InvalidConfig("grid rows differ in length".into()));
        }
        Ok(Self {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: CellPos) -> Option<usize> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        Some(pos.row * self.cols + pos.col)
    }

    fn checked_index(&self, pos: CellPos) -> CoreResult<usize> {
        self.index(pos).ok_or(CoreError::OutOfBounds {
            row: pos.row,
            col: pos.col,
            rows: self.rows,
            cols: self.cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        self.index(pos).is_some()
    }

    pub fn get(&self, pos: CellPos) -> CoreResult<Cell> {
        self.checked_index(pos).map(|idx| self.cells[idx])
    }

    pub fn set(&mut self, pos: CellPos, cell: Cell) -> CoreResult<()> {
        let idx = self.checked_index(pos)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Exchange the contents of two cells
    ///
    /// No adjacency check happens here. Both positions are validated before
    /// anything is written, so a failed call leaves the grid untouched.
    pub fn swap(&mut self, a: CellPos, b: CellPos) -> CoreResult<()> {
        let ia = self.checked_index(a)?;
        let ib = self.checked_index(b)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Cells of one column, top to bottom
    pub fn column_cells(&self, col: usize) -> CoreResult<Vec<Cell>> {
        if col >= self.cols {
            return Err(CoreError::OutOfBounds {
                row: 0,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok((0..self.rows)
            .map(|row| self.cells[row * self.cols + col])
            .collect())
    }

    /// Cells of one row, left to right
    pub fn row_cells(&self, row: usize) -> CoreResult<&[Cell]> {
        if row >= self.rows {
            return Err(CoreError::OutOfBounds {
                row,
                col: 0,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let start = row * self.cols;
        Ok(&self.cells[start..start + self.cols])
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Count of cells holding `kind`
    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.cells.iter().filter(|c| **c == Some(kind)).count()
    }

    /// Convert to nested rows for display or fixtures
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.cols).map(<[Cell]>::to_vec).collect()
    }
}
