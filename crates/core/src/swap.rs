//! Swap controller - turns a drag gesture into one adjacent swap
//!
//! Pointer positions arrive in the presentation layer's coordinates and are
//! mapped to cells through a [`BoardLayout`]. A gesture starts on pointer-down,
//! tracks the pointer while it moves, and resolves on pointer-up: only a
//! release on one of the four orthogonal neighbours of the start cell swaps.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::{CellPos, PointerPos, TILE_SIZE};

/// Maps pointer coordinates onto grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    /// Pointer position of the grid's top-left corner
    pub origin: PointerPos,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl BoardLayout {
    pub fn new(origin: PointerPos, tile_width: u32, tile_height: u32) -> Self {
        Self {
            origin,
            tile_width: tile_width.max(1),
            tile_height: tile_height.max(1),
        }
    }

    /// Square tiles anchored at (0, 0)
    pub fn square(tile_size: u32) -> Self {
        Self::new(PointerPos::default(), tile_size, tile_size)
    }

    /// Cell under the pointer, or `None` when it lies outside the grid
    pub fn cell_at(&self, pointer: PointerPos, rows: usize, cols: usize) -> Option<CellPos> {
        let (row, col) = self.raw_cell(pointer);
        if row < 0 || col < 0 || row as usize >= rows || col as usize >= cols {
            return None;
        }
        Some(CellPos::new(row as usize, col as usize))
    }

    /// Cell under the pointer, clamped onto the grid
    pub fn clamped_cell_at(&self, pointer: PointerPos, rows: usize, cols: usize) -> CellPos {
        let (row, col) = self.raw_cell(pointer);
        let clamp = |v: i64, len: usize| v.clamp(0, len.saturating_sub(1) as i64) as usize;
        CellPos::new(clamp(row, rows), clamp(col, cols))
    }

    fn raw_cell(&self, pointer: PointerPos) -> (i64, i64) {
        let dx = i64::from(pointer.x) - i64::from(self.origin.x);
        let dy = i64::from(pointer.y) - i64::from(self.origin.y);
        (
            dy.div_euclid(i64::from(self.tile_height.max(1))),
            dx.div_euclid(i64::from(self.tile_width.max(1))),
        )
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::square(TILE_SIZE)
    }
}

/// A drag in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DragGesture {
    pub start: CellPos,
    /// Last pointer position seen for this gesture
    pub pointer: PointerPos,
    /// Cell under the pointer (clamped), for hover feedback
    pub hover: CellPos,
}

/// Why a gesture produced no swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapRejection {
    /// Pointer-up without a matching pointer-down
    NoGesture,
    SameCell,
    NotAdjacent,
    /// Released outside the grid
    OutOfBounds,
}

/// A swap that was applied to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AppliedSwap {
    pub from: CellPos,
    pub to: CellPos,
}

/// Orthogonal neighbours of `pos` that lie on a `rows x cols` grid
pub fn neighbors(pos: CellPos, rows: usize, cols: usize) -> ArrayVec<CellPos, 4> {
    let mut out = ArrayVec::new();
    if pos.row > 0 {
        out.push(CellPos::new(pos.row - 1, pos.col));
    }
    if pos.row + 1 < rows {
        out.push(CellPos::new(pos.row + 1, pos.col));
    }
    if pos.col > 0 {
        out.push(CellPos::new(pos.row, pos.col - 1));
    }
    if pos.col + 1 < cols {
        out.push(CellPos::new(pos.row, pos.col + 1));
    }
    out
}

/// Validates drag gestures and applies the resulting swap
#[derive(Debug, Clone, Default)]
pub struct SwapController {
    layout: BoardLayout,
    gesture: Option<DragGesture>,
}

impl SwapController {
    pub fn new(layout: BoardLayout) -> Self {
        Self {
            layout,
            gesture: None,
        }
    }

    pub fn layout(&self) -> BoardLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: BoardLayout) {
        self.layout = layout;
    }

    pub fn gesture(&self) -> Option<DragGesture> {
        self.gesture
    }

    /// Start a gesture; any unresolved previous gesture is dropped
    pub fn begin_drag(&mut self, grid: &Grid, pointer: PointerPos) -> CellPos {
        let start = self
            .layout
            .clamped_cell_at(pointer, grid.rows(), grid.cols());
        self.gesture = Some(DragGesture {
            start,
            pointer,
            hover: start,
        });
        start
    }

    /// Track the pointer; never touches the grid
    pub fn continue_drag(&mut self, grid: &Grid, pointer: PointerPos) -> Option<CellPos> {
        let layout = self.layout;
        let gesture = self.gesture.as_mut()?;
        gesture.pointer = pointer;
        gesture.hover = layout.clamped_cell_at(pointer, grid.rows(), grid.cols());
        Some(gesture.hover)
    }

    /// Finish the gesture at `pointer`, swapping if the end cell is adjacent
    ///
    /// The gesture is consumed whatever the outcome.
    pub fn end_drag(
        &mut self,
        grid: &mut Grid,
        pointer: PointerPos,
    ) -> Result<AppliedSwap, SwapRejection> {
        let gesture = self.gesture.take().ok_or(SwapRejection::NoGesture)?;
        let end = self
            .layout
            .cell_at(pointer, grid.rows(), grid.cols())
            .ok_or(SwapRejection::OutOfBounds)?;

        if end == gesture.start {
            return Err(SwapRejection::SameCell);
        }
        if !gesture.start.is_adjacent(end) {
            return Err(SwapRejection::NotAdjacent);
        }
        grid.swap(gesture.start, end).map_err(|_| SwapRejection::OutOfBounds)?;
        Ok(AppliedSwap {
            from: gesture.start,
            to: end,
        })
    }
}
