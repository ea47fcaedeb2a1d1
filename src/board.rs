#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::debug;

use crate::game::{
    BOARD_COLS, BOARD_ROWS, PLAYABLE_COL_END, PLAYABLE_COL_START, PLAYABLE_ROW_END,
    PLAYABLE_ROW_START, SPAWN_ROW,
};
use crate::geometry::CellId;
use crate::piece::PieceType;

/// Tags a mover checks a candidate cell set against. `Border` and `Settled`
/// are equivalent for movement rejection; `Falling` exists for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellTag {
    Border,
    Falling,
    Settled,
}

/// One grid cell as a small tag set. `border` is fixed at construction and
/// never cleared; `settled` carries the visual style of the piece that
/// locked there; `blink` is the transient row-clear highlight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub border: bool,
    pub falling: Option<PieceType>,
    pub settled: Option<PieceType>,
    pub blink: bool,
}

impl Cell {
    #[must_use]
    pub fn has(&self, tag: CellTag) -> bool {
        match tag {
            CellTag::Border => self.border,
            CellTag::Falling => self.falling.is_some(),
            CellTag::Settled => self.settled.is_some(),
        }
    }
}

/// The logical grid. This in-memory structure is the source of truth; the
/// terminal surface only projects it.
#[derive(Resource, Debug, Clone)]
pub struct Board {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self {
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
            cells: vec![Cell::default(); BOARD_ROWS * BOARD_COLS],
        };
        board.build_boundary();
        board
    }

    // Marks the frame around the playable area immutable. Called exactly
    // once, from the constructor.
    fn build_boundary(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let on_frame = !(PLAYABLE_ROW_START..=PLAYABLE_ROW_END).contains(&row)
                    || !(PLAYABLE_COL_START..=PLAYABLE_COL_END).contains(&col);
                if on_frame {
                    self.cell_mut(CellId::new(row, col)).border = true;
                }
            }
        }
    }

    #[must_use]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.row() * self.cols + id.col()]
    }

    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.row() * self.cols + id.col()]
    }

    #[must_use]
    pub fn has_tag(&self, id: CellId, tag: CellTag) -> bool {
        self.cell(id).has(tag)
    }

    /// True iff at least one cell of the candidate set already carries the
    /// tag. Symmetric over tags so movers and the rotation kicks share it.
    #[must_use]
    pub fn collides(&self, cells: &[CellId], tag: CellTag) -> bool {
        cells.iter().any(|&id| self.has_tag(id, tag))
    }

    /// Row indices in `[start, end)`, descending when `rev` is set. Used
    /// for full-board scans and for the localized shift after a clear.
    pub fn rows_in_range(start: usize, end: usize, rev: bool) -> impl Iterator<Item = usize> {
        let iter: Box<dyn Iterator<Item = usize>> = if rev {
            Box::new((start..end).rev())
        } else {
            Box::new(start..end)
        };
        iter
    }

    /// The playable-column cells of one row, left to right.
    pub fn row_cells(row: usize) -> impl Iterator<Item = CellId> {
        (PLAYABLE_COL_START..=PLAYABLE_COL_END).map(move |col| CellId::new(row, col))
    }

    #[must_use]
    pub fn is_row_static(&self, row: usize) -> bool {
        Self::row_cells(row).all(|id| self.has_tag(id, CellTag::Settled))
    }

    /// All fully-settled playable rows, in top-to-bottom discovery order.
    #[must_use]
    pub fn find_full_static_rows(&self) -> Vec<usize> {
        Self::rows_in_range(PLAYABLE_ROW_START, PLAYABLE_ROW_END + 1, false)
            .filter(|&row| self.is_row_static(row))
            .collect()
    }

    /// Toggles the clear highlight on every playable cell of a row.
    pub fn set_row_blink(&mut self, row: usize, on: bool) {
        for id in Self::row_cells(row) {
            self.cell_mut(id).blink = on;
        }
    }

    /// Resets every playable cell in the row to empty (border untouched).
    pub fn clear_row(&mut self, row: usize) {
        for id in Self::row_cells(row) {
            let cell = self.cell_mut(id);
            cell.falling = None;
            cell.settled = None;
            cell.blink = false;
        }
    }

    /// Moves every settled tag strictly above `from_row` one row down.
    /// Scans bottom-to-top so a cell is never shifted twice in one pass.
    pub fn shift_static_down(&mut self, from_row: usize) {
        for row in Self::rows_in_range(PLAYABLE_ROW_START, from_row, true) {
            for id in Self::row_cells(row) {
                if let Some(kind) = self.cell(id).settled {
                    let below = id
                        .offset(1, 0)
                        .expect("playable cell always has a row below");
                    self.cell_mut(below).settled = Some(kind);
                    self.cell_mut(id).settled = None;
                }
            }
        }
    }

    /// Synchronous cleanup pass: clear every fully-settled row in discovery
    /// order, shifting the material above each one down before the next row
    /// is handled. Returns the number of rows cleared; the caller owns the
    /// score and adds `ROW_CLEAR_POINTS` per row.
    pub fn clean(&mut self) -> usize {
        let full_rows = self.find_full_static_rows();
        for &row in &full_rows {
            self.clear_row(row);
            self.shift_static_down(row);
            debug!("cleared row {row}");
        }
        full_rows.len()
    }

    /// Game-over trigger: settled material has reached the spawn row.
    #[must_use]
    pub fn static_in_spawn_row(&self) -> bool {
        Self::row_cells(SPAWN_ROW).any(|id| self.has_tag(id, CellTag::Settled))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
