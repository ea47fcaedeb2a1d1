#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Board dimensions are small enough that row/col products always fit in u16
    clippy::cast_possible_truncation,
    // Offsets are validated against the grid extent before casting back to usize
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

use crate::game::{BOARD_COLS, BOARD_ROWS};

/// Opaque identifier for one grid cell, packing a (row, column) pair.
///
/// Row increases downward, column increases rightward. Only coordinates
/// within the full grid extent (border frame included) are legal; `new`
/// panics on anything else rather than producing a dangling identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(u16);

impl CellId {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        assert!(
            row < BOARD_ROWS && col < BOARD_COLS,
            "cell ({row}, {col}) outside grid extent {BOARD_ROWS}x{BOARD_COLS}"
        );
        Self((row * BOARD_COLS + col) as u16)
    }

    /// Builds an identifier from signed coordinates, returning `None` when
    /// the position falls outside the full grid. Rotation kicks can probe
    /// past the frame; those candidates are simply invalid placements.
    #[must_use]
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        if row >= 0 && (row as usize) < BOARD_ROWS && col >= 0 && (col as usize) < BOARD_COLS {
            Some(Self::new(row as usize, col as usize))
        } else {
            None
        }
    }

    #[must_use]
    pub fn row(self) -> usize {
        usize::from(self.0) / BOARD_COLS
    }

    #[must_use]
    pub fn col(self) -> usize {
        usize::from(self.0) % BOARD_COLS
    }

    #[must_use]
    pub fn parts(self) -> (usize, usize) {
        (self.row(), self.col())
    }

    /// The cell displaced by (`drow`, `dcol`), or `None` if that leaves the
    /// grid.
    #[must_use]
    pub fn offset(self, drow: i32, dcol: i32) -> Option<Self> {
        Self::try_new(self.row() as i32 + drow, self.col() as i32 + dcol)
    }
}
