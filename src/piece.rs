#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Rotation math mixes i32 deltas with usize grid coordinates; all values
    // stay within the small grid extent
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::board::{Board, CellTag};
use crate::game::{SPAWN_COL, SPAWN_ROW};
use crate::geometry::CellId;

pub const ROTATION_STATES: usize = 4;

/// The classic tetromino catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

// Kick candidates tried, in order, when a raw rotation collides. Indexed by
// the pre-rotation state; offsets are (drow, dcol) translations of the
// rotated cell set. Derived from the SRS tables, minus the leading (0, 0)
// which the raw attempt already covers.
const KICKS_COMMON: [[(i32, i32); 4]; ROTATION_STATES] = [
    [(0, -1), (-1, -1), (2, 0), (2, -1)],
    [(0, 1), (1, 1), (-2, 0), (-2, 1)],
    [(0, 1), (-1, 1), (2, 0), (2, 1)],
    [(0, -1), (1, -1), (-2, 0), (-2, -1)],
];

const KICKS_I: [[(i32, i32); 4]; ROTATION_STATES] = [
    [(0, -2), (0, 1), (1, -2), (-2, 1)],
    [(0, -1), (0, 2), (-2, -1), (1, 2)],
    [(0, 2), (0, -1), (-1, 2), (2, -1)],
    [(0, 1), (0, -2), (2, 1), (-1, -2)],
];

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::I,
        PieceType::J,
        PieceType::L,
        PieceType::O,
        PieceType::S,
        PieceType::T,
        PieceType::Z,
    ];

    /// Base shape as ordered (drow, dcol) offsets from the spawn anchor.
    /// Index order is load-bearing: rotation tables stay aligned to it for
    /// the piece's whole life.
    #[must_use]
    pub fn base_blocks(self) -> [(i32, i32); 4] {
        match self {
            PieceType::I => [(0, -1), (0, 0), (0, 1), (0, 2)],
            PieceType::J => [(0, -1), (0, 0), (0, 1), (1, 1)],
            PieceType::L => [(0, -1), (0, 0), (0, 1), (1, -1)],
            PieceType::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
            PieceType::S => [(0, 0), (0, 1), (1, -1), (1, 0)],
            PieceType::T => [(0, -1), (0, 0), (0, 1), (1, 0)],
            PieceType::Z => [(0, -1), (0, 0), (1, 0), (1, 1)],
        }
    }

    /// Shape at a given rotation state, derived by quarter-turns about the
    /// anchor. O is the same in every state.
    #[must_use]
    pub fn blocks_at(self, rotation: usize) -> [(i32, i32); 4] {
        let mut blocks = self.base_blocks();
        if self == PieceType::O {
            return blocks;
        }
        for _ in 0..(rotation % ROTATION_STATES) {
            for block in &mut blocks {
                *block = (block.1, -block.0);
            }
        }
        blocks
    }

    /// Offset corrections for a rotation leaving the given state.
    #[must_use]
    pub fn kick_offsets(self, rotation: usize) -> &'static [(i32, i32)] {
        match self {
            PieceType::O => &[],
            PieceType::I => &KICKS_I[rotation % ROTATION_STATES],
            _ => &KICKS_COMMON[rotation % ROTATION_STATES],
        }
    }

    #[must_use]
    pub fn color(self) -> ratatui::style::Color {
        match self {
            PieceType::I => ratatui::style::Color::Cyan,
            PieceType::J => ratatui::style::Color::Blue,
            PieceType::L => ratatui::style::Color::LightYellow,
            PieceType::O => ratatui::style::Color::Yellow,
            PieceType::S => ratatui::style::Color::Green,
            PieceType::T => ratatui::style::Color::Magenta,
            PieceType::Z => ratatui::style::Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Rejected,
    Locked,
}

/// One falling piece. Owns its occupied cells (index-aligned with the shape
/// tables) and its lifecycle flag; every movement is mediated through Board
/// collision queries. `in-flight → locked` is one-way.
#[derive(Component, Debug, Clone)]
pub struct Piece {
    pub kind: PieceType,
    pub cells: Vec<CellId>,
    pub rotation: usize,
    pub in_flight: bool,
}

impl Piece {
    /// Places the base shape at the spawn anchor and tags its cells as
    /// falling material.
    pub fn spawn(kind: PieceType, board: &mut Board) -> Self {
        let cells: Vec<CellId> = kind
            .base_blocks()
            .iter()
            .map(|&(drow, dcol)| {
                CellId::new(
                    (SPAWN_ROW as i32 + drow) as usize,
                    (SPAWN_COL as i32 + dcol) as usize,
                )
            })
            .collect();
        for &id in &cells {
            board.cell_mut(id).falling = Some(kind);
        }
        debug!("spawned {kind:?} at {:?}", cells[0].parts());
        Self {
            kind,
            cells,
            rotation: 0,
            in_flight: true,
        }
    }

    // Uniform translation of a cell set; None when any cell leaves the grid.
    fn translated(cells: &[CellId], drow: i32, dcol: i32) -> Option<Vec<CellId>> {
        cells.iter().map(|id| id.offset(drow, dcol)).collect()
    }

    // Border and settled material are equivalent obstacles.
    fn blocked(board: &Board, cells: &[CellId]) -> bool {
        board.collides(cells, CellTag::Border) || board.collides(cells, CellTag::Settled)
    }

    // Commits a new cell set: old falling tags erased first so overlapping
    // candidates retag cleanly.
    fn redraw(&mut self, board: &mut Board, next: Vec<CellId>) {
        for &id in &self.cells {
            board.cell_mut(id).falling = None;
        }
        for &id in &next {
            board.cell_mut(id).falling = Some(self.kind);
        }
        self.cells = next;
    }

    /// Attempts a unit move. A blocked sideways move is silently rejected;
    /// a blocked downward move locks the piece. Commands reaching a locked
    /// piece are ignored.
    pub fn try_move(&mut self, board: &mut Board, dir: Direction) -> MoveOutcome {
        if !self.in_flight {
            return MoveOutcome::Rejected;
        }

        let (drow, dcol) = dir.delta();
        let candidate = Self::translated(&self.cells, drow, dcol);
        let blocked = match &candidate {
            Some(cells) => Self::blocked(board, cells),
            None => true,
        };

        if blocked {
            if dir == Direction::Down {
                self.lock(board);
                return MoveOutcome::Locked;
            }
            trace!("{:?} move rejected", dir);
            return MoveOutcome::Rejected;
        }

        self.redraw(board, candidate.expect("unblocked candidate is in-grid"));
        MoveOutcome::Moved
    }

    /// Settles the piece where it stands: falling tags become settled tags
    /// carrying the piece's style, and the piece stops accepting commands.
    pub fn lock(&mut self, board: &mut Board) {
        self.in_flight = false;
        for &id in &self.cells {
            let cell = board.cell_mut(id);
            cell.falling = None;
            cell.settled = Some(self.kind);
        }
        debug!("locked {:?}", self.kind);
    }

    /// Advances one rotation state. The raw rotated cell set is tried
    /// first, then each registered kick offset of the pre-rotation state;
    /// if nothing fits, the rotation fully reverts. No partial state is
    /// ever observable.
    pub fn try_rotate(&mut self, board: &mut Board) -> bool {
        if !self.in_flight {
            return false;
        }

        let prev = self.rotation;
        let next = (prev + 1) % ROTATION_STATES;
        let from = self.kind.blocks_at(prev);
        let to = self.kind.blocks_at(next);

        // Per-cell delta applied relative to the current occupied cells.
        // Kept as signed coordinates: a raw result outside the grid is an
        // invalid placement, but the kicks still translate from it.
        let targets: Vec<(i32, i32)> = self
            .cells
            .iter()
            .zip(from.iter().zip(to.iter()))
            .map(|(id, (&(fr, fc), &(tr, tc)))| {
                (id.row() as i32 + tr - fr, id.col() as i32 + tc - fc)
            })
            .collect();

        let materialize = |drow: i32, dcol: i32| -> Option<Vec<CellId>> {
            targets
                .iter()
                .map(|&(row, col)| CellId::try_new(row + drow, col + dcol))
                .collect()
        };

        let accepted = std::iter::once((0, 0))
            .chain(self.kind.kick_offsets(prev).iter().copied())
            .filter_map(|(drow, dcol)| materialize(drow, dcol))
            .find(|candidate| !Self::blocked(board, candidate));

        match accepted {
            Some(cells) => {
                self.redraw(board, cells);
                self.rotation = next;
                true
            }
            None => {
                trace!("rotation reverted for {:?}", self.kind);
                false
            }
        }
    }
}

/// Shuffled pool of upcoming piece types: every type exactly once per
/// cycle, refilled with a fresh uniform shuffle when exhausted.
#[derive(Resource, Debug, Clone, Default)]
pub struct PieceBag {
    queue: Vec<PieceType>,
}

impl PieceBag {
    pub fn pop(&mut self) -> PieceType {
        if self.queue.is_empty() {
            self.refill();
        }
        self.queue.pop().expect("refilled bag is never empty")
    }

    fn refill(&mut self) {
        self.queue = PieceType::ALL.to_vec();
        fastrand::shuffle(&mut self.queue);
        debug!("bag refilled: {:?}", self.queue);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}
