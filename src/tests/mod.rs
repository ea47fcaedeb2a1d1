#![warn(clippy::all, clippy::pedantic)]

pub mod config_tests;
pub mod piece_tests;

// Import test utilities
#[cfg(test)]
pub mod test_utils {
    use bevy_ecs::prelude::*;

    use crate::board::Board;
    use crate::components::{Cleanup, GameState, Input};
    use crate::geometry::CellId;
    use crate::piece::{Piece, PieceBag, PieceType};

    // Helper function to create a test world with every session resource
    #[must_use]
    pub fn create_test_world() -> World {
        let mut world = World::new();
        world.init_resource::<GameState>();
        world.init_resource::<Input>();
        world.init_resource::<Cleanup>();
        world.init_resource::<PieceBag>();
        world.insert_resource(Board::new());
        world.insert_resource(crate::Time::new());
        world
    }

    // Spawns a specific piece type so tests stay deterministic
    pub fn spawn_test_piece(world: &mut World, kind: PieceType) -> Entity {
        let piece = {
            let mut board = world.resource_mut::<Board>();
            Piece::spawn(kind, &mut board)
        };
        world.spawn(piece).id()
    }

    // Settles a single cell with the given style
    pub fn settle_cell(board: &mut Board, row: usize, col: usize, kind: PieceType) {
        board.cell_mut(CellId::new(row, col)).settled = Some(kind);
    }

    // Fills one playable row completely with settled material
    pub fn fill_static_row(board: &mut Board, row: usize, kind: PieceType) {
        for id in Board::row_cells(row) {
            board.cell_mut(id).settled = Some(kind);
        }
    }

    // Snapshot of the settled cells, for no-mutation assertions
    #[must_use]
    pub fn settled_snapshot(board: &Board) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for row in 0..board.rows {
            for col in 0..board.cols {
                if board.cell(CellId::new(row, col)).settled.is_some() {
                    cells.push((row, col));
                }
            }
        }
        cells
    }
}
