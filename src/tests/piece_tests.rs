#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::board::{Board, CellTag};
    use crate::game::{PLAYABLE_ROW_END, SPAWN_COL, SPAWN_ROW};
    use crate::geometry::CellId;
    use crate::piece::{Direction, MoveOutcome, Piece, PieceBag, PieceType, ROTATION_STATES};
    use crate::tests::test_utils::settle_cell;

    #[test]
    fn test_spawn_places_base_shape_in_flight() {
        let mut board = Board::new();
        let piece = Piece::spawn(PieceType::T, &mut board);

        assert!(piece.in_flight);
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.cells.len(), 4);
        for &id in &piece.cells {
            assert!(board.has_tag(id, CellTag::Falling));
        }

        // Anchor cell is the second shape index for T
        assert_eq!(piece.cells[1], CellId::new(SPAWN_ROW, SPAWN_COL));
    }

    #[test]
    fn test_move_commits_and_preserves_index_correspondence() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(PieceType::I, &mut board);
        let before = piece.cells.clone();

        assert_eq!(piece.try_move(&mut board, Direction::Left), MoveOutcome::Moved);

        assert_eq!(piece.cells.len(), before.len());
        for (new, old) in piece.cells.iter().zip(before.iter()) {
            assert_eq!(new.row(), old.row());
            assert_eq!(new.col(), old.col() - 1);
            assert!(board.has_tag(*new, CellTag::Falling));
        }
        for &old in &before {
            // The leftmost old cell is outside the new set and must be erased
            if !piece.cells.contains(&old) {
                assert!(!board.has_tag(old, CellTag::Falling));
            }
        }
    }

    #[test]
    fn test_sideways_move_rejected_at_wall_without_state_change() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(PieceType::I, &mut board);

        // I spawns on columns 4..=7; three lefts reach the wall
        for _ in 0..3 {
            assert_eq!(piece.try_move(&mut board, Direction::Left), MoveOutcome::Moved);
        }
        let at_wall = piece.cells.clone();

        assert_eq!(
            piece.try_move(&mut board, Direction::Left),
            MoveOutcome::Rejected
        );
        assert_eq!(piece.cells, at_wall);
        assert!(piece.in_flight);
    }

    #[test]
    fn test_sideways_move_rejected_by_settled_material() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(PieceType::O, &mut board);

        // O occupies (1..=2, 5..=6); block the column to its right
        settle_cell(&mut board, 1, 7, PieceType::L);

        assert_eq!(
            piece.try_move(&mut board, Direction::Right),
            MoveOutcome::Rejected
        );
        assert_eq!(piece.cells[0], CellId::new(SPAWN_ROW, SPAWN_COL));
    }

    #[test]
    fn test_blocked_down_move_locks_and_settles() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(PieceType::I, &mut board);

        let mut outcome = MoveOutcome::Moved;
        let mut descents = 0;
        while outcome == MoveOutcome::Moved {
            outcome = piece.try_move(&mut board, Direction::Down);
            descents += 1;
            assert!(descents <= PLAYABLE_ROW_END + 1, "piece never locked");
        }

        assert_eq!(outcome, MoveOutcome::Locked);
        assert!(!piece.in_flight);
        for &id in &piece.cells {
            assert_eq!(id.row(), PLAYABLE_ROW_END);
            assert!(!board.has_tag(id, CellTag::Falling));
            assert!(board.has_tag(id, CellTag::Settled));
            assert_eq!(board.cell(id).settled, Some(PieceType::I));
        }

        // The row is not full, so a cleanup pass clears nothing
        assert_eq!(board.clean(), 0);
    }

    #[test]
    fn test_locked_piece_ignores_commands() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(PieceType::O, &mut board);
        piece.lock(&mut board);

        let cells = piece.cells.clone();
        assert_eq!(
            piece.try_move(&mut board, Direction::Left),
            MoveOutcome::Rejected
        );
        assert!(!piece.try_rotate(&mut board));
        assert_eq!(piece.cells, cells);
    }

    #[test]
    fn test_o_rotation_is_identity() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(PieceType::O, &mut board);
        let cells = piece.cells.clone();

        assert!(piece.try_rotate(&mut board));
        assert_eq!(piece.rotation, 1);
        assert_eq!(piece.cells, cells);
    }

    #[test]
    fn test_rotation_applies_kick_near_spawn() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(PieceType::T, &mut board);

        // The raw quarter-turn pokes into the top border; the (2, 0) kick
        // drops the rotated cells back inside the playable area.
        assert!(piece.try_rotate(&mut board));
        assert_eq!(piece.rotation, 1);

        let expected: HashSet<CellId> = [
            CellId::new(2, 5),
            CellId::new(3, 5),
            CellId::new(4, 5),
            CellId::new(3, 4),
        ]
        .into_iter()
        .collect();
        let actual: HashSet<CellId> = piece.cells.iter().copied().collect();
        assert_eq!(actual, expected);

        for &id in &piece.cells {
            assert!(board.has_tag(id, CellTag::Falling));
        }
    }

    #[test]
    fn test_rotation_reverts_fully_when_no_candidate_fits() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(PieceType::I, &mut board);

        // Raw vertical rotation hits the top border. Kicks from state 0 are
        // (0,-2), (0,1), (1,-2), (-2,1): the first two stay in the border
        // row, the last leaves the grid, and settled material at (2..=4, 3)
        // blocks the (1,-2) candidate.
        settle_cell(&mut board, 2, 3, PieceType::J);
        settle_cell(&mut board, 3, 3, PieceType::J);
        settle_cell(&mut board, 4, 3, PieceType::J);

        let cells = piece.cells.clone();
        assert!(!piece.try_rotate(&mut board));

        // Full revert: rotation index, occupied cells, and board tags
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.cells, cells);
        for &id in &piece.cells {
            assert!(board.has_tag(id, CellTag::Falling));
        }
    }

    #[test]
    fn test_rotation_wraps_back_to_first_state() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(PieceType::O, &mut board);

        for _ in 0..ROTATION_STATES {
            assert!(piece.try_rotate(&mut board));
        }
        assert_eq!(piece.rotation, 0);
    }

    #[test]
    fn test_bag_cycle_covers_every_type_once() {
        let mut bag = PieceBag::default();

        let cycle: HashSet<PieceType> = (0..PieceType::ALL.len()).map(|_| bag.pop()).collect();
        assert_eq!(cycle.len(), PieceType::ALL.len());
        assert_eq!(bag.remaining(), 0);
    }

    #[test]
    fn test_bag_refills_after_exhaustion() {
        let mut bag = PieceBag::default();
        for _ in 0..PieceType::ALL.len() {
            bag.pop();
        }

        // The next pop triggers a refill containing every type again
        let second_cycle: HashSet<PieceType> =
            (0..PieceType::ALL.len()).map(|_| bag.pop()).collect();
        assert_eq!(second_cycle.len(), PieceType::ALL.len());
    }

    #[test]
    fn test_rotation_states_are_index_aligned() {
        for kind in PieceType::ALL {
            for rotation in 0..ROTATION_STATES {
                assert_eq!(kind.blocks_at(rotation).len(), 4);
            }
            // State table wraps cleanly
            assert_eq!(kind.blocks_at(0), kind.blocks_at(ROTATION_STATES));
        }
    }
}
