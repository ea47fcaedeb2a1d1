#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, info, trace};

use crate::board::Board;
use crate::components::{Cleanup, GameState, Input};
use crate::game::ROW_CLEAR_POINTS;
use crate::piece::{Direction, Piece, PieceBag};

/// Pops the next type from the bag (refilling it on exhaustion) and spawns
/// the piece entity at the anchor. Stale input is dropped so a held key
/// from the previous piece cannot leak into the new one.
pub fn spawn_piece(world: &mut World) {
    if let Some(mut input) = world.get_resource_mut::<Input>() {
        *input = Input::default();
    }

    let kind = world.resource_mut::<PieceBag>().pop();
    let piece = {
        let mut board = world.resource_mut::<Board>();
        Piece::spawn(kind, &mut board)
    };
    world.spawn(piece);
}

// The single active piece, if any.
fn active_piece(world: &mut World) -> Option<(Entity, Piece)> {
    let mut query = world.query::<(Entity, &Piece)>();
    query
        .iter(world)
        .next()
        .map(|(entity, piece)| (entity, piece.clone()))
}

// Applies an edited clone back onto the entity.
fn store_piece(world: &mut World, entity: Entity, piece: Piece) {
    if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
        entity_mut.insert(piece);
    }
}

/// Routes buffered movement commands to the in-flight piece. Commands are
/// consumed either way; they are ignored while the session is over, while
/// a cleanup pass runs, or when no piece is in flight.
pub fn input_system(world: &mut World) {
    let input = std::mem::take(&mut *world.resource_mut::<Input>());

    let state = world.resource::<GameState>();
    if state.game_over || state.cleaning {
        return;
    }

    let Some((entity, mut piece)) = active_piece(world) else {
        return;
    };
    if !piece.in_flight {
        return;
    }

    {
        let mut board = world.resource_mut::<Board>();

        if input.left {
            piece.try_move(&mut board, Direction::Left);
        }
        if input.right {
            piece.try_move(&mut board, Direction::Right);
        }
        if input.down {
            piece.try_move(&mut board, Direction::Down);
        }
        if input.rotate && piece.in_flight {
            piece.try_rotate(&mut board);
        }
    }

    store_piece(world, entity, piece);
}

/// Auto-descent trigger: one `down` attempt per period while a piece is in
/// flight. The same path locks the piece when the move is blocked.
pub fn descent_system(world: &mut World) {
    let state = world.resource::<GameState>();
    if state.game_over || state.cleaning {
        return;
    }

    let Some((entity, mut piece)) = active_piece(world) else {
        return;
    };
    if !piece.in_flight {
        return;
    }

    {
        let mut board = world.resource_mut::<Board>();
        piece.try_move(&mut board, Direction::Down);
    }
    store_piece(world, entity, piece);
}

/// Fast tick: detects a locked piece, runs the cleanup pass for it (spread
/// over ticks so cleared rows can blink), and respawns afterwards. Also the
/// game-over check, which must precede any cleanup start.
pub fn tick_system(world: &mut World, delta_seconds: f32) {
    trace!("tick, delta {delta_seconds}");

    if world.resource::<GameState>().game_over {
        return;
    }

    if !world.resource::<GameState>().cleaning {
        let Some((_, piece)) = active_piece(world) else {
            return;
        };
        if piece.in_flight {
            return;
        }

        if world.resource::<Board>().static_in_spawn_row() {
            let mut state = world.resource_mut::<GameState>();
            state.game_over = true;
            info!("game over, final score {}", state.score);
            return;
        }

        world.resource_mut::<GameState>().cleaning = true;
        {
            let mut cleanup = world.resource_mut::<Cleanup>();
            cleanup.blinking_row = None;
            cleanup.blink_elapsed = 0.0;
        }
        debug!("cleanup pass started");
    }

    if cleanup_step(world, delta_seconds) {
        let state = {
            let mut state = world.resource_mut::<GameState>();
            state.cleaning = false;
            state.clone()
        };
        info!(
            "cleanup pass finished, score {} ({} rows total)",
            state.score, state.rows_cleared
        );

        if let Some((entity, _)) = active_piece(world) {
            world.despawn(entity);
        }
        spawn_piece(world);
    }
}

// One step of the cleanup state machine. Returns true once no full rows
// remain and any pending blink has resolved.
fn cleanup_step(world: &mut World, delta_seconds: f32) -> bool {
    let blinking = world.resource::<Cleanup>().blinking_row;

    if let Some(row) = blinking {
        {
            let mut cleanup = world.resource_mut::<Cleanup>();
            cleanup.blink_elapsed += delta_seconds;
            if cleanup.blink_elapsed < cleanup.blink_delay {
                return false;
            }
            cleanup.blinking_row = None;
        }

        // Blink done: clear the row, reward it exactly once, then settle
        // the material above it before the next row is considered.
        let mut board = world.resource_mut::<Board>();
        board.clear_row(row);
        board.shift_static_down(row);
        let mut state = world.resource_mut::<GameState>();
        state.score += ROW_CLEAR_POINTS;
        state.rows_cleared += 1;
        debug!("row {row} cleared, score {}", state.score);
    }

    let next_full = world.resource::<Board>().find_full_static_rows().first().copied();
    match next_full {
        Some(row) => {
            world.resource_mut::<Board>().set_row_blink(row, true);
            let mut cleanup = world.resource_mut::<Cleanup>();
            cleanup.blinking_row = Some(row);
            cleanup.blink_elapsed = 0.0;
            false
        }
        None => true,
    }
}
