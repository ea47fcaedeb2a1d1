#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;

use crate::Time;
use crate::board::Board;
use crate::components::{Cleanup, GameState, Input};
use crate::piece::{Piece, PieceBag};
use crate::systems::{input_system, spawn_piece, tick_system};

pub type AppResult<T> = anyhow::Result<T>;

/// Owns the ECS world the whole session lives in. A session is single-use:
/// after game over, `reset` builds a fresh set of resources rather than
/// resuming the old ones.
pub struct App {
    pub world: World,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Input::default());
        world.insert_resource(GameState::default());
        world.insert_resource(Cleanup::default());
        world.insert_resource(PieceBag::default());
        world.insert_resource(Board::new());

        let mut app = Self {
            world,
            should_quit: false,
        };

        spawn_piece(&mut app.world);
        app
    }

    /// One session tick: advances the clock and feeds its delta to input
    /// routing and the lock/cleanup pipeline. The event loop calls this at
    /// the fast tick period; the blink timing below derives from the same
    /// clock.
    pub fn tick(&mut self) {
        let delta_seconds = {
            let mut time = self.world.resource_mut::<Time>();
            time.update();
            time.delta_seconds()
        };
        input_system(&mut self.world);
        tick_system(&mut self.world, delta_seconds);
    }

    /// Fresh session: empty board, zero score, new bag, new first piece.
    pub fn reset(&mut self) {
        let stale: Vec<Entity> = self
            .world
            .query_filtered::<Entity, With<Piece>>()
            .iter(&self.world)
            .collect();
        for entity in stale {
            self.world.despawn(entity);
        }

        self.world.insert_resource(GameState::default());
        self.world.insert_resource(Cleanup::default());
        self.world.insert_resource(PieceBag::default());
        self.world.insert_resource(Board::new());
        self.world.insert_resource(Input::default());

        spawn_piece(&mut self.world);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
