#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Millisecond timing values are far below f32 precision limits
    clippy::cast_precision_loss
)]

use bevy_ecs::prelude::*;

use crate::config::Config;

/// Session-wide state owned by the controller. The score is an explicit
/// field here, passed through the cleanup pipeline rather than mutated as
/// ambient global state.
#[derive(Resource, Debug, Clone, Default)]
pub struct GameState {
    pub score: u32,
    pub rows_cleared: u32,
    pub game_over: bool,
    /// Guard flag: at most one cleanup pass runs at a time.
    pub cleaning: bool,
}

/// Semantic movement commands for the in-flight piece, set by the key
/// mapper and consumed by the input system each tick. Keys without a
/// mapping never reach this struct.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub rotate: bool,
}

/// State of an in-progress cleanup pass. A discovered full row blinks for
/// `blink_delay` seconds before it is cleared and the material above it
/// shifted down; then the next full row is discovered.
#[derive(Resource, Debug, Clone)]
pub struct Cleanup {
    pub blinking_row: Option<usize>,
    pub blink_elapsed: f32,
    pub blink_delay: f32,
}

impl Default for Cleanup {
    fn default() -> Self {
        Self {
            blinking_row: None,
            blink_elapsed: 0.0,
            blink_delay: Config::current().timing.blink_ms as f32 / 1000.0,
        }
    }
}
