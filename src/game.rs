#![warn(clippy::all, clippy::pedantic)]

// Full grid dimensions, including the 1-cell border frame around the
// playable area.
pub const BOARD_ROWS: usize = 22;
pub const BOARD_COLS: usize = 12;

// Playable extent (inclusive). Cells on the frame just outside this range
// are border cells.
pub const PLAYABLE_ROW_START: usize = 1;
pub const PLAYABLE_ROW_END: usize = 20;
pub const PLAYABLE_COL_START: usize = 1;
pub const PLAYABLE_COL_END: usize = 10;

// Spawn anchor for new pieces: top playable row, roughly centered.
pub const SPAWN_ROW: usize = PLAYABLE_ROW_START;
pub const SPAWN_COL: usize = 5;

// Scoring
pub const ROW_CLEAR_POINTS: u32 = 100;

// Default timing, overridable through the config file. The auto-descent
// period must stay materially longer than the tick period.
pub const AUTO_DESCENT_MS: u64 = 1000;
pub const TICK_MS: u64 = 100;
pub const BLINK_MS: u64 = 150;
