//! Bad Ice Cream - A grid-based ice-block arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, ice, enemies, fruit, game state)
//! - `levels`: Built-in level data
//! - `input`: Raw key state to per-tick input
//! - `render`: Canvas and sprite seam
//! - `settings`: Tunable configuration
//! - `game`: Lifecycle facade and fixed-step scheduler

pub mod game;
pub mod input;
pub mod levels;
pub mod render;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 60;
    /// Maximum ticks per pump to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock gap a single pump will account for
    pub const MAX_FRAME_MS: u64 = 100;

    /// Play area in pixels; cell size is this over the grid size
    pub const PLAY_AREA_WIDTH: i32 = 800;
    pub const PLAY_AREA_HEIGHT: i32 = 800;

    /// Countdown per level
    pub const LEVEL_DURATION_MS: u64 = 120_000;
    /// Delay between successive ice generator/breaker steps
    pub const ICE_STEP_INTERVAL_MS: u64 = 75;

    /// Player pixels per tick
    pub const DEFAULT_PLAYER_SPEED: i32 = 5;
    /// Thermal Titan melt radius in cells
    pub const DEFAULT_HEAT_RADIUS: i32 = 1;
}
