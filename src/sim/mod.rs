//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only through the `now_ms` passed into each update
//! - Seeded RNG only (one `Pcg32` per level)
//! - Stable iteration order (row-major cells, spawn-order enemies)
//! - No rendering or platform dependencies beyond the `Canvas` seam

pub mod clock;
pub mod enemy;
pub mod error;
pub mod fruit;
pub mod geom;
pub mod grid;
pub mod ice;
pub mod level;
pub mod level_manager;
pub mod player;
pub mod state;
pub mod tick;

pub use clock::{Clock, ManualClock, SystemClock};
pub use enemy::{Enemy, EnemyKind, EnemyProfile, Movement};
pub use error::LevelError;
pub use fruit::{Fruit, FruitKind, FruitManager, FruitWave};
pub use geom::{Direction, Rect, pixel_to_cell};
pub use grid::{Cell, Grid, IceBlock};
pub use ice::IceField;
pub use level::{EnemySpawn, Level, LevelConfig, LevelOptions};
pub use level_manager::LevelManager;
pub use player::Player;
pub use state::{GameEvent, GameOptions, GameOutcome, GamePhase, GameState};
pub use tick::{TickInput, tick};
