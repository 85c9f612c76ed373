//! Level configuration errors
//!
//! Any of these aborts level construction; a game never starts on a level
//! that failed to load.

use glam::IVec2;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level layout has no cells")]
    EmptyLayout,

    #[error("layout row {row} has {found} cells, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell code {code} at row {row}, col {col}")]
    UnknownCell { code: u8, row: usize, col: usize },

    #[error("play area {width}x{height} is too small for a {cols}x{rows} grid")]
    PlayAreaTooSmall {
        width: i32,
        height: i32,
        cols: usize,
        rows: usize,
    },

    #[error("{what} at cell {cell} is outside the grid")]
    OutOfBounds { what: &'static str, cell: IVec2 },

    #[error("{what} at cell {cell} is not on an empty cell")]
    BlockedSpawn { what: &'static str, cell: IVec2 },

    #[error("level has no fruit waves")]
    NoWaves,

    #[error("fruit wave {index} has a count of zero")]
    EmptyWave { index: usize },

    #[error("a game needs at least one level")]
    NoLevels,

    #[error("invalid level config: {0}")]
    Json(#[from] serde_json::Error),
}
