//! Enemy kinds and their per-tick movement rules
//!
//! Each kind maps to a [`EnemyProfile`] row; adding a kind means adding one
//! enum variant and one profile.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::{Direction, Rect};
use super::grid::Grid;
use super::ice::melt_ice_around;

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Guard,
    Yeti,
    Ghost,
    ThermalTitan,
}

/// How an enemy decides where it may step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Same check as the player; re-rolls direction when blocked
    Strict,
    /// Walks over ice, only walls block; re-rolls direction when blocked
    Phasing,
    /// Strict check, deterministic turn when blocked
    WallFollow,
}

/// Static tuning per enemy kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyProfile {
    /// Pixels per tick
    pub speed: i32,
    /// Forced random re-roll after this long without a direction change
    pub direction_timeout_ms: Option<u64>,
    pub movement: Movement,
    pub melts_ice: bool,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Guard,
        EnemyKind::Yeti,
        EnemyKind::Ghost,
        EnemyKind::ThermalTitan,
    ];

    pub const fn profile(self) -> EnemyProfile {
        match self {
            EnemyKind::Guard => EnemyProfile {
                speed: 2,
                direction_timeout_ms: Some(3000),
                movement: Movement::Strict,
                melts_ice: false,
            },
            EnemyKind::Yeti => EnemyProfile {
                speed: 4,
                direction_timeout_ms: None,
                movement: Movement::WallFollow,
                melts_ice: false,
            },
            EnemyKind::Ghost => EnemyProfile {
                speed: 3,
                direction_timeout_ms: Some(5000),
                movement: Movement::Phasing,
                melts_ice: false,
            },
            EnemyKind::ThermalTitan => EnemyProfile {
                speed: 3,
                direction_timeout_ms: Some(4000),
                movement: Movement::Phasing,
                melts_ice: true,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Guard => "Guard",
            EnemyKind::Yeti => "Yeti",
            EnemyKind::Ghost => "Ghost",
            EnemyKind::ThermalTitan => "ThermalTitan",
        }
    }
}

/// Turn order for wall followers: right, up, left, down
pub const WALL_FOLLOW_CYCLE: [Direction; 4] = [
    Direction::Right,
    Direction::Up,
    Direction::Left,
    Direction::Down,
];

/// Blocked wall follower turns to `(index + 3) % 4` in [`WALL_FOLLOW_CYCLE`]
pub fn wall_follow_turn(direction: Direction) -> Direction {
    let index = WALL_FOLLOW_CYCLE
        .iter()
        .position(|&d| d == direction)
        .unwrap_or(0);
    WALL_FOLLOW_CYCLE[(index + 3) % 4]
}

/// A live enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub bounds: Rect,
    pub direction: Direction,
    /// Clock time of the last direction change
    pub last_change_ms: u64,
    /// Melt radius in cells (ThermalTitan only)
    pub heat_radius: i32,
}

impl Enemy {
    /// Spawn at a grid cell, one cell in size
    pub fn spawn(
        kind: EnemyKind,
        cell: IVec2,
        cell_size: IVec2,
        heat_radius: i32,
        rng: &mut impl Rng,
        now_ms: u64,
    ) -> Self {
        let direction = match kind.profile().movement {
            Movement::WallFollow => Direction::Right,
            Movement::Strict | Movement::Phasing => random_direction(rng),
        };
        Self {
            kind,
            bounds: Rect::for_cell(cell, cell_size),
            direction,
            last_change_ms: now_ms,
            heat_radius,
        }
    }

    pub fn profile(&self) -> EnemyProfile {
        self.kind.profile()
    }

    /// One tick: try to step, react to blockage, melt, then apply timeout
    pub fn update(&mut self, grid: &mut Grid, rng: &mut impl Rng, now_ms: u64) {
        let profile = self.kind.profile();
        let next = Rect::from_pos_size(
            self.bounds.pos + self.direction.delta() * profile.speed,
            self.bounds.size,
        );

        let legal = match profile.movement {
            Movement::Strict | Movement::WallFollow => grid.can_move_to(&next),
            Movement::Phasing => grid.can_enemy_move_to(&next),
        };

        if legal {
            self.bounds = next;
        } else if profile.movement == Movement::WallFollow {
            self.direction = wall_follow_turn(self.direction);
        } else {
            self.change_direction(rng, now_ms);
        }

        if profile.melts_ice {
            melt_ice_around(grid, self.bounds.pos, self.heat_radius);
        }

        if let Some(timeout) = profile.direction_timeout_ms {
            if now_ms.saturating_sub(self.last_change_ms) > timeout {
                self.change_direction(rng, now_ms);
            }
        }
    }

    fn change_direction(&mut self, rng: &mut impl Rng, now_ms: u64) {
        self.direction = random_direction(rng);
        self.last_change_ms = now_ms;
    }

    /// Whether any part of this enemy is inside `cell`
    pub fn occupies(&self, cell: IVec2, cell_size: IVec2) -> bool {
        self.bounds.intersects(&Rect::for_cell(cell, cell_size))
    }

    pub fn collides_with(&self, other: &Rect) -> bool {
        self.bounds.intersects(other)
    }
}

fn random_direction(rng: &mut impl Rng) -> Direction {
    Direction::from_index(rng.random_range(0..4))
}
