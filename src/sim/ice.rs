//! Ice creation and breaking
//!
//! Ice grows and shrinks through two timed walks across the grid: the
//! generator lays a line of blocks until something is in the way, the breaker
//! clears a contiguous run of blocks. At most one of each is in flight; a new
//! start replaces the previous walk of the same kind.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geom::{Direction, pixel_to_cell};
use super::grid::Grid;

/// Cells checked for enemies along the generator path (current + next two)
pub const ENEMY_LOOKAHEAD_CELLS: i32 = 2;

/// Create or clear ice at `cell`.
///
/// Creation is a no-op on walls, existing ice, cells outside the grid and
/// cells an enemy is standing on. Returns whether the grid changed.
pub fn set_cell(
    grid: &mut Grid,
    cell: IVec2,
    present: bool,
    enemy_at: impl Fn(IVec2) -> bool,
) -> bool {
    if present {
        if enemy_at(cell) {
            return false;
        }
        grid.place_ice(cell)
    } else {
        grid.remove_ice(cell)
    }
}

/// Remove every ice block in the `(2r+1)^2` square of cells centred on the
/// cell containing `pixel`, clipped to the grid. Returns the number melted.
pub fn melt_ice_around(grid: &mut Grid, pixel: IVec2, radius: i32) -> usize {
    let center = pixel_to_cell(pixel, grid.cell_size());
    let min_x = (center.x - radius).max(0);
    let max_x = (center.x + radius + 1).min(grid.cols());
    let min_y = (center.y - radius).max(0);
    let max_y = (center.y + radius + 1).min(grid.rows());

    let mut melted = 0;
    for y in min_y..max_y {
        for x in min_x..max_x {
            if grid.remove_ice(IVec2::new(x, y)) {
                melted += 1;
            }
        }
    }
    melted
}

/// An in-flight ice walk (shared shape for generator and breaker)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceWalk {
    pub direction: Direction,
    pub cell: IVec2,
    pub last_step_ms: u64,
}

/// Generator/breaker state for one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceField {
    step_interval_ms: u64,
    generator: Option<IceWalk>,
    breaker: Option<IceWalk>,
}

impl IceField {
    pub fn new(step_interval_ms: u64) -> Self {
        Self {
            step_interval_ms,
            generator: None,
            breaker: None,
        }
    }

    pub fn is_generating(&self) -> bool {
        self.generator.is_some()
    }

    pub fn is_breaking(&self) -> bool {
        self.breaker.is_some()
    }

    pub fn generator(&self) -> Option<&IceWalk> {
        self.generator.as_ref()
    }

    pub fn breaker(&self) -> Option<&IceWalk> {
        self.breaker.as_ref()
    }

    /// Start laying ice from `cell` toward `direction`.
    ///
    /// Refused while a break is in flight, or when the first cell is not
    /// empty floor or has an enemy on it.
    pub fn start_generating(
        &mut self,
        grid: &Grid,
        cell: IVec2,
        direction: Direction,
        now_ms: u64,
        enemy_at: impl Fn(IVec2) -> bool,
    ) -> bool {
        if self.breaker.is_some() || !grid.is_empty(cell) || enemy_at(cell) {
            return false;
        }
        log::debug!("Ice generation started at {} heading {:?}", cell, direction);
        self.generator = Some(IceWalk {
            direction,
            cell,
            last_step_ms: now_ms,
        });
        true
    }

    /// Start clearing ice from `cell` toward `direction`. `cell` must hold ice.
    pub fn start_breaking(
        &mut self,
        grid: &Grid,
        cell: IVec2,
        direction: Direction,
        now_ms: u64,
    ) -> bool {
        if !grid.is_ice(cell) {
            return false;
        }
        log::debug!("Ice breaking started at {} heading {:?}", cell, direction);
        self.breaker = Some(IceWalk {
            direction,
            cell,
            last_step_ms: now_ms,
        });
        true
    }

    pub fn stop_all(&mut self) {
        self.generator = None;
        self.breaker = None;
    }

    /// Advance both walks by at most one step each
    pub fn update(&mut self, grid: &mut Grid, now_ms: u64, enemy_at: impl Fn(IVec2) -> bool) {
        self.step_generator(grid, now_ms, &enemy_at);
        self.step_breaker(grid, now_ms);
    }

    fn step_generator(&mut self, grid: &mut Grid, now_ms: u64, enemy_at: &impl Fn(IVec2) -> bool) {
        let Some(walk) = self.generator.as_mut() else {
            return;
        };
        if now_ms.saturating_sub(walk.last_step_ms) < self.step_interval_ms {
            return;
        }

        let step = walk.direction.delta();
        let next = walk.cell + step;
        let blocked_ahead = !grid.in_bounds(next)
            || grid.is_wall(next)
            || grid.is_ice(next)
            || enemy_at(next);
        let enemy_on_path = (0..=ENEMY_LOOKAHEAD_CELLS).any(|i| enemy_at(walk.cell + step * i));

        set_cell(grid, walk.cell, true, enemy_at);

        if blocked_ahead || enemy_on_path {
            log::debug!("Ice generation stopped at {}", walk.cell);
            self.generator = None;
        } else {
            walk.cell = next;
            walk.last_step_ms = now_ms;
        }
    }

    fn step_breaker(&mut self, grid: &mut Grid, now_ms: u64) {
        let Some(walk) = self.breaker.as_mut() else {
            return;
        };
        if now_ms.saturating_sub(walk.last_step_ms) < self.step_interval_ms {
            return;
        }

        grid.remove_ice(walk.cell);
        walk.cell += walk.direction.delta();

        if grid.is_ice(walk.cell) {
            walk.last_step_ms = now_ms;
        } else {
            log::debug!("Ice breaking stopped at {}", walk.cell);
            self.breaker = None;
        }
    }
}
