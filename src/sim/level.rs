//! A playable level: grid, ice processes, enemies and fruit
//!
//! The level owns everything that lives on its grid. The player is owned by
//! the game state and passed in where the level needs it.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};
use super::error::LevelError;
use super::fruit::{Collection, FruitManager, FruitWave};
use super::geom::{Direction, Rect};
use super::grid::Grid;
use super::ice::{self, IceField};
use super::player::Player;
use crate::consts::*;
use crate::render::{Canvas, SpriteId};

/// Where an enemy appears at level start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub cell: IVec2,
}

impl EnemySpawn {
    pub fn new(kind: EnemyKind, col: i32, row: i32) -> Self {
        Self {
            kind,
            cell: IVec2::new(col, row),
        }
    }
}

/// Static description of a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Row-major cell codes: 0 = empty, 1 = wall, 2 = ice
    pub layout: Vec<Vec<u8>>,
    pub enemies: Vec<EnemySpawn>,
    /// Fruit waves in spawn order
    pub fruits: Vec<FruitWave>,
    pub player_start: IVec2,
}

impl LevelConfig {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Tunables shared by every level of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelOptions {
    /// Pixel size of the whole play area; cell size is this over grid size
    pub play_area: IVec2,
    pub heat_radius: i32,
    pub ice_step_interval_ms: u64,
}

impl Default for LevelOptions {
    fn default() -> Self {
        Self {
            play_area: IVec2::new(PLAY_AREA_WIDTH, PLAY_AREA_HEIGHT),
            heat_radius: DEFAULT_HEAT_RADIUS,
            ice_step_interval_ms: ICE_STEP_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Level {
    grid: Grid,
    ice: IceField,
    enemies: Vec<Enemy>,
    fruits: FruitManager,
    player_start: IVec2,
    rng: Pcg32,
}

impl Level {
    /// Build a level from its config. Fails on any malformed config.
    pub fn new(
        config: LevelConfig,
        options: &LevelOptions,
        seed: u64,
        now_ms: u64,
    ) -> Result<Self, LevelError> {
        let LevelConfig {
            layout,
            enemies: spawns,
            fruits: waves,
            player_start,
        } = config;

        let grid = Grid::from_layout(&layout, options.play_area)?;
        require_empty(&grid, "player start", player_start)?;
        for spawn in &spawns {
            require_empty(&grid, spawn.kind.as_str(), spawn.cell)?;
        }
        if waves.is_empty() {
            return Err(LevelError::NoWaves);
        }
        if let Some(index) = waves.iter().position(|w| w.count == 0) {
            return Err(LevelError::EmptyWave { index });
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        let cell_size = grid.cell_size();
        let start_rect = Rect::for_cell(player_start, cell_size);
        let fruits = FruitManager::new(waves, &grid, &start_rect, &mut rng);
        let enemies = spawns
            .iter()
            .map(|s| Enemy::spawn(s.kind, s.cell, cell_size, options.heat_radius, &mut rng, now_ms))
            .collect();

        log::info!(
            "Level loaded: {}x{} cells, {} enemies, {} fruit live",
            grid.cols(),
            grid.rows(),
            spawns.len(),
            fruits.live().len()
        );

        Ok(Self {
            grid,
            ice: IceField::new(options.ice_step_interval_ms),
            enemies,
            fruits,
            player_start,
            rng,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ice(&self) -> &IceField {
        &self.ice
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn fruits(&self) -> &FruitManager {
        &self.fruits
    }

    pub fn cell_size(&self) -> IVec2 {
        self.grid.cell_size()
    }

    pub fn player_start(&self) -> IVec2 {
        self.player_start
    }

    /// Strict movement check used by the player
    pub fn can_move_to(&self, rect: &Rect) -> bool {
        self.grid.can_move_to(rect)
    }

    pub fn can_enemy_move_to(&self, rect: &Rect) -> bool {
        self.grid.can_enemy_move_to(rect)
    }

    pub fn has_ice_block(&self, cell: IVec2) -> bool {
        self.grid.is_ice(cell)
    }

    pub fn is_enemy_at(&self, cell: IVec2) -> bool {
        let cell_size = self.grid.cell_size();
        self.enemies.iter().any(|e| e.occupies(cell, cell_size))
    }

    /// Create or clear one ice block; see [`ice::set_cell`]
    pub fn set_cell(&mut self, cell: IVec2, present: bool) -> bool {
        let cell_size = self.grid.cell_size();
        let enemies = &self.enemies;
        ice::set_cell(&mut self.grid, cell, present, |c| {
            enemies.iter().any(|e| e.occupies(c, cell_size))
        })
    }

    pub fn melt_ice_around(&mut self, pixel: IVec2, radius: i32) -> usize {
        ice::melt_ice_around(&mut self.grid, pixel, radius)
    }

    pub fn start_ice_generation(&mut self, cell: IVec2, direction: Direction, now_ms: u64) -> bool {
        let cell_size = self.grid.cell_size();
        let enemies = &self.enemies;
        self.ice.start_generating(&self.grid, cell, direction, now_ms, |c| {
            enemies.iter().any(|e| e.occupies(c, cell_size))
        })
    }

    pub fn start_ice_breaking(&mut self, cell: IVec2, direction: Direction, now_ms: u64) -> bool {
        self.ice.start_breaking(&self.grid, cell, direction, now_ms)
    }

    /// Advance enemies, then the ice processes
    pub fn update(&mut self, now_ms: u64) {
        for enemy in &mut self.enemies {
            enemy.update(&mut self.grid, &mut self.rng, now_ms);
        }

        let cell_size = self.grid.cell_size();
        let enemies = &self.enemies;
        self.ice.update(&mut self.grid, now_ms, |c| {
            enemies.iter().any(|e| e.occupies(c, cell_size))
        });
    }

    /// Whether any enemy overlaps `bounds`
    pub fn enemy_hits(&self, bounds: &Rect) -> bool {
        self.enemies.iter().any(|e| e.collides_with(bounds))
    }

    /// Award the player for every fruit it overlaps
    pub fn collect_fruit(&mut self, player: &mut Player) -> Collection {
        let collection = self.fruits.collect(&player.bounds, &self.grid, &mut self.rng);
        player.add_points(collection.points());
        collection
    }

    pub fn all_fruits_collected(&self) -> bool {
        self.fruits.all_fruits_collected()
    }

    /// Draw walls, then enemies, fruit and ice
    pub fn render(&self, canvas: &mut impl Canvas) {
        for (cell, c) in self.grid.iter() {
            if c.is_wall() {
                canvas.draw_sprite(SpriteId::Wall, self.grid.cell_rect(cell));
            }
        }
        for enemy in &self.enemies {
            canvas.draw_sprite(SpriteId::Enemy(enemy.kind), enemy.bounds);
        }
        for fruit in self.fruits.live() {
            canvas.draw_sprite(SpriteId::Fruit(fruit.kind), fruit.bounds);
        }
        for (cell, _) in self.grid.iter() {
            if let Some(block) = self.grid.ice_block(cell) {
                canvas.draw_sprite(SpriteId::Ice, block.bounds);
            }
        }
    }
}

fn require_empty(grid: &Grid, what: &'static str, cell: IVec2) -> Result<(), LevelError> {
    if !grid.in_bounds(cell) {
        return Err(LevelError::OutOfBounds { what, cell });
    }
    if !grid.is_empty(cell) {
        return Err(LevelError::BlockedSpawn { what, cell });
    }
    Ok(())
}
