//! Fruit waves: spawning, collection and level-clear detection
//!
//! A level's fruit is a queue of same-kind waves. The whole wave is placed
//! at once; the next wave only appears once every fruit of the current one
//! has been picked up.

use std::collections::VecDeque;

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::grid::Grid;

/// Fruit types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Banana,
    Grapes,
    Lemon,
    Orange,
    Watermelon,
}

impl FruitKind {
    pub const ALL: [FruitKind; 5] = [
        FruitKind::Banana,
        FruitKind::Grapes,
        FruitKind::Lemon,
        FruitKind::Orange,
        FruitKind::Watermelon,
    ];

    /// Score awarded on pickup
    pub const fn points(self) -> u32 {
        match self {
            FruitKind::Banana => 5,
            FruitKind::Grapes => 15,
            FruitKind::Lemon => 15,
            FruitKind::Orange => 20,
            FruitKind::Watermelon => 15,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FruitKind::Banana => "Banana",
            FruitKind::Grapes => "Grapes",
            FruitKind::Lemon => "Lemon",
            FruitKind::Orange => "Orange",
            FruitKind::Watermelon => "Watermelon",
        }
    }
}

/// One batch of same-kind fruit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FruitWave {
    pub kind: FruitKind,
    pub count: u32,
}

impl FruitWave {
    pub fn new(kind: FruitKind, count: u32) -> Self {
        Self { kind, count }
    }
}

/// A fruit lying in the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fruit {
    pub kind: FruitKind,
    pub bounds: Rect,
}

impl Fruit {
    pub fn points(&self) -> u32 {
        self.kind.points()
    }
}

/// Result of one collection pass
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub collected: Vec<Fruit>,
    /// Wave that was spawned because the previous one ran out
    pub spawned: Option<FruitWave>,
}

impl Collection {
    pub fn points(&self) -> u32 {
        self.collected.iter().map(Fruit::points).sum()
    }
}

/// Wave queue plus the currently live fruit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FruitManager {
    waves: VecDeque<FruitWave>,
    live: Vec<Fruit>,
}

impl FruitManager {
    /// Queue `waves` and spawn the first one immediately, keeping clear of
    /// `avoid` (the player's bounds).
    pub fn new(waves: Vec<FruitWave>, grid: &Grid, avoid: &Rect, rng: &mut impl Rng) -> Self {
        let mut manager = Self {
            waves: waves.into(),
            live: Vec::new(),
        };
        manager.spawn_next_wave(grid, avoid, rng);
        manager
    }

    pub fn live(&self) -> &[Fruit] {
        &self.live
    }

    /// Waves still queued (not counting the live one)
    pub fn remaining_waves(&self) -> usize {
        self.waves.len()
    }

    /// Live fruit empty and nothing left to spawn
    pub fn all_fruits_collected(&self) -> bool {
        self.live.is_empty() && self.waves.is_empty()
    }

    /// Pick up every fruit overlapping `player`, then spawn the next wave if
    /// the current one is exhausted.
    pub fn collect(&mut self, player: &Rect, grid: &Grid, rng: &mut impl Rng) -> Collection {
        let mut collection = Collection::default();
        self.live.retain(|fruit| {
            if fruit.bounds.intersects(player) {
                collection.collected.push(*fruit);
                false
            } else {
                true
            }
        });

        if self.live.is_empty() {
            collection.spawned = self.spawn_next_wave(grid, player, rng);
        }
        collection
    }

    fn spawn_next_wave(
        &mut self,
        grid: &Grid,
        avoid: &Rect,
        rng: &mut impl Rng,
    ) -> Option<FruitWave> {
        let wave = self.waves.pop_front()?;

        let candidates: Vec<IVec2> = grid
            .iter()
            .filter(|(cell, c)| c.is_empty() && !grid.cell_rect(*cell).intersects(avoid))
            .map(|(cell, _)| cell)
            .collect();

        if candidates.is_empty() {
            log::warn!(
                "No free cell for {} x{}; wave dropped",
                wave.kind.as_str(),
                wave.count
            );
            return Some(wave);
        }

        for _ in 0..wave.count {
            let cell = candidates[rng.random_range(0..candidates.len())];
            self.live.push(Fruit {
                kind: wave.kind,
                bounds: grid.cell_rect(cell),
            });
        }
        log::debug!(
            "Spawned {} x{} ({} waves left)",
            wave.kind.as_str(),
            wave.count,
            self.waves.len()
        );
        Some(wave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn open_grid(cols: usize, rows: usize) -> Grid {
        let mut layout = vec![vec![0u8; cols]; rows];
        for col in 0..cols {
            layout[0][col] = 1;
            layout[rows - 1][col] = 1;
        }
        for row in layout.iter_mut() {
            row[0] = 1;
            row[cols - 1] = 1;
        }
        Grid::from_layout(&layout, IVec2::new(cols as i32 * 40, rows as i32 * 40)).unwrap()
    }

    fn nowhere() -> Rect {
        Rect::new(-1000, -1000, 1, 1)
    }

    #[test]
    fn test_point_values() {
        assert_eq!(FruitKind::Banana.points(), 5);
        assert_eq!(FruitKind::Grapes.points(), 15);
        assert_eq!(FruitKind::Lemon.points(), 15);
        assert_eq!(FruitKind::Orange.points(), 20);
        assert_eq!(FruitKind::Watermelon.points(), 15);
    }

    #[test]
    fn test_first_wave_spawns_in_full_on_empty_cells() {
        let grid = open_grid(10, 10);
        let mut rng = Pcg32::seed_from_u64(42);
        let waves = vec![
            FruitWave::new(FruitKind::Banana, 20),
            FruitWave::new(FruitKind::Grapes, 16),
        ];
        let manager = FruitManager::new(waves, &grid, &nowhere(), &mut rng);

        assert_eq!(manager.live().len(), 20);
        assert!(manager.live().iter().all(|f| f.kind == FruitKind::Banana));
        assert_eq!(manager.remaining_waves(), 1);
        for fruit in manager.live() {
            let cell = fruit.bounds.pos / grid.cell_size();
            assert!(grid.is_empty(cell));
        }
    }

    #[test]
    fn test_next_wave_waits_for_last_fruit() {
        let grid = open_grid(10, 10);
        let mut rng = Pcg32::seed_from_u64(42);
        let waves = vec![
            FruitWave::new(FruitKind::Banana, 20),
            FruitWave::new(FruitKind::Grapes, 16),
        ];
        let mut manager = FruitManager::new(waves, &grid, &nowhere(), &mut rng);

        let mut score = 0;
        while let Some(fruit) = manager.live().first().copied() {
            assert_eq!(fruit.kind, FruitKind::Banana);
            let collection = manager.collect(&fruit.bounds, &grid, &mut rng);
            score += collection.points();
            if manager.live().iter().any(|f| f.kind == FruitKind::Grapes) {
                assert_eq!(collection.spawned.map(|w| w.kind), Some(FruitKind::Grapes));
                break;
            }
            assert!(collection.spawned.is_none());
        }

        assert_eq!(score, 100);
        assert_eq!(manager.live().len(), 16);
        assert!(manager.live().iter().all(|f| f.kind == FruitKind::Grapes));
        assert!(!manager.all_fruits_collected());
    }

    #[test]
    fn test_wave_avoids_player_cell() {
        // 3x3 interior; player sits on the centre
        let grid = open_grid(5, 5);
        let player = grid.cell_rect(IVec2::new(2, 2));
        let mut rng = Pcg32::seed_from_u64(9);
        let manager = FruitManager::new(
            vec![FruitWave::new(FruitKind::Orange, 40)],
            &grid,
            &player,
            &mut rng,
        );
        assert!(manager.live().iter().all(|f| !f.bounds.intersects(&player)));
    }

    #[test]
    fn test_all_collected_after_last_wave() {
        let grid = open_grid(4, 3);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut manager = FruitManager::new(
            vec![FruitWave::new(FruitKind::Lemon, 1)],
            &grid,
            &nowhere(),
            &mut rng,
        );
        assert!(!manager.all_fruits_collected());

        let everything = Rect::new(0, 0, 160, 120);
        let collection = manager.collect(&everything, &grid, &mut rng);
        assert_eq!(collection.points(), 15);
        assert!(collection.spawned.is_none());
        assert!(manager.all_fruits_collected());
    }

    #[test]
    fn test_wave_with_no_room_is_dropped() {
        let grid = Grid::from_layout(&[vec![1u8, 1, 1]], IVec2::new(120, 40)).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let manager = FruitManager::new(
            vec![FruitWave::new(FruitKind::Banana, 3)],
            &grid,
            &nowhere(),
            &mut rng,
        );
        assert!(manager.live().is_empty());
        assert!(manager.all_fruits_collected());
    }
}
