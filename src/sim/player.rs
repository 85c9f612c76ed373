//! The player: cell-eased movement, ice interaction and score

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geom::{Direction, Rect, pixel_to_cell};
use super::level::Level;
use super::tick::TickInput;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub bounds: Rect,
    /// Pixel position of the cell currently being eased toward
    pub target: IVec2,
    /// Pixels per tick
    pub speed: i32,
    pub score: u32,
    /// Last held movement direction; the action key acts along it
    pub facing: Direction,
}

impl Player {
    pub fn new(cell: IVec2, cell_size: IVec2, speed: i32) -> Self {
        let bounds = Rect::for_cell(cell, cell_size);
        Self {
            bounds,
            target: bounds.pos,
            speed,
            score: 0,
            facing: Direction::Down,
        }
    }

    /// Cells ahead of the player where ice generation begins, by speed tier
    pub fn lookahead(&self) -> i32 {
        if self.speed < 11 {
            2
        } else if self.speed < 21 {
            3
        } else {
            4
        }
    }

    /// Cell containing the player's top-left pixel
    pub fn cell(&self, cell_size: IVec2) -> IVec2 {
        pixel_to_cell(self.bounds.pos, cell_size)
    }

    pub fn is_at_target(&self) -> bool {
        self.bounds.pos == self.target
    }

    /// Snap to a cell of a (possibly different) level and stop moving
    pub fn reposition(&mut self, cell: IVec2, cell_size: IVec2) {
        self.bounds = Rect::for_cell(cell, cell_size);
        self.target = self.bounds.pos;
    }

    pub fn add_points(&mut self, points: u32) {
        self.score += points;
    }

    pub fn set_points(&mut self, points: u32) {
        self.score = points;
    }

    /// One tick: ease toward the target cell, then handle the action key
    pub fn update(&mut self, input: &TickInput, level: &mut Level, now_ms: u64) {
        if let Some(direction) = input.held_direction() {
            self.facing = direction;
        }
        self.step_movement(input, level);
        if input.action {
            self.use_ice(level, now_ms);
        }
    }

    fn step_movement(&mut self, input: &TickInput, level: &Level) {
        if self.is_at_target() {
            if let Some(direction) = input.held_direction() {
                let candidate = self.target + direction.delta() * level.cell_size();
                if level.can_move_to(&Rect::from_pos_size(candidate, self.bounds.size)) {
                    self.target = candidate;
                }
            }
        }

        let pos = &mut self.bounds.pos;
        pos.x = approach(pos.x, self.target.x, self.speed);
        pos.y = approach(pos.y, self.target.y, self.speed);
    }

    /// Break the adjacent ice run if there is one, otherwise lay ice
    fn use_ice(&self, level: &mut Level, now_ms: u64) {
        let direction = self.facing;
        let here = self.cell(level.cell_size());

        let adjacent = here + direction.delta();
        if level.has_ice_block(adjacent) {
            level.start_ice_breaking(adjacent, direction, now_ms);
            return;
        }

        let start = here + direction.delta() * self.lookahead();
        if !level.has_ice_block(start) {
            level.start_ice_generation(start, direction, now_ms);
        }
    }
}

/// Move `value` toward `target` by at most `step`
fn approach(value: i32, target: i32, step: i32) -> i32 {
    if value < target {
        (value + step).min(target)
    } else if value > target {
        (value - step).max(target)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fruit::{FruitKind, FruitWave};
    use crate::sim::level::{LevelConfig, LevelOptions};

    fn corridor_level() -> Level {
        // 12x3 with a free middle row; fruit parked in the far corner column
        let mut layout = vec![vec![1u8; 12]; 3];
        for col in 1..11 {
            layout[1][col] = 0;
        }
        let config = LevelConfig {
            layout,
            enemies: Vec::new(),
            fruits: vec![FruitWave::new(FruitKind::Banana, 1)],
            player_start: IVec2::new(1, 1),
        };
        let options = LevelOptions {
            play_area: IVec2::new(480, 120),
            ..LevelOptions::default()
        };
        Level::new(config, &options, 0, 0).unwrap()
    }

    fn right() -> TickInput {
        TickInput {
            right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_lookahead_tiers() {
        let cell = IVec2::new(40, 40);
        assert_eq!(Player::new(IVec2::ZERO, cell, 5).lookahead(), 2);
        assert_eq!(Player::new(IVec2::ZERO, cell, 15).lookahead(), 3);
        assert_eq!(Player::new(IVec2::ZERO, cell, 25).lookahead(), 4);
    }

    #[test]
    fn test_movement_eases_one_cell() {
        let mut level = corridor_level();
        let mut player = Player::new(IVec2::new(1, 1), level.cell_size(), 5);

        player.update(&right(), &mut level, 0);
        assert_eq!(player.target, IVec2::new(80, 40));
        assert_eq!(player.bounds.pos, IVec2::new(45, 40));

        // Releasing the key mid-cell keeps sliding to the target
        for _ in 0..7 {
            player.update(&TickInput::default(), &mut level, 0);
        }
        assert_eq!(player.bounds.pos, IVec2::new(80, 40));
        assert!(player.is_at_target());

        player.update(&TickInput::default(), &mut level, 0);
        assert_eq!(player.bounds.pos, IVec2::new(80, 40));
    }

    #[test]
    fn test_movement_refuses_walls() {
        let mut level = corridor_level();
        let mut player = Player::new(IVec2::new(1, 1), level.cell_size(), 5);
        let up = TickInput {
            up: true,
            ..Default::default()
        };
        player.update(&up, &mut level, 0);
        assert_eq!(player.bounds.pos, IVec2::new(40, 40));
        assert_eq!(player.facing, Direction::Up);
    }

    #[test]
    fn test_action_generates_then_breaks() {
        let mut level = corridor_level();
        let mut player = Player::new(IVec2::new(1, 1), level.cell_size(), 5);
        player.facing = Direction::Right;

        let action = TickInput {
            action: true,
            ..Default::default()
        };
        player.update(&action, &mut level, 0);
        assert!(level.ice().is_generating());
        assert_eq!(level.ice().generator().map(|w| w.cell), Some(IVec2::new(3, 1)));

        let mut now = 0;
        while level.ice().is_generating() {
            now += 75;
            level.update(now);
        }
        assert!(level.has_ice_block(IVec2::new(3, 1)));
        assert!(level.has_ice_block(IVec2::new(10, 1)));

        // Step next to the ice and break it
        player.reposition(IVec2::new(2, 1), level.cell_size());
        player.update(&action, &mut level, now);
        assert!(level.ice().is_breaking());
        while level.ice().is_breaking() {
            now += 75;
            level.update(now);
        }
        assert_eq!(level.grid().ice_count(), 0);
    }

    #[test]
    fn test_score_accumulates_and_resets() {
        let mut player = Player::new(IVec2::ZERO, IVec2::new(40, 40), 5);
        player.add_points(FruitKind::Banana.points());
        player.add_points(FruitKind::Orange.points());
        assert_eq!(player.score, 25);
        player.set_points(0);
        assert_eq!(player.score, 0);
    }
}
