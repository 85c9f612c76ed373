//! Fixed timestep simulation tick
//!
//! Order within a tick is fixed: player, level (enemies then ice), enemy
//! collision, fruit pickup, then level-clear and countdown checks.

use super::geom::Direction;
use super::state::{GameEvent, GameOutcome, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Action key pressed since the previous tick (edge, not level)
    pub action: bool,
}

impl TickInput {
    /// Held movement direction, prioritised up, down, left, right
    pub fn held_direction(&self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Advance the game by one tick at clock time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    if state.is_over() {
        return;
    }
    state.time_ticks += 1;

    let level = state.levels.current_mut();
    state.player.update(input, level, now_ms);
    level.update(now_ms);

    if level.enemy_hits(&state.player.bounds) {
        state.finish(GameOutcome::KilledByEnemy);
        return;
    }

    let collection = level.collect_fruit(&mut state.player);
    let cleared = level.all_fruits_collected();

    for fruit in &collection.collected {
        state.events.push(GameEvent::FruitCollected {
            kind: fruit.kind,
            points: fruit.points(),
        });
    }
    if let Some(wave) = collection.spawned {
        state.events.push(GameEvent::WaveSpawned {
            kind: wave.kind,
            count: wave.count,
        });
    }

    if cleared {
        if state.levels.is_last_level() {
            state.finish(GameOutcome::Won);
        } else {
            state.advance_level(now_ms);
        }
        return;
    }

    if state.time_expired(now_ms) {
        state.finish(GameOutcome::TimeExpired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemyKind;
    use crate::sim::fruit::{FruitKind, FruitWave};
    use crate::sim::level::{EnemySpawn, LevelConfig, LevelOptions};
    use crate::sim::state::{GameOptions, GamePhase};
    use glam::IVec2;

    const FRAME_MS: u64 = 16;

    fn options() -> GameOptions {
        GameOptions {
            level: LevelOptions {
                play_area: IVec2::new(200, 120),
                ..LevelOptions::default()
            },
            ..GameOptions::default()
        }
    }

    /// 5x3 corridor, player on the left end, one banana somewhere to its right
    fn corridor(player_col: i32) -> LevelConfig {
        LevelConfig {
            layout: vec![
                vec![1, 1, 1, 1, 1],
                vec![1, 0, 0, 0, 1],
                vec![1, 1, 1, 1, 1],
            ],
            enemies: Vec::new(),
            fruits: vec![FruitWave::new(FruitKind::Banana, 1)],
            player_start: IVec2::new(player_col, 1),
        }
    }

    fn hold_right() -> TickInput {
        TickInput {
            right: true,
            ..Default::default()
        }
    }

    fn run(state: &mut GameState, input: &TickInput, ticks: u64) -> u64 {
        let mut now = 0;
        for _ in 0..ticks {
            now += FRAME_MS;
            tick(state, input, now);
            if state.is_over() || state.levels.current_index() > 0 {
                break;
            }
        }
        now
    }

    #[test]
    fn test_held_direction_priority() {
        let all = TickInput {
            up: true,
            down: true,
            left: true,
            right: true,
            action: false,
        };
        assert_eq!(all.held_direction(), Some(Direction::Up));
        let lr = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(lr.held_direction(), Some(Direction::Left));
        assert_eq!(TickInput::default().held_direction(), None);
    }

    #[test]
    fn test_clearing_level_advances_and_keeps_score() {
        let mut state = GameState::new(&[corridor(1), corridor(3)], &options(), 0).unwrap();
        let now = run(&mut state, &hold_right(), 200);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.levels.current_index(), 1);
        assert_eq!(state.score(), 5);
        assert_eq!(state.player.bounds.pos, IVec2::new(120, 40));
        assert!(state.player.is_at_target());
        assert_eq!(state.level_start_ms, now);
        assert_eq!(state.remaining_time_ms(now), state.level_duration_ms);
        assert!(state.events.contains(&GameEvent::LevelCleared { index: 0 }));
    }

    #[test]
    fn test_clearing_last_level_wins() {
        let mut state = GameState::new(&[corridor(1)], &options(), 0).unwrap();
        run(&mut state, &hold_right(), 200);
        assert_eq!(state.outcome(), Some(GameOutcome::Won));
        assert!(state.levels.is_last_level());
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::GameOver(GameOutcome::Won))
        );
    }

    #[test]
    fn test_enemy_contact_ends_game() {
        let mut config = corridor(3);
        config.enemies.push(EnemySpawn::new(EnemyKind::Yeti, 1, 1));
        let mut state = GameState::new(&[config], &options(), 0).unwrap();
        run(&mut state, &TickInput::default(), 50);
        assert_eq!(state.outcome(), Some(GameOutcome::KilledByEnemy));
    }

    #[test]
    fn test_countdown_expires() {
        let mut state = GameState::new(&[corridor(1)], &options(), 0).unwrap();
        let duration = state.level_duration_ms;
        tick(&mut state, &TickInput::default(), duration);
        assert_eq!(state.phase, GamePhase::Playing);
        let duration = state.level_duration_ms;
        tick(&mut state, &TickInput::default(), duration + 1);
        assert_eq!(state.outcome(), Some(GameOutcome::TimeExpired));
    }

    #[test]
    fn test_ticks_after_game_over_do_nothing() {
        let mut state = GameState::new(&[corridor(1)], &options(), 0).unwrap();
        state.finish(GameOutcome::KilledByEnemy);
        let before = state.player.bounds;
        tick(&mut state, &hold_right(), 16);
        assert_eq!(state.player.bounds, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_determinism() {
        let mut config = corridor(1);
        config.layout = vec![
            vec![1, 1, 1, 1, 1],
            vec![1, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 1],
            vec![1, 1, 1, 1, 1],
        ];
        config.enemies.push(EnemySpawn::new(EnemyKind::Guard, 3, 2));
        let options = GameOptions {
            seed: 99,
            ..options()
        };

        let mut a = GameState::new(&[config.clone()], &options, 0).unwrap();
        let mut b = GameState::new(&[config], &options, 0).unwrap();
        let inputs = [
            TickInput::default(),
            hold_right(),
            TickInput {
                action: true,
                ..Default::default()
            },
        ];
        for i in 0..300u64 {
            let input = inputs[(i / 20) as usize % inputs.len()];
            tick(&mut a, &input, i * FRAME_MS);
            tick(&mut b, &input, i * FRAME_MS);
            assert_eq!(a.player.bounds, b.player.bounds);
            assert_eq!(a.level().enemies()[0].bounds, b.level().enemies()[0].bounds);
            assert_eq!(a.phase, b.phase);
        }
    }
}
