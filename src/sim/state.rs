//! Game state and run-level options
//!
//! Everything a tick touches lives here: the player, the level sequence and
//! the per-level countdown.

use serde::{Deserialize, Serialize};

use super::error::LevelError;
use super::fruit::FruitKind;
use super::level::{Level, LevelConfig, LevelOptions};
use super::level_manager::LevelManager;
use super::player::Player;
use crate::consts::*;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every fruit of the last level collected
    Won,
    /// Level countdown reached zero
    TimeExpired,
    /// An enemy touched the player
    KilledByEnemy,
}

impl GameOutcome {
    pub fn message(&self, score: u32) -> String {
        let reason = match self {
            GameOutcome::Won => "You won!",
            GameOutcome::TimeExpired => "You ran out of time!",
            GameOutcome::KilledByEnemy => "You were hit by an enemy!",
        };
        format!("Game Over! {} Your score was: {}", reason, score)
    }
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    GameOver(GameOutcome),
}

/// Things that happened during a tick, for the shell to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    FruitCollected { kind: FruitKind, points: u32 },
    WaveSpawned { kind: FruitKind, count: u32 },
    /// Level `index` was cleared and the next one started
    LevelCleared { index: usize },
    GameOver(GameOutcome),
}

/// Options fixed for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    pub level: LevelOptions,
    pub seed: u64,
    /// Player pixels per tick
    pub player_speed: i32,
    pub level_duration_ms: u64,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            level: LevelOptions::default(),
            seed: 0,
            player_speed: DEFAULT_PLAYER_SPEED,
            level_duration_ms: LEVEL_DURATION_MS,
        }
    }
}

/// Per-level RNG seed derived from the run seed
pub fn level_seed(seed: u64, index: usize) -> u64 {
    (index as u64).wrapping_mul(2654435761).wrapping_add(seed)
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub levels: LevelManager,
    /// Clock time the current level started
    pub level_start_ms: u64,
    pub level_duration_ms: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build every level up front and place the player on the first one
    pub fn new(
        configs: &[LevelConfig],
        options: &GameOptions,
        now_ms: u64,
    ) -> Result<Self, LevelError> {
        let levels = configs
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, config)| {
                Level::new(config, &options.level, level_seed(options.seed, i), now_ms)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let levels = LevelManager::new(levels)?;

        let first = levels.current();
        let player = Player::new(first.player_start(), first.cell_size(), options.player_speed);

        log::info!(
            "New game: {} levels, seed {}, {} ms per level",
            levels.len(),
            options.seed,
            options.level_duration_ms
        );

        Ok(Self {
            seed: options.seed,
            phase: GamePhase::Playing,
            player,
            levels,
            level_start_ms: now_ms,
            level_duration_ms: options.level_duration_ms,
            time_ticks: 0,
            events: Vec::new(),
        })
    }

    pub fn level(&self) -> &Level {
        self.levels.current()
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            GamePhase::GameOver(outcome) => Some(outcome),
            GamePhase::Playing => None,
        }
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.level_start_ms)
    }

    pub fn remaining_time_ms(&self, now_ms: u64) -> u64 {
        self.level_duration_ms.saturating_sub(self.elapsed_ms(now_ms))
    }

    pub fn time_expired(&self, now_ms: u64) -> bool {
        self.elapsed_ms(now_ms) > self.level_duration_ms
    }

    /// Move to the next level, keeping the score
    pub fn advance_level(&mut self, now_ms: u64) {
        let cleared = self.levels.current_index();
        self.levels.next_level();

        let level = self.levels.current();
        let (start, cell_size) = (level.player_start(), level.cell_size());
        self.player.reposition(start, cell_size);
        self.level_start_ms = now_ms;
        self.events.push(GameEvent::LevelCleared { index: cleared });

        log::info!(
            "Level {} cleared with {} points; starting level {} at {}",
            cleared + 1,
            self.player.score,
            self.levels.current_index() + 1,
            start
        );
    }

    pub fn finish(&mut self, outcome: GameOutcome) {
        if self.is_over() {
            return;
        }
        self.phase = GamePhase::GameOver(outcome);
        self.events.push(GameEvent::GameOver(outcome));
        log::info!("{}", outcome.message(self.player.score));
    }

    pub fn game_over_message(&self) -> Option<String> {
        self.outcome().map(|o| o.message(self.player.score))
    }
}
