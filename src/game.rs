//! Game lifecycle and fixed-step scheduling
//!
//! `Game` wires an injected clock, settings and level configs to the
//! simulation. Shells feed keys in, call [`Game::pump`] once per frame and
//! draw with [`Game::render`].

use crate::consts::*;
use crate::input::{InputState, Key};
use crate::levels::builtin_levels;
use crate::render::{AsciiCanvas, Canvas, SpriteId};
use crate::settings::Settings;
use crate::sim::clock::Clock;
use crate::sim::error::LevelError;
use crate::sim::level::LevelConfig;
use crate::sim::state::{GameEvent, GameOutcome, GameState};
use crate::sim::tick::{TickInput, tick};

pub struct Game {
    settings: Settings,
    clock: Box<dyn Clock>,
    configs: Vec<LevelConfig>,
    state: GameState,
    input: InputState,
    /// Clock time not yet consumed by ticks
    accumulator_ms: u64,
    last_pump_ms: u64,
}

impl Game {
    /// New game over the built-in levels
    pub fn new(settings: Settings, clock: Box<dyn Clock>) -> Result<Self, LevelError> {
        Self::with_levels(settings, clock, builtin_levels())
    }

    /// New game over custom levels, played in order
    pub fn with_levels(
        settings: Settings,
        clock: Box<dyn Clock>,
        configs: Vec<LevelConfig>,
    ) -> Result<Self, LevelError> {
        let now = clock.now_ms();
        let state = Self::build_state(&settings, &configs, now)?;
        Ok(Self {
            settings,
            clock,
            configs,
            state,
            input: InputState::new(),
            accumulator_ms: 0,
            last_pump_ms: now,
        })
    }

    fn build_state(
        settings: &Settings,
        configs: &[LevelConfig],
        now_ms: u64,
    ) -> Result<GameState, LevelError> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!(
            "Starting game: difficulty {}, seed {}",
            settings.difficulty.as_str(),
            seed
        );
        GameState::new(configs, &settings.game_options(seed), now_ms)
    }

    /// Throw away the current run and start again from the first level
    pub fn start_new_game(&mut self) -> Result<(), LevelError> {
        let now = self.clock.now_ms();
        self.state = Self::build_state(&self.settings, &self.configs, now)?;
        self.input.clear();
        self.accumulator_ms = 0;
        self.last_pump_ms = now;
        Ok(())
    }

    pub fn key_down(&mut self, key: Key) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Run exactly one tick at the current clock time
    pub fn tick(&mut self, input: &TickInput) {
        tick(&mut self.state, input, self.clock.now_ms());
    }

    /// Run every tick that has come due since the last pump. Returns the
    /// number of ticks run.
    pub fn pump(&mut self) -> u32 {
        let now = self.clock.now_ms();
        let elapsed = now.saturating_sub(self.last_pump_ms).min(MAX_FRAME_MS);
        self.last_pump_ms = now;
        self.accumulator_ms += elapsed;

        let step = self.settings.tick_ms();
        let mut substeps = 0;
        while self.accumulator_ms >= step && substeps < MAX_SUBSTEPS {
            if self.state.is_over() {
                self.accumulator_ms = 0;
                break;
            }
            self.accumulator_ms -= step;
            let input = self.input.poll();
            // Each tick sees the time it was due at
            tick(&mut self.state, &input, now.saturating_sub(self.accumulator_ms));
            substeps += 1;
        }
        substeps
    }

    /// Draw the level, then the player on top
    pub fn render(&self, canvas: &mut impl Canvas) {
        self.state.level().render(canvas);
        canvas.draw_sprite(SpriteId::Player, self.state.player.bounds);
    }

    /// Current frame as text, one character per cell
    pub fn render_ascii(&self) -> AsciiCanvas {
        let grid = self.state.level().grid();
        let mut canvas = AsciiCanvas::new(grid.cols(), grid.rows(), grid.cell_size());
        self.render(&mut canvas);
        canvas
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn remaining_time_ms(&self) -> u64 {
        self.state.remaining_time_ms(self.clock.now_ms())
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn game_over_message(&self) -> Option<String> {
        self.state.game_over_message()
    }

    pub fn current_level_index(&self) -> usize {
        self.state.levels.current_index()
    }

    pub fn level_count(&self) -> usize {
        self.state.levels.len()
    }

    /// Events since the previous drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
