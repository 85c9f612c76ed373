//! Game settings and tunables
//!
//! Persisted as JSON next to the binary; unreadable files fall back to
//! defaults.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::level::LevelOptions;
use crate::sim::state::GameOptions;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Relaxed,
    Normal,
    Frantic,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Relaxed => "Relaxed",
            Difficulty::Normal => "Normal",
            Difficulty::Frantic => "Frantic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(Difficulty::Relaxed),
            "normal" | "medium" => Some(Difficulty::Normal),
            "frantic" | "hard" => Some(Difficulty::Frantic),
            _ => None,
        }
    }

    /// Player pixels per tick; faster players lay ice further ahead
    pub fn player_speed(&self) -> i32 {
        match self {
            Difficulty::Relaxed => DEFAULT_PLAYER_SPEED,
            Difficulty::Normal => 15,
            Difficulty::Frantic => 25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Fixed RNG seed; `None` picks one per run
    pub seed: Option<u64>,

    // === Timing ===
    pub level_duration_ms: u64,
    /// Simulation ticks per second
    pub tick_hz: u32,
    pub ice_step_interval_ms: u64,

    /// Thermal Titan melt radius in cells
    pub heat_radius: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            seed: None,
            level_duration_ms: LEVEL_DURATION_MS,
            tick_hz: TICK_HZ,
            ice_step_interval_ms: ICE_STEP_INTERVAL_MS,
            heat_radius: DEFAULT_HEAT_RADIUS,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Length of one tick, never zero
    pub fn tick_ms(&self) -> u64 {
        (1000 / u64::from(self.tick_hz.max(1))).max(1)
    }

    /// Simulation options for a run using `seed`
    pub fn game_options(&self, seed: u64) -> GameOptions {
        GameOptions {
            level: LevelOptions {
                play_area: IVec2::new(PLAY_AREA_WIDTH, PLAY_AREA_HEIGHT),
                heat_radius: self.heat_radius,
                ice_step_interval_ms: self.ice_step_interval_ms,
            },
            seed,
            player_speed: self.difficulty.player_speed(),
            level_duration_ms: self.level_duration_ms,
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| serde_json::from_str(&json).map_err(|e| e.to_string()));

        match parsed {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
