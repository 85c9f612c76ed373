//! Ordered level sequence with a forward-only cursor

use super::error::LevelError;
use super::level::Level;

#[derive(Debug, Clone)]
pub struct LevelManager {
    levels: Vec<Level>,
    current: usize,
}

impl LevelManager {
    /// Needs at least one level, so there is always a current one
    pub fn new(levels: Vec<Level>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::NoLevels);
        }
        Ok(Self { levels, current: 0 })
    }

    pub fn current(&self) -> &Level {
        &self.levels[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Level {
        &mut self.levels[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn is_last_level(&self) -> bool {
        self.current + 1 == self.levels.len()
    }

    /// Advance unless already on the last level
    pub fn next_level(&mut self) {
        if !self.is_last_level() {
            self.current += 1;
        }
    }
}
