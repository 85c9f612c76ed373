//! Keyboard state to per-tick input
//!
//! Movement keys are level-triggered: they apply every tick while held.
//! The action key is edge-triggered: one press yields one action, however
//! long it is held.

use crate::sim::tick::TickInput;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Action,
}

impl Key {
    /// WASD plus space, for text-driven shells
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Key::Up),
            's' => Some(Key::Down),
            'a' => Some(Key::Left),
            'd' => Some(Key::Right),
            ' ' => Some(Key::Action),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    action_held: bool,
    /// Pressed and not yet consumed by a tick
    action_latched: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Up => self.up = true,
            Key::Down => self.down = true,
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Action => {
                // Key repeat must not re-fire the action
                if !self.action_held {
                    self.action_latched = true;
                }
                self.action_held = true;
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Up => self.up = false,
            Key::Down => self.down = false,
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Action => {
                self.action_held = false;
                self.action_latched = false;
            }
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Action => self.action_held,
        }
    }

    /// Release everything, e.g. when focus is lost or a new game starts
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for the next tick; consumes a pending action press
    pub fn poll(&mut self) -> TickInput {
        let input = TickInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            action: self.action_latched,
        };
        self.action_latched = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geom::Direction;

    #[test]
    fn test_action_fires_once_per_press() {
        let mut input = InputState::new();
        input.key_down(Key::Action);
        assert!(input.poll().action);
        assert!(!input.poll().action);

        // Auto-repeat while held
        input.key_down(Key::Action);
        assert!(!input.poll().action);

        input.key_up(Key::Action);
        input.key_down(Key::Action);
        assert!(input.poll().action);
    }

    #[test]
    fn test_release_before_poll_drops_action() {
        let mut input = InputState::new();
        input.key_down(Key::Action);
        input.key_up(Key::Action);
        assert!(!input.poll().action);
    }

    #[test]
    fn test_movement_is_level_triggered() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_down(Key::Down);
        for _ in 0..3 {
            assert_eq!(input.poll().held_direction(), Some(Direction::Down));
        }
        input.key_up(Key::Down);
        assert_eq!(input.poll().held_direction(), Some(Direction::Left));
        assert!(input.is_held(Key::Left));

        input.clear();
        assert_eq!(input.poll(), TickInput::default());
    }

    #[test]
    fn test_key_from_char() {
        assert_eq!(Key::from_char('W'), Some(Key::Up));
        assert_eq!(Key::from_char('d'), Some(Key::Right));
        assert_eq!(Key::from_char(' '), Some(Key::Action));
        assert_eq!(Key::from_char('q'), None);
    }
}
