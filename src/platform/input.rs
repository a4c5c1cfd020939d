//! Keyboard to [`TickInput`] mapping
//!
//! Hosts forward raw key names (as reported by `KeyboardEvent.key`) and pull
//! one [`TickInput`] per tick. Movement and jump are level-triggered. Fire is
//! edge-triggered: holding the key, including OS key repeat, yields one shot.

use crate::sim::TickInput;

/// Game action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
    Fire,
}

impl Action {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" => Some(Action::Left),
            "ArrowRight" | "d" => Some(Action::Right),
            "ArrowUp" | " " | "w" => Some(Action::Jump),
            "f" | "F" | "Shift" => Some(Action::Fire),
            _ => None,
        }
    }
}

/// Held-key state between ticks
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    left: bool,
    right: bool,
    jump: bool,
    fire_held: bool,
    fire_pending: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the key is bound.
    pub fn key_down(&mut self, key: &str) -> bool {
        let Some(action) = Action::from_key(key) else {
            return false;
        };
        match action {
            Action::Left => self.left = true,
            Action::Right => self.right = true,
            Action::Jump => self.jump = true,
            Action::Fire => {
                if !self.fire_held {
                    self.fire_pending = true;
                }
                self.fire_held = true;
            }
        }
        true
    }

    /// Record a key release. Returns true if the key is bound.
    pub fn key_up(&mut self, key: &str) -> bool {
        let Some(action) = Action::from_key(key) else {
            return false;
        };
        match action {
            Action::Left => self.left = false,
            Action::Right => self.right = false,
            Action::Jump => self.jump = false,
            Action::Fire => self.fire_held = false,
        }
        true
    }

    /// Input for the next tick; consumes a pending shot
    pub fn take_input(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
            fire: self.fire_pending,
        };
        self.fire_pending = false;
        input
    }

    /// Drop a shot requested while the game was not accepting input
    pub fn discard_pending(&mut self) {
        self.fire_pending = false;
    }
}
