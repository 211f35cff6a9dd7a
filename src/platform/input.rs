//! Keyboard state
//!
//! The host updates key state from DOM events at any time; the game loop
//! polls it once per tick through [`KeyState::take_input`]. Movement is
//! level-triggered, fire and restart are edge-triggered.

use std::collections::HashMap;

use crate::sim::TickInput;

pub const LEFT_KEYS: [&str; 2] = ["ArrowLeft", "KeyA"];
pub const RIGHT_KEYS: [&str; 2] = ["ArrowRight", "KeyD"];
pub const FIRE_KEY: &str = "Space";
pub const RESTART_KEY: &str = "KeyR";

/// Pressed state by `KeyboardEvent.code`, plus latched one-shot actions
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: HashMap<String, bool>,
    fire_pending: bool,
    restart_pending: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat events keep the key held but never
    /// fire again.
    pub fn key_down(&mut self, code: &str, repeat: bool) {
        self.pressed.insert(code.to_string(), true);
        if repeat {
            return;
        }
        match code {
            FIRE_KEY => self.fire_pending = true,
            RESTART_KEY => self.restart_pending = true,
            _ => {}
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.pressed.insert(code.to_string(), false);
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.get(code).copied().unwrap_or(false)
    }

    fn any_pressed(&self, codes: &[&str]) -> bool {
        codes.iter().any(|code| self.is_pressed(code))
    }

    /// Forget everything (window lost focus, key-ups will never arrive)
    pub fn release_all(&mut self) {
        self.pressed.clear();
        self.fire_pending = false;
        self.restart_pending = false;
    }

    /// Input for the next tick; consumes pending one-shot actions
    pub fn take_input(&mut self) -> TickInput {
        TickInput {
            left: self.any_pressed(&LEFT_KEYS),
            right: self.any_pressed(&RIGHT_KEYS),
            fire: std::mem::take(&mut self.fire_pending),
            restart: std::mem::take(&mut self.restart_pending),
        }
    }
}
