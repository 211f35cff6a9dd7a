//! Session configuration
//!
//! Supplied by the host as JSON: the canvas `data-settings` attribute on the
//! web, the `ASTRO_SHOOTER_SETTINGS` environment variable natively. Nothing is
//! written back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// When enemies, power-ups and collisions are processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpdateCadence {
    /// Every tick, independent of spawning
    #[default]
    EveryTick,
    /// Only on ticks that spawn an enemy (classic arcade behaviour)
    SpawnTickOnly,
}

impl UpdateCadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateCadence::EveryTick => "every_tick",
            UpdateCadence::SpawnTickOnly => "spawn_tick_only",
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    pub update_cadence: UpdateCadence,
    /// Return to level 1 on restart instead of keeping the reached difficulty
    pub reset_level_on_restart: bool,
    /// Drop power-ups that fall past the bottom edge
    pub cull_offscreen_power_ups: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            seed: None,
            update_cadence: UpdateCadence::EveryTick,
            reset_level_on_restart: false,
            cull_offscreen_power_ups: true,
        }
    }
}

impl Settings {
    /// Environment variable read by the native build
    pub const ENV_VAR: &'static str = "ASTRO_SHOOTER_SETTINGS";
    /// Canvas attribute read by the web build
    pub const CANVAS_ATTRIBUTE: &'static str = "data-settings";

    pub fn playfield(&self) -> Vec2 {
        Vec2::new(self.playfield_width, self.playfield_height)
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Parse optional JSON, falling back to defaults with a warning
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(str::trim).filter(|j| !j.is_empty()) {
            Some(json) => match Self::from_json(json) {
                Ok(settings) => {
                    log::info!(
                        "Loaded settings: {}x{} playfield, {} cadence",
                        settings.playfield_width,
                        settings.playfield_height,
                        settings.update_cadence.as_str()
                    );
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring invalid settings ({}), using defaults", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Replace unusable playfield dimensions with the defaults
    fn sanitize(&mut self) {
        if !(self.playfield_width.is_finite() && self.playfield_width > 0.0) {
            log::warn!("Invalid playfield width {}, using default", self.playfield_width);
            self.playfield_width = PLAYFIELD_WIDTH;
        }
        if !(self.playfield_height.is_finite() && self.playfield_height > 0.0) {
            log::warn!("Invalid playfield height {}, using default", self.playfield_height);
            self.playfield_height = PLAYFIELD_HEIGHT;
        }
    }

    /// Load settings from the canvas element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::Element) -> Self {
        let json = canvas.get_attribute(Self::CANVAS_ATTRIBUTE);
        Self::from_json_or_default(json.as_deref())
    }

    /// Load settings from the environment (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let json = std::env::var(Self::ENV_VAR).ok();
        Self::from_json_or_default(json.as_deref())
    }
}
