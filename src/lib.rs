//! Astro Shooter - A vertical arcade space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, levels)
//! - `renderer`: Canvas 2D render adapter
//! - `platform`: Keyboard input and asset loading
//! - `settings`: Session configuration

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::AssetError;
pub use settings::{Settings, UpdateCadence};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per simulated second
    pub const TICKS_PER_SECOND: u64 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Horizontal step per tick while a direction key is held
    pub const PLAYER_STEP: f32 = 5.0;
    /// Distance from the bottom edge to the player's top when a session begins
    pub const PLAYER_START_OFFSET_Y: f32 = 75.0;
    /// Same distance after a level clear or restart
    pub const PLAYER_RESPAWN_OFFSET_Y: f32 = 50.0;
    pub const STARTING_LIVES: u8 = 3;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 10.0;
    pub const BULLET_HEIGHT: f32 = 20.0;
    pub const BULLET_SPEED: f32 = 6.0;
    /// Bullet speed while the power-up boost is active
    pub const BOOSTED_BULLET_SPEED: f32 = BULLET_SPEED * 2.0;
    pub const BULLET_COLOR: &str = "#0f0";

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;
    pub const ENEMY_BASE_SPEED: f32 = 2.0;
    /// Added to the base speed on every level clear
    pub const ENEMY_SPEED_STEP: f32 = 0.5;
    /// Per-level speed bonus applied at spawn time
    pub const ENEMY_LEVEL_BONUS: f32 = 0.5;
    /// Ticks between enemy spawns on level 1
    pub const ENEMY_SPAWN_RATE: f32 = 100.0;
    /// Spawn-rate multiplier applied on every level clear
    pub const SPAWN_RATE_DECAY: f32 = 0.9;
    /// Fraction of the spawn interval that must elapse with no enemies alive
    pub const LEVEL_CLEAR_FRACTION: f32 = 0.8;

    /// Power-ups
    pub const POWER_UP_WIDTH: f32 = 30.0;
    pub const POWER_UP_HEIGHT: f32 = 30.0;
    pub const POWER_UP_FALL_SPEED: f32 = 1.0;
    /// Ticks the power-up counter must exceed before drops can happen
    pub const POWER_UP_DORMANCY: u32 = 400;
    /// Per-tick drop chance once dormancy has elapsed
    pub const POWER_UP_CHANCE: f64 = 0.02;
    /// Bullet boost duration (5 seconds)
    pub const BOOST_DURATION_TICKS: u64 = 5 * TICKS_PER_SECOND;
}
