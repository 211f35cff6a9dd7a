//! Enemy and power-up spawn policy
//!
//! Two independent tick counters drive spawning. Enemies arrive on a fixed
//! cadence set by the level's spawn rate; power-ups stay dormant for a while
//! and then drop with a small chance per tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, EnemyKind, PowerUp};
use crate::consts::*;

/// Spawn cadence counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawner {
    /// Ticks since the last enemy spawn
    pub enemy_counter: u32,
    /// Ticks since the last power-up drop
    pub power_up_counter: u32,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.enemy_counter = 0;
        self.power_up_counter = 0;
    }

    /// Count one tick toward the next enemy. Once the counter exceeds
    /// `spawn_rate` a random enemy is created at the top edge and the counter
    /// starts over.
    pub fn advance_enemy<R: Rng>(
        &mut self,
        spawn_rate: f32,
        rng: &mut R,
        playfield_width: f32,
        level_speed: f32,
    ) -> Option<Enemy> {
        self.enemy_counter += 1;
        if self.enemy_counter as f32 > spawn_rate {
            self.enemy_counter = 0;
            Some(random_enemy(rng, playfield_width, level_speed))
        } else {
            None
        }
    }

    /// Count one tick toward the next power-up drop
    pub fn advance_power_up<R: Rng>(
        &mut self,
        rng: &mut R,
        playfield_width: f32,
    ) -> Option<PowerUp> {
        self.power_up_counter += 1;
        if self.power_up_counter > POWER_UP_DORMANCY && rng.random_bool(POWER_UP_CHANCE) {
            self.power_up_counter = 0;
            Some(random_power_up(rng, playfield_width))
        } else {
            None
        }
    }

    /// True once the enemy counter has covered `fraction` of the spawn interval
    pub fn enemy_counter_past(&self, spawn_rate: f32, fraction: f32) -> bool {
        self.enemy_counter as f32 > spawn_rate * fraction
    }
}

/// Uniformly random kind at a uniformly random x along the top edge
pub fn random_enemy<R: Rng>(rng: &mut R, playfield_width: f32, level_speed: f32) -> Enemy {
    let x = rng.random::<f32>() * (playfield_width - ENEMY_WIDTH).max(0.0);
    let kind = EnemyKind::ALL[rng.random_range(0..EnemyKind::ALL.len())];
    Enemy::new(kind, Vec2::new(x, 0.0), level_speed)
}

pub fn random_power_up<R: Rng>(rng: &mut R, playfield_width: f32) -> PowerUp {
    let x = rng.random::<f32>() * (playfield_width - POWER_UP_WIDTH).max(0.0);
    PowerUp::new(Vec2::new(x, 0.0))
}
