//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call
//! - Seeded RNG owned by the session
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Rect, collides, overlaps};
pub use level::{is_level_cleared, next_level, restart};
pub use spawner::Spawner;
pub use state::{
    Bullet, Enemy, EnemyKind, EnemyProfile, Entity, GameEvent, GamePhase, Player, PowerUp,
    Renderable, Session, Snapshot, Visual,
};
pub use tick::{TickInput, tick};
