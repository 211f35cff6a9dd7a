//! Game state and core simulation types
//!
//! Entities are plain records that only know how to move themselves. Every
//! cross-entity effect (hits, pickups, life loss) is resolved by the tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Rect};
use super::spawner::Spawner;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Visual key handed to the render adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visual {
    Player,
    Bullet { color: &'static str },
    Enemy(EnemyKind),
    PowerUp,
}

/// Read-only view of one entity for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Renderable {
    pub bounds: Rect,
    pub visual: Visual,
}

/// Something that advances itself by exactly one tick and can be drawn
pub trait Entity: Aabb {
    /// Self-contained movement for one tick
    fn update(&mut self);

    fn visual(&self) -> Visual;

    fn renderable(&self) -> Renderable {
        Renderable {
            bounds: self.aabb(),
            visual: self.visual(),
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Upward speed given to newly fired bullets
    pub bullet_speed: f32,
    /// Tick at which a power-up boost wears off
    pub boost_expires_at: Option<u64>,
}

impl Player {
    pub fn new(playfield: Vec2) -> Self {
        Self {
            pos: Self::start_position(playfield),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            bullet_speed: BULLET_SPEED,
            boost_expires_at: None,
        }
    }

    /// Where a new session places the ship: horizontally centered, clear of
    /// the bottom edge
    pub fn start_position(playfield: Vec2) -> Vec2 {
        Vec2::new(
            playfield.x / 2.0 - PLAYER_WIDTH / 2.0,
            playfield.y - PLAYER_START_OFFSET_Y,
        )
    }

    /// Where the ship returns after a level clear or restart
    pub fn respawn_position(playfield: Vec2) -> Vec2 {
        Vec2::new(
            playfield.x / 2.0 - PLAYER_WIDTH / 2.0,
            playfield.y - PLAYER_RESPAWN_OFFSET_Y,
        )
    }

    pub fn reset_position(&mut self, playfield: Vec2) {
        self.pos = Self::respawn_position(playfield);
    }

    /// Shift horizontally, staying inside the playfield
    pub fn step(&mut self, dx: f32, playfield_width: f32) {
        let max_x = (playfield_width - self.size.x).max(0.0);
        self.pos.x = (self.pos.x + dx).clamp(0.0, max_x);
    }

    /// Bullet leaving the ship's nose
    pub fn fire(&self) -> Bullet {
        let x = self.pos.x + self.size.x / 2.0 - BULLET_WIDTH / 2.0;
        Bullet::new(Vec2::new(x, self.pos.y), self.bullet_speed)
    }

    /// Start (or extend) the bullet boost
    pub fn apply_boost(&mut self, now: u64) {
        self.bullet_speed = BOOSTED_BULLET_SPEED;
        self.boost_expires_at = Some(now + BOOST_DURATION_TICKS);
    }

    /// Revert to baseline once the boost deadline has been reached.
    /// Returns true if the boost ended on this call.
    pub fn expire_boost(&mut self, now: u64) -> bool {
        match self.boost_expires_at {
            Some(deadline) if now >= deadline => {
                self.clear_boost();
                true
            }
            _ => false,
        }
    }

    pub fn clear_boost(&mut self) {
        self.bullet_speed = BULLET_SPEED;
        self.boost_expires_at = None;
    }

    pub fn is_boosted(&self) -> bool {
        self.boost_expires_at.is_some()
    }

    pub fn renderable(&self) -> Renderable {
        Renderable {
            bounds: self.aabb(),
            visual: Visual::Player,
        }
    }
}

impl Aabb for Player {
    fn aabb(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A player projectile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: &'static str,
    /// Upward speed per tick
    pub speed: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            color: BULLET_COLOR,
            speed,
        }
    }

    /// Passed above the top edge
    pub fn is_offscreen(&self) -> bool {
        self.pos.y < 0.0
    }
}

impl Aabb for Bullet {
    fn aabb(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

impl Entity for Bullet {
    fn update(&mut self) {
        self.pos.y -= self.speed;
    }

    fn visual(&self) -> Visual {
        Visual::Bullet { color: self.color }
    }
}

/// Fixed characteristics shared by every enemy of a kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    /// Added on top of the level speed
    pub speed_offset: f32,
    /// Visual size multiplier, selects the sprite
    pub size: f32,
    pub points: u32,
    pub color: &'static str,
}

/// Enemy movement pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Straight,
    Zigzag,
    Circle,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Straight, EnemyKind::Zigzag, EnemyKind::Circle];

    pub const fn profile(self) -> EnemyProfile {
        match self {
            EnemyKind::Straight => EnemyProfile {
                speed_offset: 0.0,
                size: 1.0,
                points: 10,
                color: "#f00",
            },
            EnemyKind::Zigzag => EnemyProfile {
                speed_offset: 0.0,
                size: 0.8,
                points: 15,
                color: "#0ff",
            },
            EnemyKind::Circle => EnemyProfile {
                speed_offset: 0.0,
                size: 1.2,
                points: 20,
                color: "#ff0",
            },
        }
    }

    /// Advance a position by one tick of this pattern.
    ///
    /// The circle pattern's second vertical nudge reads the already-shifted x,
    /// so the statement order is load-bearing.
    pub fn advance(self, pos: &mut Vec2, speed: f32) {
        match self {
            EnemyKind::Straight => {
                pos.y += speed;
            }
            EnemyKind::Zigzag => {
                pos.y += speed;
                pos.x += (pos.y * 0.05).sin() * 5.0;
            }
            EnemyKind::Circle => {
                pos.y += speed;
                pos.x += (pos.y * 0.05).sin() * 5.0;
                pos.y += (pos.x * 0.05).cos() * 5.0;
            }
        }
    }
}

/// A descending enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward speed per tick
    pub speed: f32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, level_speed: f32) -> Self {
        Self {
            pos,
            size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            speed: level_speed + kind.profile().speed_offset,
            kind,
        }
    }

    pub fn points(&self) -> u32 {
        self.kind.profile().points
    }

    pub fn size_multiplier(&self) -> f32 {
        self.kind.profile().size
    }

    /// Dropped below the bottom edge
    pub fn is_offscreen(&self, playfield_height: f32) -> bool {
        self.pos.y > playfield_height
    }
}

impl Aabb for Enemy {
    fn aabb(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

impl Entity for Enemy {
    fn update(&mut self) {
        self.kind.advance(&mut self.pos, self.speed);
    }

    fn visual(&self) -> Visual {
        Visual::Enemy(self.kind)
    }
}

/// A falling bullet-speed power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: Vec2,
}

impl PowerUp {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(POWER_UP_WIDTH, POWER_UP_HEIGHT),
        }
    }

    pub fn is_offscreen(&self, playfield_height: f32) -> bool {
        self.pos.y > playfield_height
    }
}

impl Aabb for PowerUp {
    fn aabb(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

impl Entity for PowerUp {
    fn update(&mut self) {
        self.pos.y += POWER_UP_FALL_SPEED;
    }

    fn visual(&self) -> Visual {
        Visual::PowerUp
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    EnemySpawned(EnemyKind),
    EnemyDestroyed { kind: EnemyKind, points: u32 },
    PlayerHit { lives_left: u8 },
    PowerUpSpawned,
    PowerUpCollected,
    BoostExpired,
    LevelCleared { new_level: u32 },
    GameOver { score: u32 },
    Restarted,
}

/// Complete state of one play session.
///
/// Passed explicitly to every simulation function; owns its RNG so a seed
/// plus an input sequence fully determines the run.
#[derive(Debug, Clone)]
pub struct Session {
    pub settings: Settings,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    /// Current level (1-based)
    pub level: u32,
    /// Set by the first enemy spawn of the session
    pub level_started: bool,
    /// An enemy has spawned since the current level began
    pub spawned_this_level: bool,
    /// Enemy and power-up spawn counters
    pub spawner: Spawner,
    /// Ticks between enemy spawns, shrinks every level
    pub enemy_spawn_rate: f32,
    /// Enemy speed before the per-level bonus, grows every level
    pub enemy_base_speed: f32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
}

impl Session {
    /// Create a new session with the given settings and RNG seed
    pub fn new(settings: Settings, seed: u64) -> Self {
        let playfield = settings.playfield();
        Self {
            settings,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            level_started: false,
            spawned_this_level: false,
            spawner: Spawner::new(),
            enemy_spawn_rate: ENEMY_SPAWN_RATE,
            enemy_base_speed: ENEMY_BASE_SPEED,
            player: Player::new(playfield),
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn playfield(&self) -> Vec2 {
        self.settings.playfield()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Speed given to enemies spawned right now
    pub fn enemy_speed(&self) -> f32 {
        self.enemy_base_speed + self.level as f32 * ENEMY_LEVEL_BONUS
    }

    /// Read-only view for the render adapter
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            playfield: self.playfield(),
            player: &self.player,
            bullets: &self.bullets,
            enemies: &self.enemies,
            power_ups: &self.power_ups,
            score: self.score,
            lives: self.lives,
            level: self.level,
            game_over: self.is_game_over(),
        }
    }
}

/// Borrowed, read-only state consumed by renderers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub playfield: Vec2,
    pub player: &'a Player,
    pub bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub power_ups: &'a [PowerUp],
    pub score: u32,
    pub lives: u8,
    pub level: u32,
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_profiles() {
        let straight = EnemyKind::Straight.profile();
        assert_eq!(straight.points, 10);
        assert_eq!(straight.size, 1.0);

        let zigzag = EnemyKind::Zigzag.profile();
        assert_eq!(zigzag.points, 15);
        assert_eq!(zigzag.size, 0.8);

        let circle = EnemyKind::Circle.profile();
        assert_eq!(circle.points, 20);
        assert_eq!(circle.size, 1.2);
    }

    #[test]
    fn test_bullet_moves_up() {
        let mut bullet = Bullet::new(Vec2::new(100.0, 300.0), BULLET_SPEED);
        bullet.update();
        assert_eq!(bullet.pos, Vec2::new(100.0, 300.0 - BULLET_SPEED));
        assert!(!bullet.is_offscreen());

        let mut bullet = Bullet::new(Vec2::new(100.0, 3.0), BULLET_SPEED);
        bullet.update();
        assert!(bullet.is_offscreen());
    }

    #[test]
    fn test_straight_enemy_moves_down() {
        let mut enemy = Enemy::new(EnemyKind::Straight, Vec2::new(50.0, 0.0), 2.5);
        enemy.update();
        assert_eq!(enemy.pos, Vec2::new(50.0, 2.5));
    }

    #[test]
    fn test_zigzag_enemy_drifts() {
        let mut enemy = Enemy::new(EnemyKind::Zigzag, Vec2::new(50.0, 0.0), 3.0);
        enemy.update();
        let expected_x = 50.0 + (3.0_f32 * 0.05).sin() * 5.0;
        assert!((enemy.pos.y - 3.0).abs() < 1e-5);
        assert!((enemy.pos.x - expected_x).abs() < 1e-5);
    }

    #[test]
    fn test_circle_enemy_uses_updated_x() {
        let mut enemy = Enemy::new(EnemyKind::Circle, Vec2::new(50.0, 10.0), 3.0);
        enemy.update();

        let y1 = 10.0_f32 + 3.0;
        let x1 = 50.0 + (y1 * 0.05).sin() * 5.0;
        let y2 = y1 + (x1 * 0.05).cos() * 5.0;
        assert!((enemy.pos.x - x1).abs() < 1e-4);
        assert!((enemy.pos.y - y2).abs() < 1e-4);
    }

    #[test]
    fn test_power_up_falls_slowly() {
        let mut power_up = PowerUp::new(Vec2::new(10.0, 0.0));
        power_up.update();
        power_up.update();
        assert_eq!(power_up.pos.y, 2.0);
        assert!(!power_up.is_offscreen(600.0));
    }

    #[test]
    fn test_player_fire_centered() {
        let player = Player::new(Vec2::new(800.0, 600.0));
        let bullet = player.fire();
        assert_eq!(bullet.pos.x, player.pos.x + PLAYER_WIDTH / 2.0 - BULLET_WIDTH / 2.0);
        assert_eq!(bullet.pos.y, player.pos.y);
        assert_eq!(bullet.speed, BULLET_SPEED);
    }

    #[test]
    fn test_player_start_and_respawn_heights() {
        let playfield = Vec2::new(800.0, 600.0);
        let mut player = Player::new(playfield);
        assert_eq!(player.pos, Vec2::new(375.0, 525.0));

        player.pos.x = 10.0;
        player.reset_position(playfield);
        assert_eq!(player.pos, Vec2::new(375.0, 550.0));
    }

    #[test]
    fn test_player_step_clamped() {
        let mut player = Player::new(Vec2::new(800.0, 600.0));
        player.step(-10_000.0, 800.0);
        assert_eq!(player.pos.x, 0.0);
        player.step(10_000.0, 800.0);
        assert_eq!(player.pos.x, 800.0 - PLAYER_WIDTH);
    }

    #[test]
    fn test_boost_expiry() {
        let mut player = Player::new(Vec2::new(800.0, 600.0));
        player.apply_boost(100);
        assert_eq!(player.bullet_speed, BOOSTED_BULLET_SPEED);
        assert!(!player.expire_boost(100 + BOOST_DURATION_TICKS - 1));
        assert!(player.expire_boost(100 + BOOST_DURATION_TICKS));
        assert_eq!(player.bullet_speed, BULLET_SPEED);
        assert!(!player.is_boosted());
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(Settings::default(), 1);
        assert_eq!(session.lives, 3);
        assert_eq!(session.score, 0);
        assert_eq!(session.level, 1);
        assert_eq!(session.phase, GamePhase::Playing);
        assert!(!session.level_started);
        assert_eq!(session.enemy_speed(), ENEMY_BASE_SPEED + ENEMY_LEVEL_BONUS);
    }
}
