//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically, one display
//! refresh at a time.

use super::collision::{collides, first_hit};
use super::level::{award, collect_power_up, is_level_cleared, lose_life, next_level, restart};
use super::state::{Entity, GameEvent, GamePhase, Session};
use crate::consts::*;
use crate::settings::UpdateCadence;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left while held
    pub left: bool,
    /// Move right while held
    pub right: bool,
    /// Fire one bullet (one-shot, set once per key press)
    pub fire: bool,
    /// Restart the run (only honoured during GameOver)
    pub restart: bool,
}

/// Outcome of resolving one enemy's collisions
enum Resolution {
    Alive,
    Removed,
    GameOver,
}

/// Advance the session by one tick
pub fn tick(session: &mut Session, input: &TickInput) {
    session.events.clear();

    if session.phase == GamePhase::GameOver {
        if input.restart {
            restart(session);
        }
        return;
    }

    session.time_ticks += 1;

    if session.player.expire_boost(session.time_ticks) {
        session.events.push(GameEvent::BoostExpired);
    }

    apply_input(session, input);
    update_bullets(session);

    let spawned = spawn_enemy(session);

    match session.settings.update_cadence {
        UpdateCadence::EveryTick => {
            update_power_ups(session);
            spawn_power_up(session);
            update_enemies(session);
        }
        UpdateCadence::SpawnTickOnly => {
            if spawned {
                spawn_tick_enemy_pass(session);
            }
        }
    }

    if session.phase == GamePhase::Playing && is_level_cleared(session) {
        next_level(session);
    }
}

fn apply_input(session: &mut Session, input: &TickInput) {
    let width = session.settings.playfield_width;
    if input.left {
        session.player.step(-PLAYER_STEP, width);
    }
    if input.right {
        session.player.step(PLAYER_STEP, width);
    }
    if input.fire {
        let bullet = session.player.fire();
        session.bullets.push(bullet);
    }
}

fn update_bullets(session: &mut Session) {
    session.bullets.retain_mut(|bullet| {
        bullet.update();
        !bullet.is_offscreen()
    });
}

/// Returns true if an enemy was spawned this tick
fn spawn_enemy(session: &mut Session) -> bool {
    let speed = session.enemy_speed();
    let width = session.settings.playfield_width;
    let Some(enemy) = session.spawner.advance_enemy(
        session.enemy_spawn_rate,
        &mut session.rng,
        width,
        speed,
    ) else {
        return false;
    };

    log::debug!("Spawned {:?} at x={:.0}", enemy.kind, enemy.pos.x);
    session.events.push(GameEvent::EnemySpawned(enemy.kind));
    session.enemies.push(enemy);
    session.level_started = true;
    session.spawned_this_level = true;
    true
}

fn spawn_power_up(session: &mut Session) {
    let width = session.settings.playfield_width;
    if let Some(power_up) = session.spawner.advance_power_up(&mut session.rng, width) {
        log::debug!("Power-up dropped at x={:.0}", power_up.pos.x);
        session.power_ups.push(power_up);
        session.events.push(GameEvent::PowerUpSpawned);
    }
}

/// Move power-ups, consume any touching the player
fn update_power_ups(session: &mut Session) {
    let player = &session.player;
    let cull = session.settings.cull_offscreen_power_ups;
    let floor = session.settings.playfield_height;
    let mut collected = 0;

    session.power_ups.retain_mut(|power_up| {
        power_up.update();
        if collides(player, &*power_up) {
            collected += 1;
            false
        } else {
            !(cull && power_up.is_offscreen(floor))
        }
    });

    for _ in 0..collected {
        collect_power_up(session);
    }
}

/// Move every enemy and resolve its contacts
fn update_enemies(session: &mut Session) {
    let mut i = 0;
    while i < session.enemies.len() {
        session.enemies[i].update();
        match resolve_enemy(session, i) {
            Resolution::Alive => i += 1,
            Resolution::Removed => {}
            Resolution::GameOver => return,
        }
    }
}

/// Classic cadence: the whole enemy pass runs only on spawn ticks, and the
/// power-up update and drop roll happen once per enemy visited.
fn spawn_tick_enemy_pass(session: &mut Session) {
    let mut i = 0;
    while i < session.enemies.len() {
        session.enemies[i].update();
        update_power_ups(session);
        spawn_power_up(session);
        match resolve_enemy(session, i) {
            Resolution::Alive => i += 1,
            Resolution::Removed => {}
            Resolution::GameOver => return,
        }
    }
}

/// Bullet hits, player contact and off-screen removal for enemy `i`
fn resolve_enemy(session: &mut Session, i: usize) -> Resolution {
    if let Some(hit) = first_hit(&session.bullets, &session.enemies[i]) {
        session.bullets.remove(hit);
        let enemy = session.enemies.remove(i);
        award(session, &enemy);
        return Resolution::Removed;
    }

    if collides(&session.player, &session.enemies[i]) {
        if lose_life(session) {
            // The run is over; the enemy stays where it hit
            return Resolution::GameOver;
        }
        session.enemies.remove(i);
        return Resolution::Removed;
    }

    if session.enemies[i].is_offscreen(session.settings.playfield_height) {
        session.enemies.remove(i);
        return Resolution::Removed;
    }

    Resolution::Alive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{Bullet, Enemy, EnemyKind, PowerUp};
    use glam::Vec2;
    use proptest::prelude::*;

    fn session() -> Session {
        Session::new(Settings::default(), 12345)
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_movement_and_clamp() {
        let mut s = session();
        s.enemy_spawn_rate = 1.0e9;
        let start_x = s.player.pos.x;
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut s, &left);
        assert_eq!(s.player.pos.x, start_x - PLAYER_STEP);

        for _ in 0..500 {
            tick(&mut s, &left);
        }
        assert_eq!(s.player.pos.x, 0.0);
    }

    #[test]
    fn test_fire_spawns_one_bullet() {
        let mut s = session();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut s, &fire);
        assert_eq!(s.bullets.len(), 1);
        // Bullet has already moved once this tick
        assert_eq!(s.bullets[0].pos.y, s.player.pos.y - BULLET_SPEED);

        tick(&mut s, &idle());
        assert_eq!(s.bullets.len(), 1, "no fire input, no new bullet");
    }

    #[test]
    fn test_bullets_removed_at_top() {
        let mut s = session();
        s.bullets.push(Bullet::new(Vec2::new(100.0, 4.0), BULLET_SPEED));
        tick(&mut s, &idle());
        assert!(s.bullets.is_empty());
    }

    #[test]
    fn test_bullet_hits_enemy() {
        let mut s = session();
        // After one tick: bullet (45,80,10,20), enemy (40,80,40,40)
        s.bullets.push(Bullet::new(Vec2::new(45.0, 80.0 + BULLET_SPEED), BULLET_SPEED));
        s.enemies.push(Enemy::new(EnemyKind::Straight, Vec2::new(40.0, 80.0), 0.0));

        tick(&mut s, &idle());

        assert!(s.enemies.is_empty());
        assert!(s.bullets.is_empty());
        assert_eq!(s.score, 10);
        assert!(s.events.contains(&GameEvent::EnemyDestroyed {
            kind: EnemyKind::Straight,
            points: 10
        }));
    }

    #[test]
    fn test_one_bullet_per_enemy() {
        let mut s = session();
        s.bullets.push(Bullet::new(Vec2::new(45.0, 86.0), BULLET_SPEED));
        s.bullets.push(Bullet::new(Vec2::new(50.0, 90.0), BULLET_SPEED));
        s.enemies.push(Enemy::new(EnemyKind::Straight, Vec2::new(40.0, 80.0), 0.0));

        tick(&mut s, &idle());

        assert!(s.enemies.is_empty());
        assert_eq!(s.bullets.len(), 1);
        assert_eq!(s.score, 10);
    }

    #[test]
    fn test_player_enemy_collision_costs_life() {
        let mut s = session();
        let pos = s.player.pos;
        s.enemies.push(Enemy::new(EnemyKind::Straight, pos, 0.0));

        tick(&mut s, &idle());

        assert_eq!(s.lives, 2);
        assert!(s.enemies.is_empty());
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut s = session();
        s.lives = 1;
        let pos = s.player.pos;
        s.enemies.push(Enemy::new(EnemyKind::Straight, pos, 0.0));
        s.enemies.push(Enemy::new(EnemyKind::Straight, pos, 0.0));

        tick(&mut s, &idle());

        assert_eq!(s.lives, 0);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert!(s.events.contains(&GameEvent::GameOver { score: 0 }));

        // Frozen while game over
        let ticks = s.time_ticks;
        tick(&mut s, &idle());
        assert_eq!(s.time_ticks, ticks);
        assert_eq!(s.lives, 0);
    }

    #[test]
    fn test_restart_only_in_game_over() {
        let mut s = session();
        s.score = 50;
        let restart_input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut s, &restart_input);
        assert_eq!(s.score, 50, "restart ignored while playing");

        s.lives = 0;
        s.phase = GamePhase::GameOver;
        s.bullets.push(Bullet::new(Vec2::new(1.0, 100.0), BULLET_SPEED));
        s.enemies.push(Enemy::new(EnemyKind::Zigzag, Vec2::ZERO, 2.0));
        s.power_ups.push(PowerUp::new(Vec2::ZERO));
        s.player.pos.x = 10.0;

        tick(&mut s, &restart_input);

        assert_eq!(s.lives, 3);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 0);
        assert!(s.bullets.is_empty());
        assert!(s.enemies.is_empty());
        assert!(s.power_ups.is_empty());
        assert_eq!(s.player.pos, crate::sim::Player::respawn_position(s.playfield()));
    }

    #[test]
    fn test_first_spawn_arms_level() {
        let mut s = session();
        for _ in 0..100 {
            tick(&mut s, &idle());
        }
        assert!(!s.level_started);
        assert!(s.enemies.is_empty());

        tick(&mut s, &idle());
        assert!(s.level_started);
        assert!(s.spawned_this_level);
        assert_eq!(s.enemies.len(), 1);
        assert_eq!(s.spawner.enemy_counter, 0);
    }

    #[test]
    fn test_level_clear_advances() {
        let mut s = session();
        s.level_started = true;
        s.spawned_this_level = true;
        s.spawner.enemy_counter = 85;

        tick(&mut s, &idle());

        assert_eq!(s.level, 2);
        assert!((s.enemy_spawn_rate - 90.0).abs() < 1e-4);
        assert_eq!(s.enemy_base_speed, ENEMY_BASE_SPEED + ENEMY_SPEED_STEP);
        assert_eq!(s.spawner.enemy_counter, 86, "spawn cadence keeps running");
        assert!(!s.spawned_this_level);

        // No cascade on the following tick
        tick(&mut s, &idle());
        assert_eq!(s.level, 2);
    }

    #[test]
    fn test_next_clear_waits_for_a_spawn() {
        let mut s = session();
        s.level_started = true;
        s.spawned_this_level = true;
        s.spawner.enemy_counter = 85;
        tick(&mut s, &idle());
        assert_eq!(s.level, 2);

        // The cadence continues into the new level and delivers an enemy
        for _ in 0..10 {
            if !s.enemies.is_empty() {
                break;
            }
            tick(&mut s, &idle());
            assert_eq!(s.level, 2, "cleared again before anything spawned");
        }
        assert_eq!(s.enemies.len(), 1);
        assert!(s.spawned_this_level);

        // Once that enemy is gone the level can clear normally
        s.enemies.clear();
        for _ in 0..70 {
            tick(&mut s, &idle());
            assert_eq!(s.level, 2);
        }
        for _ in 0..5 {
            tick(&mut s, &idle());
        }
        assert_eq!(s.level, 3);
        assert!(s.enemies.is_empty());
    }

    #[test]
    fn test_idle_after_restart_keeps_level() {
        let mut s = session();
        while !s.level_started {
            tick(&mut s, &idle());
        }
        s.lives = 0;
        s.phase = GamePhase::GameOver;

        let restart_input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut s, &restart_input);
        assert_eq!(s.phase, GamePhase::Playing);

        for _ in 0..100 {
            tick(&mut s, &idle());
            assert_eq!(s.level, 1);
        }
        assert!(s.enemies.is_empty());

        tick(&mut s, &idle());
        assert_eq!(s.enemies.len(), 1, "cadence restarts from zero");
        assert_eq!(s.level, 1);
    }

    #[test]
    fn test_power_up_boost_lifecycle() {
        let mut s = session();
        s.enemy_spawn_rate = 1.0e9;
        let pos = s.player.pos;
        s.power_ups.push(PowerUp::new(pos));

        tick(&mut s, &idle());
        let picked_at = s.time_ticks;
        assert!(s.power_ups.is_empty());
        assert_eq!(s.player.bullet_speed, BOOSTED_BULLET_SPEED);
        assert!(s.events.contains(&GameEvent::PowerUpCollected));

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut s, &fire);
        assert_eq!(s.bullets.last().map(|b| b.speed), Some(BOOSTED_BULLET_SPEED));

        while s.time_ticks < picked_at + BOOST_DURATION_TICKS - 1 {
            tick(&mut s, &idle());
        }
        assert_eq!(s.player.bullet_speed, BOOSTED_BULLET_SPEED);

        tick(&mut s, &idle());
        assert_eq!(s.time_ticks, picked_at + BOOST_DURATION_TICKS);
        assert_eq!(s.player.bullet_speed, BULLET_SPEED);
        assert!(s.events.contains(&GameEvent::BoostExpired));
    }

    #[test]
    fn test_stacked_pickups_extend_boost() {
        let mut s = session();
        s.enemy_spawn_rate = 1.0e9;
        s.player.apply_boost(0);
        s.time_ticks = 200;
        let pos = s.player.pos;
        s.power_ups.push(PowerUp::new(pos));

        tick(&mut s, &idle());
        assert_eq!(s.player.boost_expires_at, Some(201 + BOOST_DURATION_TICKS));

        // The first pickup's deadline passes without reverting
        while s.time_ticks < 400 {
            tick(&mut s, &idle());
        }
        assert_eq!(s.player.bullet_speed, BOOSTED_BULLET_SPEED);
    }

    #[test]
    fn test_offscreen_power_ups_culled() {
        let mut s = session();
        s.power_ups.push(PowerUp::new(Vec2::new(0.0, 600.0)));
        tick(&mut s, &idle());
        assert!(s.power_ups.is_empty());

        let settings = Settings {
            cull_offscreen_power_ups: false,
            ..Settings::default()
        };
        let mut s = Session::new(settings, 1);
        s.power_ups.push(PowerUp::new(Vec2::new(0.0, 600.0)));
        tick(&mut s, &idle());
        assert_eq!(s.power_ups.len(), 1);
    }

    #[test]
    fn test_offscreen_enemies_removed() {
        let mut s = session();
        s.enemies.push(Enemy::new(EnemyKind::Straight, Vec2::new(0.0, 599.0), 2.0));
        tick(&mut s, &idle());
        assert!(s.enemies.is_empty());
        assert_eq!(s.lives, 3);
    }

    #[test]
    fn test_spawn_tick_only_cadence() {
        let settings = Settings {
            update_cadence: UpdateCadence::SpawnTickOnly,
            ..Settings::default()
        };
        let mut s = Session::new(settings, 5);
        s.enemies.push(Enemy::new(EnemyKind::Straight, Vec2::new(0.0, 100.0), 2.0));

        tick(&mut s, &idle());
        assert_eq!(s.enemies[0].pos.y, 100.0, "no spawn, no movement");

        s.spawner.enemy_counter = 100;
        tick(&mut s, &idle());
        assert_eq!(s.enemies.len(), 2);
        assert_eq!(s.enemies[0].pos.y, 102.0);

        let mut every = session();
        every.enemies.push(Enemy::new(EnemyKind::Straight, Vec2::new(0.0, 100.0), 2.0));
        tick(&mut every, &idle());
        assert_eq!(every.enemies[0].pos.y, 102.0);
    }

    #[test]
    fn test_spawn_tick_only_power_ups_per_enemy() {
        let settings = Settings {
            update_cadence: UpdateCadence::SpawnTickOnly,
            ..Settings::default()
        };
        let mut s = Session::new(settings, 5);
        s.enemies.push(Enemy::new(EnemyKind::Straight, Vec2::new(0.0, 100.0), 2.0));
        s.power_ups.push(PowerUp::new(Vec2::new(700.0, 100.0)));

        tick(&mut s, &idle());
        assert_eq!(s.power_ups[0].pos.y, 100.0, "no spawn, power-ups hold still");
        assert_eq!(s.spawner.power_up_counter, 0);

        s.spawner.enemy_counter = 100;
        tick(&mut s, &idle());
        assert_eq!(s.enemies.len(), 2);
        // One power-up step and one drop roll per enemy visited
        assert_eq!(s.power_ups[0].pos.y, 100.0 + 2.0 * POWER_UP_FALL_SPEED);
        assert_eq!(s.spawner.power_up_counter, s.enemies.len() as u32);
    }

    #[test]
    fn test_spawn_tick_only_defers_collisions() {
        let settings = Settings {
            update_cadence: UpdateCadence::SpawnTickOnly,
            ..Settings::default()
        };
        let mut s = Session::new(settings, 5);
        let player_pos = s.player.pos;
        s.bullets.push(Bullet::new(Vec2::new(45.0, 80.0 + BULLET_SPEED), BULLET_SPEED));
        s.enemies.push(Enemy::new(EnemyKind::Straight, Vec2::new(40.0, 80.0), 0.0));
        s.enemies.push(Enemy::new(EnemyKind::Straight, player_pos, 0.0));

        tick(&mut s, &idle());
        assert_eq!(s.enemies.len(), 2, "contacts wait for a spawn tick");
        assert_eq!(s.bullets.len(), 1);
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, 3);

        s.spawner.enemy_counter = 100;
        tick(&mut s, &idle());
        assert_eq!(s.score, 10);
        assert_eq!(s.lives, 2);
        assert!(s.bullets.is_empty());
        assert_eq!(s.enemies.len(), 1, "only the new spawn remains");
    }

    #[test]
    fn test_determinism() {
        let mut s1 = session();
        let mut s2 = session();

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for n in 0..2_000 {
            let input = &inputs[n % inputs.len()];
            tick(&mut s1, input);
            tick(&mut s2, input);
        }

        assert_eq!(s1.time_ticks, s2.time_ticks);
        assert_eq!(s1.score, s2.score);
        assert_eq!(s1.lives, s2.lives);
        assert_eq!(s1.level, s2.level);
        assert_eq!(s1.enemies, s2.enemies);
        assert_eq!(s1.player, s2.player);
    }

    fn input_strategy() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, fire)| TickInput {
            left,
            right,
            fire,
            restart: false,
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_score_and_lives_bookkeeping(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(input_strategy(), 1..1500),
        ) {
            let mut s = Session::new(Settings::default(), seed);
            let mut prev_level = s.level;
            let mut prev_rate = s.enemy_spawn_rate;
            let mut prev_speed = s.enemy_base_speed;
            let mut spawned = 0usize;
            let mut cleared = 0usize;

            for input in &inputs {
                let prev_score = s.score;
                let prev_lives = s.lives;
                tick(&mut s, input);

                let awarded: u32 = s.events.iter().map(|e| match e {
                    GameEvent::EnemyDestroyed { points, .. } => *points,
                    _ => 0,
                }).sum();
                prop_assert_eq!(s.score, prev_score + awarded);

                let hits = s.events.iter()
                    .filter(|e| matches!(e, GameEvent::PlayerHit { .. }))
                    .count() as u8;
                prop_assert_eq!(s.lives, prev_lives - hits);
                prop_assert_eq!(s.is_game_over(), s.lives == 0);

                spawned += s.events.iter()
                    .filter(|e| matches!(e, GameEvent::EnemySpawned(_)))
                    .count();
                cleared += s.events.iter()
                    .filter(|e| matches!(e, GameEvent::LevelCleared { .. }))
                    .count();
                prop_assert!(cleared <= spawned, "{} clears for {} spawns", cleared, spawned);

                prop_assert!(s.level >= prev_level);
                prop_assert!(s.enemy_spawn_rate <= prev_rate);
                prop_assert!(s.enemy_base_speed >= prev_speed);
                prev_level = s.level;
                prev_rate = s.enemy_spawn_rate;
                prev_speed = s.enemy_base_speed;
            }
        }
    }
}
