//! Level and session controller
//!
//! Score, lives, level progression and the Playing/GameOver state machine.

use super::state::{Enemy, GameEvent, GamePhase, Session};
use crate::consts::*;

/// Level-clear check: this level has seen a spawn, nothing is alive, and the
/// next spawn is not imminent
pub fn is_level_cleared(session: &Session) -> bool {
    session.level_started
        && session.spawned_this_level
        && session.enemies.is_empty()
        && session
            .spawner
            .enemy_counter_past(session.enemy_spawn_rate, LEVEL_CLEAR_FRACTION)
}

/// Advance to the next level: faster spawns, faster enemies, clean field
pub fn next_level(session: &mut Session) {
    session.level += 1;
    session.enemy_spawn_rate *= SPAWN_RATE_DECAY;
    session.enemy_base_speed += ENEMY_SPEED_STEP;
    session.enemies.clear();
    session.bullets.clear();
    let playfield = session.playfield();
    session.player.reset_position(playfield);
    // Disarmed until the new level's first spawn
    session.spawned_this_level = false;

    session.events.push(GameEvent::LevelCleared {
        new_level: session.level,
    });
    log::info!(
        "Level {} (spawn rate {:.1}, base speed {:.1})",
        session.level,
        session.enemy_spawn_rate,
        session.enemy_base_speed
    );
}

/// Credit a destroyed enemy
pub fn award(session: &mut Session, enemy: &Enemy) {
    let points = enemy.points();
    session.score += points;
    session.events.push(GameEvent::EnemyDestroyed {
        kind: enemy.kind,
        points,
    });
}

/// Take one life for a player-enemy collision.
/// Returns true if this collision ended the run.
pub fn lose_life(session: &mut Session) -> bool {
    session.lives = session.lives.saturating_sub(1);
    session.events.push(GameEvent::PlayerHit {
        lives_left: session.lives,
    });

    if session.lives == 0 {
        session.phase = GamePhase::GameOver;
        session.events.push(GameEvent::GameOver {
            score: session.score,
        });
        log::info!(
            "Game over at level {} with score {}",
            session.level,
            session.score
        );
        true
    } else {
        log::debug!("Player hit, {} lives left", session.lives);
        false
    }
}

/// Apply a collected power-up's bullet boost
pub fn collect_power_up(session: &mut Session) {
    let extended = session.player.is_boosted();
    session.player.apply_boost(session.time_ticks);
    session.events.push(GameEvent::PowerUpCollected);
    log::debug!(
        "Bullet boost {} until tick {:?}",
        if extended { "extended" } else { "started" },
        session.player.boost_expires_at
    );
}

/// Leave GameOver and start a fresh run in the same session
pub fn restart(session: &mut Session) {
    session.lives = STARTING_LIVES;
    session.score = 0;
    session.phase = GamePhase::Playing;
    session.bullets.clear();
    session.enemies.clear();
    session.power_ups.clear();
    session.spawner.reset();
    session.spawned_this_level = false;

    let playfield = session.playfield();
    session.player.reset_position(playfield);
    session.player.clear_boost();

    if session.settings.reset_level_on_restart {
        session.level = 1;
        session.enemy_spawn_rate = ENEMY_SPAWN_RATE;
        session.enemy_base_speed = ENEMY_BASE_SPEED;
        session.level_started = false;
    }

    session.events.push(GameEvent::Restarted);
    log::info!("Restarted at level {}", session.level);
}
