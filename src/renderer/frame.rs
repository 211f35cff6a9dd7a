//! Draw list generation
//!
//! Turns a simulation snapshot into an ordered list of 2D drawing commands.
//! Pure and platform independent; a backend only has to execute the list.

use crate::platform::SpriteKey;
use crate::sim::{Entity, Rect, Renderable, Snapshot, Visual};

pub const HUD_FONT: &str = "24px Arial";
pub const TITLE_FONT: &str = "48px Arial";
pub const HUD_COLOR: &str = "#fff";
pub const GAME_OVER_COLOR: &str = "#f00";

/// Placeholder colors used when a sprite is unavailable
pub mod fallback {
    pub const BACKGROUND: &str = "#000";
    pub const PLAYER: &str = "#f80";
    pub const POWER_UP: &str = "#08f";
}

/// One drawing operation on a 2D surface
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole surface
    Clear { width: f32, height: f32 },
    /// Image stretched to `bounds`, or `fallback` fill if the image is missing
    Sprite {
        key: SpriteKey,
        bounds: Rect,
        fallback: &'static str,
    },
    FillRect { bounds: Rect, color: &'static str },
    Text {
        text: String,
        x: f32,
        y: f32,
        font: &'static str,
        color: &'static str,
    },
}

/// Build the full frame for a snapshot
pub fn build_frame(snapshot: &Snapshot<'_>) -> Vec<DrawCommand> {
    let (width, height) = (snapshot.playfield.x, snapshot.playfield.y);
    let mut commands = vec![DrawCommand::Clear { width, height }];

    if snapshot.game_over {
        game_over_screen(&mut commands, width, height);
        return commands;
    }

    commands.reserve(
        snapshot.bullets.len() + snapshot.enemies.len() + snapshot.power_ups.len() + 5,
    );

    commands.push(DrawCommand::Sprite {
        key: SpriteKey::Background,
        bounds: Rect::new(0.0, 0.0, width, height),
        fallback: fallback::BACKGROUND,
    });

    commands.push(entity(snapshot.player.renderable()));
    commands.extend(snapshot.bullets.iter().map(|b| entity(b.renderable())));
    commands.extend(snapshot.enemies.iter().map(|e| entity(e.renderable())));
    commands.extend(snapshot.power_ups.iter().map(|p| entity(p.renderable())));

    hud(&mut commands, snapshot);
    commands
}

/// Map one entity to its visual
fn entity(renderable: Renderable) -> DrawCommand {
    let bounds = renderable.bounds;
    match renderable.visual {
        Visual::Player => DrawCommand::Sprite {
            key: SpriteKey::Player,
            bounds,
            fallback: fallback::PLAYER,
        },
        Visual::Bullet { color } => DrawCommand::FillRect { bounds, color },
        Visual::Enemy(kind) => DrawCommand::Sprite {
            key: SpriteKey::for_enemy(kind),
            bounds,
            fallback: kind.profile().color,
        },
        Visual::PowerUp => DrawCommand::Sprite {
            key: SpriteKey::PowerUp,
            bounds,
            fallback: fallback::POWER_UP,
        },
    }
}

fn hud(commands: &mut Vec<DrawCommand>, snapshot: &Snapshot<'_>) {
    let lines = [
        format!("Lives: {}", snapshot.lives),
        format!("Score: {}", snapshot.score),
        format!("Level: {}", snapshot.level),
    ];
    for (i, text) in lines.into_iter().enumerate() {
        commands.push(DrawCommand::Text {
            text,
            x: 20.0,
            y: 40.0 * (i as f32 + 1.0),
            font: HUD_FONT,
            color: HUD_COLOR,
        });
    }
}

fn game_over_screen(commands: &mut Vec<DrawCommand>, width: f32, height: f32) {
    commands.push(DrawCommand::Text {
        text: "Game Over".to_string(),
        x: width / 2.0 - 100.0,
        y: height / 2.0 - 50.0,
        font: TITLE_FONT,
        color: GAME_OVER_COLOR,
    });
    commands.push(DrawCommand::Text {
        text: "Press R to Restart".to_string(),
        x: width / 2.0 - 80.0,
        y: height / 2.0 + 20.0,
        font: HUD_FONT,
        color: HUD_COLOR,
    });
}
