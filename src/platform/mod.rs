//! Platform abstraction layer
//!
//! Handles the browser-facing edges of the game:
//! - Keyboard state polled once per tick
//! - Sprite manifest and asynchronous image loading

pub mod assets;
pub mod input;

pub use assets::SpriteKey;
pub use input::KeyState;
