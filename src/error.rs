//! Error types for asset loading
//!
//! Gameplay itself has no failure modes; only the browser-facing adapters
//! can fail, and callers log these rather than stopping the game.

use thiserror::Error;

use crate::platform::assets::SpriteKey;

#[derive(Error, Debug)]
pub enum AssetError {
    /// An image failed to load or decode
    #[error("Failed to load sprite {key:?} from '{path}': {reason}")]
    Load {
        key: SpriteKey,
        path: String,
        reason: String,
    },

    /// DOM object creation or lookup failed
    #[error("DOM error: {0}")]
    Dom(String),
}

impl AssetError {
    pub fn load(key: SpriteKey, path: impl Into<String>, reason: impl Into<String>) -> Self {
        AssetError::Load {
            key,
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn dom(reason: impl Into<String>) -> Self {
        AssetError::Dom(reason.into())
    }
}

/// Type alias for Result using AssetError
pub type Result<T> = std::result::Result<T, AssetError>;
