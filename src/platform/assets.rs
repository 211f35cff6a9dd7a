//! Sprite manifest and image loading
//!
//! Every sprite is requested at once and the game waits for all of them
//! before the first tick. A failed image is logged and left out; the
//! renderer draws a flat placeholder in its place.

use serde::Serialize;

use crate::sim::EnemyKind;

/// Named image resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpriteKey {
    Player,
    Enemy1,
    Enemy2,
    Enemy3,
    Background,
    PowerUp,
}

impl SpriteKey {
    pub const ALL: [SpriteKey; 6] = [
        SpriteKey::Player,
        SpriteKey::Enemy1,
        SpriteKey::Enemy2,
        SpriteKey::Enemy3,
        SpriteKey::Background,
        SpriteKey::PowerUp,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            SpriteKey::Player => "images/playerShip2_orange.png",
            SpriteKey::Enemy1 => "images/enemyBlack1.png",
            SpriteKey::Enemy2 => "images/enemyBlack2.png",
            SpriteKey::Enemy3 => "images/enemyBlack3.png",
            SpriteKey::Background => "images/blue.png",
            SpriteKey::PowerUp => "images/powerUp_blue_bolt.png",
        }
    }

    /// Enemy sprite chosen by the kind's size multiplier
    pub fn for_enemy(kind: EnemyKind) -> Self {
        let size = kind.profile().size;
        if size < 1.0 {
            SpriteKey::Enemy2
        } else if size > 1.0 {
            SpriteKey::Enemy3
        } else {
            SpriteKey::Enemy1
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{SpriteSheet, load_sprites};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::HashMap;

    use js_sys::Promise;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlImageElement;

    use super::SpriteKey;
    use crate::error::{AssetError, Result};

    /// Loaded images by key; missing entries failed to load
    #[derive(Debug, Default)]
    pub struct SpriteSheet {
        images: HashMap<SpriteKey, HtmlImageElement>,
    }

    impl SpriteSheet {
        /// A drawable image, if it loaded
        pub fn get(&self, key: SpriteKey) -> Option<&HtmlImageElement> {
            self.images
                .get(&key)
                .filter(|img| img.complete() && img.natural_width() > 0)
        }
    }

    /// Start loading one image; the promise settles on load or error
    fn request_image(key: SpriteKey) -> Result<(HtmlImageElement, Promise)> {
        let img = HtmlImageElement::new().map_err(|e| AssetError::dom(format!("{:?}", e)))?;
        let promise = Promise::new(&mut |resolve, reject| {
            img.set_onload(Some(&resolve));
            img.set_onerror(Some(&reject));
        });
        img.set_src(key.path());
        Ok((img, promise))
    }

    /// Load every sprite concurrently and wait for all of them
    pub async fn load_sprites() -> SpriteSheet {
        let mut pending = Vec::with_capacity(SpriteKey::ALL.len());
        for key in SpriteKey::ALL {
            match request_image(key) {
                Ok((img, promise)) => pending.push((key, img, promise)),
                Err(e) => log::error!("{}", e),
            }
        }

        let mut images = HashMap::new();
        for (key, img, promise) in pending {
            match JsFuture::from(promise).await {
                Ok(_) => {
                    img.set_onload(None);
                    img.set_onerror(None);
                    images.insert(key, img);
                }
                Err(e) => {
                    let err = AssetError::load(key, key.path(), format!("{:?}", e));
                    log::error!("{}", err);
                }
            }
        }

        log::info!(
            "Loaded {}/{} sprites",
            images.len(),
            SpriteKey::ALL.len()
        );
        SpriteSheet { images }
    }
}
