//! Named asset lookup
//!
//! The simulation never loads textures or sounds itself. It asks a
//! [`ContentSource`] for the frame geometry of a sprite strip (which fixes the
//! entity's bounding box and collision radius) and checks that the sounds it
//! will later request exist. A failed lookup aborts that entity's setup.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Asset names used by the game
pub mod names {
    pub const PLAYER: &str = "shipAnimation";
    pub const BULLET: &str = "bullet";
    pub const ASTEROID_SMALL: &str = "asteroidSmall";
    pub const ASTEROID_MEDIUM: &str = "asteroidMedium";
    pub const ASTEROID_LARGE: &str = "asteroidLarge";
    pub const ENEMY_SMALL: &str = "Enemy_Small_Animated";
    pub const ENEMY_LARGE: &str = "Enemy_Large_Animated";
    pub const EXPLOSION_SMALL: &str = "asteroidSmall_Animated_Trans1";
    pub const EXPLOSION_MEDIUM: &str = "asteroidMedium_Animated_Trans1";
    pub const EXPLOSION_LARGE: &str = "asteroidLarge_Animated_Trans1";
    pub const SHIP_EXPLOSION: &str = "Ship_Explode";
    pub const BACKGROUNDS: [&str; 2] = ["space1", "space2"];

    pub const SOUND_LASER: &str = "sound/laserFire";
    pub const SOUND_EXPLOSION: &str = "sound/explosion";
    pub const MUSIC_MENU: &str = "sound/menuMusic";
    pub const MUSIC_GAME: &str = "sound/gameMusic";
}

/// Frame geometry of a sprite strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteInfo {
    pub frame_width: u32,
    pub frame_height: u32,
    pub frames: u32,
}

impl SpriteInfo {
    pub const fn new(frame_width: u32, frame_height: u32, frames: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            frames,
        }
    }
}

/// Resolves asset names for entity setup
pub trait ContentSource {
    /// Frame geometry for a sprite strip
    fn sprite(&self, name: &str) -> Result<SpriteInfo>;

    /// Fail unless a non-sprite asset (sound, music) is available
    fn require(&self, name: &str) -> Result<()>;
}

/// Catalogue of known assets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteAtlas {
    pub sprites: BTreeMap<String, SpriteInfo>,
    pub sounds: BTreeSet<String>,
}

impl SpriteAtlas {
    /// Catalogue of the assets bundled with the game
    pub fn builtin() -> Self {
        use names::*;

        let sprites = [
            (PLAYER, SpriteInfo::new(75, 30, 8)),
            (BULLET, SpriteInfo::new(5, 5, 1)),
            (ASTEROID_SMALL, SpriteInfo::new(20, 20, 1)),
            (ASTEROID_MEDIUM, SpriteInfo::new(40, 40, 1)),
            (ASTEROID_LARGE, SpriteInfo::new(60, 60, 1)),
            (ENEMY_SMALL, SpriteInfo::new(50, 20, 8)),
            (ENEMY_LARGE, SpriteInfo::new(75, 30, 8)),
            (EXPLOSION_SMALL, SpriteInfo::new(32, 32, 16)),
            (EXPLOSION_MEDIUM, SpriteInfo::new(48, 48, 16)),
            (EXPLOSION_LARGE, SpriteInfo::new(64, 64, 16)),
            (SHIP_EXPLOSION, SpriteInfo::new(64, 64, 16)),
            (BACKGROUNDS[0], SpriteInfo::new(800, 480, 1)),
            (BACKGROUNDS[1], SpriteInfo::new(800, 480, 1)),
        ];

        Self {
            sprites: sprites
                .into_iter()
                .map(|(name, info)| (name.to_string(), info))
                .collect(),
            sounds: [SOUND_LASER, SOUND_EXPLOSION, MUSIC_MENU, MUSIC_GAME]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Parse an atlas document (e.g. exported by the asset pipeline)
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn without(mut self, name: &str) -> Self {
        self.sprites.remove(name);
        self.sounds.remove(name);
        self
    }
}

impl ContentSource for SpriteAtlas {
    fn sprite(&self, name: &str) -> Result<SpriteInfo> {
        self.sprites
            .get(name)
            .copied()
            .ok_or_else(|| Error::MissingResource { name: name.into() })
    }

    fn require(&self, name: &str) -> Result<()> {
        if self.sounds.contains(name) {
            Ok(())
        } else {
            Err(Error::MissingResource { name: name.into() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_every_named_asset() {
        let atlas = SpriteAtlas::builtin();
        for name in [
            names::PLAYER,
            names::BULLET,
            names::ASTEROID_LARGE,
            names::ENEMY_LARGE,
            names::SHIP_EXPLOSION,
            names::BACKGROUNDS[1],
        ] {
            assert!(atlas.sprite(name).is_ok(), "{name} missing");
        }
        assert!(atlas.require(names::SOUND_LASER).is_ok());
    }

    #[test]
    fn test_missing_sprite_reports_name() {
        let atlas = SpriteAtlas::builtin().without(names::BULLET);
        assert_eq!(
            atlas.sprite(names::BULLET),
            Err(Error::MissingResource {
                name: "bullet".into()
            })
        );
    }

    #[test]
    fn test_atlas_from_json() {
        let atlas = SpriteAtlas::from_json(
            r#"{ "sprites": { "bullet": { "frame_width": 3, "frame_height": 4, "frames": 1 } },
                 "sounds": ["sound/laserFire"] }"#,
        )
        .unwrap();
        assert_eq!(atlas.sprite("bullet").unwrap(), SpriteInfo::new(3, 4, 1));
        assert!(atlas.require("sound/explosion").is_err());
    }
}
