//! Session settings and preferences
//!
//! Loaded from a JSON file by the native runner; everything has a default so
//! a missing or partial file still yields a playable session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::error::Result;
use crate::sim::Viewport;
use crate::tuning::{Tuning, invalid};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Fixed RNG seed; `None` lets the host pick one
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Balance ===
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject an arena or balance sheet the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        // Hyperspace samples positions across the whole arena
        let (w, h) = (self.viewport_width, self.viewport_height);
        if w.is_nan() || h.is_nan() || w <= 0.0 || h <= 0.0 {
            return Err(invalid(format!("viewport must be positive, got {w}x{h}")));
        }
        self.tuning.validate()
    }

    /// Load settings from disk, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}; using default settings", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings() {
        let s = Settings::from_json(r#"{ "seed": 7, "tuning": { "player": { "lives": 5 } } }"#)
            .unwrap();
        assert_eq!(s.seed, Some(7));
        assert_eq!(s.tuning.player.lives, 5);
        assert_eq!(s.viewport_width, VIEWPORT_WIDTH);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let s = Settings::load(Path::new("/definitely/not/here/settings.json"));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_unplayable_settings_are_rejected() {
        for json in [
            r#"{ "viewport_width": 0.0 }"#,
            r#"{ "viewport_height": -480.0 }"#,
            r#"{ "seed": 1, "tuning": { "enemy": { "max_speed": 0.5 } } }"#,
            r#"{ "tuning": { "director": { "asteroid_cap_step": 0 } } }"#,
        ] {
            let err = Settings::from_json(json).unwrap_err();
            assert!(matches!(err, crate::Error::Config { .. }), "{json}");
        }
    }

    #[test]
    fn test_unplayable_file_falls_back() {
        let path = std::env::temp_dir().join("captain-asteroids-bad-settings.json");
        std::fs::write(&path, r#"{ "tuning": { "director": { "extra_life_step": 0 } } }"#)
            .unwrap();
        let s = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(s, Settings::default());
    }
}
