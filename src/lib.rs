//! Captain Asteroids - a screen-wrapping arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, spawning, game state)
//! - `content`: Named asset lookup (sprite frame geometry, sound names)
//! - `render`: Draw requests handed to an external renderer
//! - `audio`: Sound/music requests handed to an external player
//! - `settings` / `tuning`: Configuration and data-driven game balance

pub mod audio;
pub mod content;
pub mod error;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; kinematics are expressed per frame)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 480.0;
}

/// Unit vector pointing along a rotation given in degrees
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_cardinal_directions() {
        assert!((heading(0.0) - Vec2::X).length() < 1e-6);
        assert!((heading(90.0) - Vec2::Y).length() < 1e-6);
        assert!((heading(180.0) + Vec2::X).length() < 1e-6);
    }
}
