//! Position / rotation / velocity state shared by every moving object
//!
//! Velocities are in pixels per frame and rotations in degrees. The rotate
//! and thrust rules below are deliberately not the textbook ones: gameplay
//! was balanced against them, so they are kept exactly.

use glam::Vec2;

use crate::heading;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kinematics {
    pub position: Vec2,
    /// Degrees, normally in [0, 360)
    pub rotation: f32,
    pub velocity: Vec2,
    pub max_speed: f32,
    /// Thrust applied per `forward()` call
    pub move_speed: f32,
    /// Degrees per frame for rotating entities
    pub rotation_speed: f32,
}

impl Kinematics {
    pub fn new(move_speed: f32, max_speed: f32, rotation_speed: f32) -> Self {
        Self {
            move_speed,
            max_speed,
            rotation_speed,
            ..Default::default()
        }
    }

    /// Translate by (dx, dy), unclamped
    #[inline]
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.position += Vec2::new(dx, dy);
    }

    /// Add `delta` degrees.
    ///
    /// A positive sum wraps modulo 360. A sum of zero or below falls back to
    /// `360 + delta`, which is only a proper wrap when the previous rotation
    /// was 0; deltas of -360 or less leave the [0, 360) range.
    pub fn rotate(&mut self, delta: f32) {
        let next = self.rotation + delta;
        self.rotation = if next > 0.0 { next % 360.0 } else { 360.0 + delta };
    }

    /// Accelerate along the current heading.
    ///
    /// When the candidate velocity exceeds `max_speed` it is divided by
    /// `|previous velocity| / max_speed`, so the result only approximates the
    /// limit (and is left unclamped when the craft was at rest).
    pub fn thrust(&mut self, speed_mod_x: f32, speed_mod_y: f32) {
        let dir = heading(self.rotation);
        let mut next = self.velocity + Vec2::new(dir.x * speed_mod_x, dir.y * speed_mod_y);

        if next.length() > self.max_speed {
            let divisor = self.velocity.length() / self.max_speed;
            if divisor.abs() > 0.0 {
                next /= divisor;
            }
        }

        self.velocity = next;
    }

    pub fn forward(&mut self) {
        self.thrust(self.move_speed, self.move_speed);
    }

    pub fn backward(&mut self) {
        self.thrust(-self.move_speed, -self.move_speed);
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}
