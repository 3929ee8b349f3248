//! Data-driven game balance
//!
//! Every gameplay number lives here so a session can be rebalanced from JSON
//! without touching the simulation. Defaults are the shipped values.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Player craft handling and timers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub lives: u32,
    pub move_speed: f32,
    pub max_speed: f32,
    pub rotation_speed: f32,
    /// Per-frame velocity divisor while not thrusting
    pub drag_divisor: f32,
    /// Seconds between shots
    pub fire_cooldown: f64,
    /// Seconds between hyperspace jumps
    pub hyperspace_cooldown: f64,
    /// Seconds of protection after a respawn
    pub invulnerability: f64,
    /// Thrust modifiers handed to each bullet
    pub bullet_thrust: [f32; 2],
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            lives: 3,
            move_speed: 1.5,
            max_speed: 2.5,
            rotation_speed: 5.0,
            drag_divisor: 1.05,
            fire_cooldown: 0.5,
            hyperspace_cooldown: 2.0,
            invulnerability: 1.0,
            bullet_thrust: [5.0, 5.0],
        }
    }
}

/// Asteroid stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidTuning {
    pub health: i32,
    pub damage: i32,
    pub score_large: u64,
    pub score_medium: u64,
    pub score_small: u64,
    pub move_speed: f32,
    pub rotation_speed: f32,
    /// Component speed of a freshly spawned asteroid along each axis
    pub spawn_speed: f32,
    /// Y offset of the first child when an asteroid splits
    pub split_offset_y: f32,
}

impl Default for AsteroidTuning {
    fn default() -> Self {
        Self {
            health: 50,
            damage: 100,
            score_large: 20,
            score_medium: 50,
            score_small: 100,
            move_speed: 1.0,
            rotation_speed: 2.0,
            spawn_speed: 1.0,
            split_offset_y: 15.0,
        }
    }
}

/// Enemy ship stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub max_speed: f32,
    pub cruise: [f32; 2],
    /// Seconds between enemy shots
    pub fire_cooldown: f64,
    pub score_small: u64,
    pub score_large: u64,
    /// Lowest spawn y on the left edge
    pub spawn_min_y: i32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            cruise: [1.0, 0.0],
            fire_cooldown: 2.0,
            score_small: 1000,
            score_large: 200,
            spawn_min_y: 50,
        }
    }
}

/// Projectile handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    pub move_speed: f32,
    pub max_speed: f32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            max_speed: 2.0,
        }
    }
}

/// Spawn timers and score-driven difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorTuning {
    /// Seconds between enemy ship spawns
    pub ship_interval: f64,
    /// Seconds between asteroid spawns
    pub asteroid_interval: f64,
    /// Fresh asteroid cap at score 0
    pub base_asteroid_cap: u32,
    /// Score per additional fresh asteroid allowed
    pub asteroid_cap_step: u64,
    /// Score per additional life threshold
    pub extra_life_step: u64,
    /// Above this score enemy ships spawn small
    pub small_ship_score: u64,
}

impl Default for DirectorTuning {
    fn default() -> Self {
        Self {
            ship_interval: 15.0,
            asteroid_interval: 1.5,
            base_asteroid_cap: 3,
            asteroid_cap_step: 1000,
            extra_life_step: 10_000,
            small_ship_score: 10_000,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub asteroid: AsteroidTuning,
    pub enemy: EnemyTuning,
    pub bullet: BulletTuning,
    pub director: DirectorTuning,
}

impl Tuning {
    /// Parse a (possibly partial) tuning document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        // Enemy aim samples integer components in -max..max
        if self.enemy.max_speed.is_nan() || self.enemy.max_speed < 1.0 {
            return Err(invalid(format!(
                "enemy.max_speed must be at least 1, got {}",
                self.enemy.max_speed
            )));
        }
        if self.director.asteroid_cap_step == 0 {
            return Err(invalid("director.asteroid_cap_step must be positive".into()));
        }
        if self.director.extra_life_step == 0 {
            return Err(invalid("director.extra_life_step must be positive".into()));
        }
        if self.player.drag_divisor.is_nan() || self.player.drag_divisor <= 0.0 {
            return Err(invalid(format!(
                "player.drag_divisor must be positive, got {}",
                self.player.drag_divisor
            )));
        }
        Ok(())
    }
}

pub(crate) fn invalid(message: String) -> Error {
    Error::Config { message }
}
