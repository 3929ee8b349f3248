//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or asset loading; only requests for them

pub mod animation;
pub mod body;
pub mod collision;
pub mod director;
pub mod entity;
pub mod input;
pub mod kinematics;
pub mod player;
pub mod registry;
pub mod state;
pub mod tick;

pub use animation::AnimationTimer;
pub use body::{Body, Playback, Rect, Viewport};
pub use collision::{CollisionRule, RULES, kill_enemy_ship, rule_for};
pub use director::Director;
pub use entity::{
    AsteroidState, BulletState, Command, EnemyShipState, Entity, EntityId, EntityTag, Frame,
    Killer, Kind, Shooter, Tier,
};
pub use input::{Control, Controls, TickInput};
pub use kinematics::Kinematics;
pub use player::PlayerState;
pub use registry::Registry;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{FrameClock, autopilot, tick};
