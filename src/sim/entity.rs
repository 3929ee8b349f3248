//! The closed set of entity kinds living in the arena
//!
//! Every entity is a [`Body`] plus a [`Kind`] payload. Per-frame behaviour is
//! dispatched by matching on the kind; anything that would add or remove
//! entities is queued as a [`Command`] and applied by the registry after the
//! pass, so iteration never observes a half-mutated set.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, Playback, Viewport};
use super::input::TickInput;
use super::kinematics::Kinematics;
use super::player::PlayerState;
use super::state::GameEvent;
use crate::audio::SoundEffect;
use crate::content::{ContentSource, names};
use crate::error::Result;
use crate::render::DrawRequest;
use crate::tuning::Tuning;

/// Degrees per frame an explosion spins
const EXPLOSION_SPIN: f32 = 5.0;

/// Registry-assigned handle. Non-owning: holders must tolerate the entity
/// having been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Placeholder carried until the registry assigns a real id
    pub const UNASSIGNED: EntityId = EntityId(0);
}

/// Discriminant of [`Kind`], used by the collision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    Player,
    Asteroid,
    EnemyShip,
    Bullet,
    EnemyBullet,
    Explosion,
    Background,
}

/// Size category for asteroids and enemy ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Small,
    Medium,
    Large,
}

impl Tier {
    /// Next tier down; Small stays Small
    pub fn smaller(self) -> Tier {
        match self {
            Tier::Large => Tier::Medium,
            Tier::Medium | Tier::Small => Tier::Small,
        }
    }

    fn asteroid_sprite(self) -> &'static str {
        match self {
            Tier::Small => names::ASTEROID_SMALL,
            Tier::Medium => names::ASTEROID_MEDIUM,
            Tier::Large => names::ASTEROID_LARGE,
        }
    }

    fn explosion_sprite(self) -> &'static str {
        match self {
            Tier::Small => names::EXPLOSION_SMALL,
            Tier::Medium => names::EXPLOSION_MEDIUM,
            Tier::Large => names::EXPLOSION_LARGE,
        }
    }
}

/// Who destroyed an asteroid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Killer {
    pub id: EntityId,
    pub tag: EntityTag,
}

impl Killer {
    pub fn is_enemy_bullet(&self) -> bool {
        self.tag == EntityTag::EnemyBullet
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidState {
    pub health: i32,
    pub damage: i32,
    pub score: u64,
    pub tier: Tier,
    pub killer: Option<Killer>,
}

impl AsteroidState {
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyShipState {
    pub tier: Tier,
    /// Fixed per-frame drift
    pub cruise: Vec2,
    pub last_shot: f64,
    /// Player credited when this ship is shot down
    pub player: EntityId,
    pub destroyed: bool,
}

/// Ship that fired an enemy bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shooter {
    pub id: EntityId,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulletState {
    /// Thrust modifiers applied every frame
    pub thrust: Vec2,
    pub shooter: Option<Shooter>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Player(PlayerState),
    Asteroid(AsteroidState),
    EnemyShip(EnemyShipState),
    Bullet(BulletState),
    EnemyBullet(BulletState),
    Explosion,
    Background,
}

/// Deferred change to the live entity set
#[derive(Debug)]
pub enum Command {
    Spawn(Entity),
    Despawn(EntityId),
}

/// Everything an entity may read or touch during one frame
pub struct Frame<'a> {
    pub input: &'a TickInput,
    /// Seconds since the session started
    pub now: f64,
    /// Seconds since the previous frame
    pub dt: f64,
    pub viewport: Viewport,
    pub tuning: &'a Tuning,
    pub rng: &'a mut Pcg32,
    pub events: &'a mut Vec<GameEvent>,
}

impl Frame<'_> {
    pub fn play(&mut self, effect: SoundEffect) {
        self.events.push(GameEvent::Sound(effect));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub body: Body,
    pub kind: Kind,
}

impl Entity {
    fn with(body: Body, kind: Kind) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            body,
            kind,
        }
    }

    /// An asteroid of the given tier at rest at the origin
    pub fn asteroid(tier: Tier, tuning: &Tuning) -> Self {
        let t = &tuning.asteroid;
        let score = match tier {
            Tier::Large => t.score_large,
            Tier::Medium => t.score_medium,
            Tier::Small => t.score_small,
        };
        let kin = Kinematics::new(t.move_speed, t.move_speed, t.rotation_speed);
        Self::with(
            Body::new(tier.asteroid_sprite(), Playback::looping(30.0), kin, true),
            Kind::Asteroid(AsteroidState {
                health: t.health,
                damage: t.damage,
                score,
                tier,
                killer: None,
            }),
        )
    }

    /// An enemy ship (Medium is treated as Large)
    pub fn enemy_ship(tier: Tier, position: Vec2, player: EntityId, tuning: &Tuning) -> Self {
        let t = &tuning.enemy;
        let (tier, sprite) = match tier {
            Tier::Small => (Tier::Small, names::ENEMY_SMALL),
            Tier::Medium | Tier::Large => (Tier::Large, names::ENEMY_LARGE),
        };
        let mut kin = Kinematics::new(t.max_speed, t.max_speed, 0.0);
        kin.position = position;
        Self::with(
            Body::new(sprite, Playback::looping(45.0), kin, true),
            Kind::EnemyShip(EnemyShipState {
                tier,
                cruise: Vec2::from(t.cruise),
                last_shot: 0.0,
                player,
                destroyed: false,
            }),
        )
    }

    fn projectile(position: Vec2, rotation: f32, tuning: &Tuning) -> Body {
        let t = &tuning.bullet;
        let mut kin = Kinematics::new(t.move_speed, t.max_speed, 0.0);
        kin.position = position;
        kin.rotation = rotation;
        Body::new(names::BULLET, Playback::looping(30.0), kin, false)
    }

    /// A player bullet
    pub fn bullet(position: Vec2, thrust: Vec2, rotation: f32, tuning: &Tuning) -> Self {
        Self::with(
            Self::projectile(position, rotation, tuning),
            Kind::Bullet(BulletState {
                thrust,
                shooter: None,
            }),
        )
    }

    /// A bullet fired by an enemy ship
    pub fn enemy_bullet(
        position: Vec2,
        thrust: Vec2,
        rotation: f32,
        shooter: Shooter,
        tuning: &Tuning,
    ) -> Self {
        Self::with(
            Self::projectile(position, rotation, tuning),
            Kind::EnemyBullet(BulletState {
                thrust,
                shooter: Some(shooter),
            }),
        )
    }

    /// One-shot explosion animation using the given strip
    pub fn explosion(sprite: &'static str, position: Vec2) -> Self {
        let mut kin = Kinematics::default();
        kin.position = position;
        Self::with(Body::new(sprite, Playback::once(60.0), kin, true), Kind::Explosion)
    }

    /// Explosion left behind by an asteroid of `tier`
    pub fn asteroid_explosion(tier: Tier, position: Vec2) -> Self {
        Self::explosion(tier.explosion_sprite(), position)
    }

    pub fn background(sprite: &'static str) -> Self {
        Self::with(
            Body::new(sprite, Playback::looping(30.0), Kinematics::default(), true),
            Kind::Background,
        )
    }

    pub fn tag(&self) -> EntityTag {
        match self.kind {
            Kind::Player(_) => EntityTag::Player,
            Kind::Asteroid(_) => EntityTag::Asteroid,
            Kind::EnemyShip(_) => EntityTag::EnemyShip,
            Kind::Bullet(_) => EntityTag::Bullet,
            Kind::EnemyBullet(_) => EntityTag::EnemyBullet,
            Kind::Explosion => EntityTag::Explosion,
            Kind::Background => EntityTag::Background,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.body.is_initialized()
    }

    /// Resolve assets; idempotent
    pub fn initialize_once(&mut self, content: &dyn ContentSource) -> Result<()> {
        if self.body.is_initialized() {
            return Ok(());
        }
        match self.kind {
            Kind::Bullet(_) | Kind::EnemyBullet(_) => content.require(SoundEffect::Laser.asset())?,
            Kind::Explosion => content.require(SoundEffect::Explosion.asset())?,
            _ => {}
        }
        self.body.initialize_once(content)
    }

    pub fn as_player(&self) -> Option<&PlayerState> {
        match &self.kind {
            Kind::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.kind {
            Kind::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_asteroid(&self) -> Option<&AsteroidState> {
        match &self.kind {
            Kind::Asteroid(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_asteroid_mut(&mut self) -> Option<&mut AsteroidState> {
        match &mut self.kind {
            Kind::Asteroid(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_enemy_ship(&self) -> Option<&EnemyShipState> {
        match &self.kind {
            Kind::EnemyShip(s) => Some(s),
            _ => None,
        }
    }

    /// Advance one frame
    pub fn update(&mut self, frame: &mut Frame, commands: &mut Vec<Command>) -> Result<()> {
        let id = self.id;
        let body = &mut self.body;
        match &mut self.kind {
            Kind::Player(player) => player.update(body, frame, commands)?,
            Kind::Asteroid(_) => {
                let spin = body.kin.rotation_speed;
                body.kin.rotate(spin);
                body.update(frame.dt, &frame.viewport)?;
            }
            Kind::EnemyShip(ship) => {
                let viewport = frame.viewport;
                body.move_by(ship.cruise.x, ship.cruise.y, &viewport);
                let jitter = frame.rng.random_range(-1..1) as f32;
                body.move_by(0.0, jitter, &viewport);

                if frame.now - ship.last_shot > frame.tuning.enemy.fire_cooldown {
                    let max = body.kin.max_speed as i32;
                    let aim = Vec2::new(
                        frame.rng.random_range(-max..max) as f32,
                        frame.rng.random_range(-max..max) as f32,
                    )
                    .normalize_or(Vec2::X);
                    let shooter = Shooter { id, tier: ship.tier };
                    commands.push(Command::Spawn(Entity::enemy_bullet(
                        body.center(),
                        aim,
                        body.kin.rotation,
                        shooter,
                        frame.tuning,
                    )));
                    frame.play(SoundEffect::Laser);
                    ship.last_shot = frame.now;
                }

                body.update(frame.dt, &frame.viewport)?;
            }
            Kind::Bullet(bullet) | Kind::EnemyBullet(bullet) => {
                body.kin.thrust(bullet.thrust.x, bullet.thrust.y);
                body.update(frame.dt, &frame.viewport)?;
                if body.is_offscreen(&frame.viewport) {
                    commands.push(Command::Despawn(id));
                }
            }
            Kind::Explosion => {
                body.kin.rotate(EXPLOSION_SPIN);
                if !body.animation.is_active() {
                    commands.push(Command::Despawn(id));
                }
                body.update(frame.dt, &frame.viewport)?;
            }
            Kind::Background => body.update(frame.dt, &frame.viewport)?,
        }
        Ok(())
    }

    /// Sprite request for the current frame, or `None` when nothing is visible
    pub fn draw_request(&self) -> Result<Option<DrawRequest>> {
        let frame = self.body.animation.frame()?;
        if !self.body.animation.is_active() {
            return Ok(None);
        }
        if matches!(&self.kind, Kind::Player(player) if !player.visible()) {
            return Ok(None);
        }
        Ok(Some(DrawRequest::Sprite {
            sprite: self.body.sprite(),
            frame,
            position: self.body.position(),
            rotation: self.body.kin.rotation,
            width: self.body.width(),
            height: self.body.height(),
        }))
    }
}
