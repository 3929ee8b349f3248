//! Player controller: input-driven craft layered on a [`Body`]

use glam::Vec2;
use rand::Rng;

use super::body::{Body, Playback, Viewport};
use super::entity::{Command, Entity, EntityId, Frame, Kind};
use super::input::Control;
use super::kinematics::Kinematics;
use crate::audio::SoundEffect;
use crate::content::names;
use crate::error::Result;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub lives: u32,
    pub score: u64,
    /// Session time (seconds) of the last respawn
    pub last_respawn: f64,
    pub last_fire: f64,
    pub last_hyperspace: f64,
    /// Invulnerability window after a respawn, in seconds
    pub protection: f64,
    visible: bool,
    blink: bool,
}

impl PlayerState {
    pub fn new(lives: u32, protection: f64) -> Self {
        Self {
            lives,
            score: 0,
            last_respawn: 0.0,
            last_fire: 0.0,
            last_hyperspace: 0.0,
            protection,
            visible: true,
            blink: false,
        }
    }

    pub fn alive(&self) -> bool {
        self.lives > 0
    }

    pub fn is_invulnerable(&self, now: f64) -> bool {
        now - self.last_respawn <= self.protection
    }

    /// Whether the renderer should show the craft this frame (flickers while
    /// invulnerable)
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Recenter and start the invulnerability window; momentum carries over
    pub fn respawn(&mut self, body: &mut Body, now: f64, viewport: &Viewport) {
        body.kin.position = viewport.center();
        self.last_respawn = now;
    }

    /// Lose a life; respawn with an explosion if any remain
    pub fn kill(&mut self, body: &mut Body, frame: &mut Frame, commands: &mut Vec<Command>) {
        self.lives = self.lives.saturating_sub(1);
        log::debug!("player killed, {} lives left", self.lives);
        if !self.alive() {
            return;
        }
        commands.push(Command::Spawn(Entity::explosion(
            names::SHIP_EXPLOSION,
            body.position(),
        )));
        frame.play(SoundEffect::Explosion);
        let viewport = frame.viewport;
        self.respawn(body, frame.now, &viewport);
    }

    pub fn update(
        &mut self,
        body: &mut Body,
        frame: &mut Frame,
        commands: &mut Vec<Command>,
    ) -> Result<()> {
        let input = frame.input;
        let tuning = frame.tuning;
        let now = frame.now;

        if input.held(Control::Left) {
            body.kin.rotate(-body.kin.rotation_speed);
        } else if input.held(Control::Right) {
            body.kin.rotate(body.kin.rotation_speed);
        }

        if input.held(Control::Forward) {
            body.kin.forward();
        } else {
            body.kin.velocity /= tuning.player.drag_divisor;
        }

        body.update(frame.dt, &frame.viewport)?;

        if input.just_pressed(Control::Hyperspace)
            && now - self.last_hyperspace >= tuning.player.hyperspace_cooldown
        {
            let view = frame.viewport;
            body.kin.position = Vec2::new(
                view.x + frame.rng.random_range(0.0..view.width),
                view.y + frame.rng.random_range(0.0..view.height),
            );
            self.last_hyperspace = now;
        }

        if input.held(Control::Fire) && now - self.last_fire > tuning.player.fire_cooldown {
            commands.push(Command::Spawn(Entity::bullet(
                body.center(),
                Vec2::from(tuning.player.bullet_thrust),
                body.kin.rotation,
                tuning,
            )));
            frame.play(SoundEffect::Laser);
            self.last_fire = now;
        }

        if self.is_invulnerable(now) {
            self.visible = self.blink;
            self.blink = !self.blink;
        } else {
            self.visible = true;
        }
        Ok(())
    }
}

impl Entity {
    /// A fresh craft; call [`PlayerState::respawn`] to place it
    pub fn player(tuning: &Tuning) -> Self {
        let t = &tuning.player;
        let kin = Kinematics::new(t.move_speed, t.max_speed, t.rotation_speed);
        Self {
            id: EntityId::UNASSIGNED,
            body: Body::new(names::PLAYER, Playback::looping(45.0), kin, true),
            kind: Kind::Player(PlayerState::new(t.lives, t.invulnerability)),
        }
    }
}
