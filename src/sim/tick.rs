//! Fixed timestep simulation tick
//!
//! Drives the phase machine and, while playing, the per-frame pipeline:
//! player and entity updates, collision reactions, then the director.

use glam::Vec2;

use super::entity::{EntityTag, Frame};
use super::input::{Control, Controls, TickInput};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::Result;

/// Longest host frame the clock will try to catch up on, in seconds
const MAX_FRAME_TIME: f64 = 0.1;

/// Threat distance at which the demo pilot jumps away
const DEMO_PANIC_RADIUS: f32 = 70.0;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) -> Result<()> {
    state.time += dt;
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Title => {
            if input.held(Control::Help) {
                state.set_phase(GamePhase::Help);
            } else if input.held(Control::Fire) {
                if !state.player_alive() {
                    state.new_game()?;
                }
                state.set_phase(GamePhase::Playing);
            } else if input.just_pressed(Control::Back) {
                log::info!("exit requested");
                state.exit_requested = true;
            }
        }
        GamePhase::Help | GamePhase::Paused | GamePhase::GameOver => {
            if input.just_pressed(Control::Back) {
                state.set_phase(GamePhase::Title);
            }
        }
        GamePhase::Playing => {
            if input.just_pressed(Control::Back) {
                state.set_phase(GamePhase::Paused);
            } else if !state.player_alive() {
                log::info!("game over with {} points", state.score());
                state.events.push(GameEvent::GameOver);
                state.set_phase(GamePhase::GameOver);
            } else {
                run_frame(state, input, dt)?;
            }
        }
    }
    Ok(())
}

fn run_frame(state: &mut GameState, input: &TickInput, dt: f64) -> Result<()> {
    let player = state.player_id();
    let GameState {
        registry,
        director,
        tuning,
        viewport,
        time,
        rng,
        events,
        ..
    } = state;

    let mut frame = Frame {
        input,
        now: *time,
        dt,
        viewport: *viewport,
        tuning,
        rng,
        events,
    };
    registry.update(&mut frame)?;
    director.update(registry, player, &mut frame)
}

/// Accumulates host time and hands out fixed simulation steps
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    accumulator: f64,
    step: f64,
    max_substeps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(step: f64, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Add `elapsed` seconds of host time; returns how many steps to run now
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Demo pilot: plays the game from the current state
///
/// Starts games from the title, turns toward the nearest threat while firing,
/// and jumps to hyperspace when something gets too close. After a game over it
/// backs out to the title so the next frame starts a new run.
pub fn autopilot(state: &GameState, previous: &Controls) -> Controls {
    match state.phase {
        GamePhase::Title => Controls {
            fire: true,
            ..Default::default()
        },
        GamePhase::Help | GamePhase::Paused | GamePhase::GameOver => Controls {
            // Release between presses so Back registers as an edge
            back: !previous.back,
            ..Default::default()
        },
        GamePhase::Playing => {
            let Some(craft) = state.registry.get(state.player_id()) else {
                return Controls::default();
            };
            let origin = craft.body.center();
            let threat = state
                .registry
                .iter()
                .filter(|e| {
                    matches!(
                        e.tag(),
                        EntityTag::Asteroid | EntityTag::EnemyShip | EntityTag::EnemyBullet
                    )
                })
                .map(|e| e.body.center() - origin)
                .min_by(|a, b| a.length().total_cmp(&b.length()));

            let Some(offset) = threat else {
                return Controls {
                    forward: true,
                    ..Default::default()
                };
            };

            let heading = crate::heading(craft.body.kin.rotation);
            let cross = heading.perp_dot(offset.normalize_or(Vec2::X));
            Controls {
                left: cross < -0.05,
                right: cross > 0.05,
                fire: true,
                hyperspace: offset.length() < DEMO_PANIC_RADIUS && !previous.hyperspace,
                ..Default::default()
            }
        }
    }
}
