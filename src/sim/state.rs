//! Session state
//!
//! Everything a running game owns: the phase, the live entities, the
//! director, the seeded RNG and the events produced since the host last
//! drained them.

use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Viewport;
use super::director::Director;
use super::entity::{Entity, EntityId, Kind};
use super::player::PlayerState;
use super::registry::Registry;
use crate::audio::{MusicTrack, SoundEffect};
use crate::content::{ContentSource, names};
use crate::error::Result;
use crate::render::{DrawRequest, DrawSink};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    Title,
    /// Controls help screen
    Help,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Out of lives
    GameOver,
}

impl GamePhase {
    /// Track that should be playing while in this phase
    pub fn music(self) -> MusicTrack {
        match self {
            GamePhase::Playing => MusicTrack::Game,
            _ => MusicTrack::Menu,
        }
    }
}

/// Things the host should react to (audio, effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundEffect),
    Music(MusicTrack),
    ExtraLife,
    GameOver,
}

#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub registry: Registry,
    pub director: Director,
    pub tuning: Tuning,
    pub viewport: Viewport,
    /// Seconds since the session started (monotonic)
    pub time: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set when the title screen asks to quit
    pub exit_requested: bool,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    player: EntityId,
    music: Option<MusicTrack>,
}

impl GameState {
    /// A session sitting on the title screen with a game already set up
    pub fn new(settings: &Settings, content: Rc<dyn ContentSource>) -> Result<Self> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        let tuning = settings.tuning.clone();
        let mut state = Self {
            seed,
            phase: GamePhase::Title,
            registry: Registry::new(content),
            director: Director::new(&tuning),
            tuning,
            viewport: settings.viewport(),
            time: 0.0,
            time_ticks: 0,
            exit_requested: false,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            player: EntityId::UNASSIGNED,
            music: None,
        };
        log::info!("session seed {seed}");
        state.new_game()?;
        state.set_phase(GamePhase::Title);
        Ok(state)
    }

    /// Wipe the arena and start over with a fresh craft
    pub fn new_game(&mut self) -> Result<()> {
        self.registry.clear();
        self.director.reset(&self.tuning, self.time);

        let backdrop = names::BACKGROUNDS[self.rng.random_range(0..names::BACKGROUNDS.len())];
        self.registry.add(Entity::background(backdrop))?;

        let mut craft = Entity::player(&self.tuning);
        if let Entity {
            body,
            kind: Kind::Player(state),
            ..
        } = &mut craft
        {
            state.respawn(body, self.time, &self.viewport);
        }
        self.player = self.registry.add(craft)?;
        log::info!("new game ({backdrop})");
        Ok(())
    }

    /// Change phase, requesting the matching music track when it differs
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("phase {:?} -> {phase:?}", self.phase);
        }
        self.phase = phase;
        let track = phase.music();
        if self.music != Some(track) {
            self.music = Some(track);
            self.events.push(GameEvent::Music(track));
        }
    }

    pub fn player_id(&self) -> EntityId {
        self.player
    }

    pub fn player(&self) -> Option<&PlayerState> {
        self.registry.get(self.player).and_then(Entity::as_player)
    }

    pub fn player_alive(&self) -> bool {
        self.player().is_some_and(PlayerState::alive)
    }

    pub fn score(&self) -> u64 {
        self.player().map_or(0, |p| p.score)
    }

    pub fn lives(&self) -> u32 {
        self.player().map_or(0, |p| p.lives)
    }

    /// Events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Describe the current frame to the renderer
    pub fn draw(&self, sink: &mut dyn DrawSink) -> Result<()> {
        match self.phase {
            GamePhase::Playing => {
                self.registry.draw(sink)?;
                sink.draw(DrawRequest::Hud {
                    score: self.score(),
                    lives: self.lives(),
                });
            }
            GamePhase::Paused => {
                self.registry.draw(sink)?;
                sink.draw(DrawRequest::Screen {
                    phase: self.phase,
                    score: self.score(),
                });
            }
            GamePhase::Title | GamePhase::Help | GamePhase::GameOver => {
                sink.draw(DrawRequest::Screen {
                    phase: self.phase,
                    score: self.score(),
                });
            }
        }
        Ok(())
    }
}
