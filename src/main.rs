//! Headless native runner
//!
//! Plays a session with the demo pilot at a simulated 60 Hz host rate, feeding
//! draw and audio requests to recording sinks, then logs the outcome.
//!
//! Usage: `captain-asteroids [settings.json] [frames]`

use std::path::Path;
use std::rc::Rc;

use captain_asteroids::Settings;
use captain_asteroids::audio::{AudioManager, NullAudio};
use captain_asteroids::content::SpriteAtlas;
use captain_asteroids::render::DrawList;
use captain_asteroids::sim::{FrameClock, GameState, TickInput, autopilot, tick};

/// Host frames to simulate when none are given
const DEFAULT_FRAMES: u64 = 60 * 120;

/// Host frame length fed to the clock (60 Hz display)
const HOST_FRAME: f64 = 1.0 / 60.0;

fn run() -> captain_asteroids::Result<()> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let frames = args
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut state = GameState::new(&settings, Rc::new(SpriteAtlas::builtin()))?;
    let mut audio = AudioManager::from_settings(NullAudio::default(), &settings);
    let mut clock = FrameClock::default();
    let mut input = TickInput::default();
    let mut canvas = DrawList::default();
    let mut peak_sprites = 0;

    for _ in 0..frames {
        for _ in 0..clock.advance(HOST_FRAME) {
            let next = autopilot(&state, &input.current);
            input.advance(next);
            tick(&mut state, &input, clock.step())?;
        }
        audio.dispatch(&state.drain_events())?;

        canvas.clear();
        state.draw(&mut canvas)?;
        peak_sprites = peak_sprites.max(canvas.sprite_count());

        if state.exit_requested {
            break;
        }
    }

    log::info!(
        "finished after {:.1}s: phase {:?}, score {}, lives {}, {} entities (peak {} sprites)",
        state.time,
        state.phase,
        state.score(),
        state.lives(),
        state.registry.len(),
        peak_sprites,
    );
    log::info!(
        "audio requests: {} sounds, {} music changes",
        audio.sink().sounds,
        audio.sink().tracks
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Captain Asteroids (headless) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
