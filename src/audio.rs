//! Audio requests and volume mixing
//!
//! The simulation only emits [`GameEvent`]s; the manager turns them into
//! named playback requests for whatever [`AudioSink`] the host provides.
//! Music is best effort: a sink that cannot play it is logged and ignored so a
//! session can run without audio hardware.

use crate::content::names;
use crate::error::Result;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player or enemy fires
    Laser,
    /// Asteroid or ship destroyed
    Explosion,
}

impl SoundEffect {
    pub fn asset(self) -> &'static str {
        match self {
            SoundEffect::Laser => names::SOUND_LASER,
            SoundEffect::Explosion => names::SOUND_EXPLOSION,
        }
    }
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    Game,
}

impl MusicTrack {
    pub fn asset(self) -> &'static str {
        match self {
            MusicTrack::Menu => names::MUSIC_MENU,
            MusicTrack::Game => names::MUSIC_GAME,
        }
    }
}

/// Host-side playback
pub trait AudioSink {
    fn play_sound(&mut self, name: &str, volume: f32) -> Result<()>;

    /// Start a looping track, replacing the current one
    fn play_music(&mut self, name: &str, volume: f32) -> Result<()>;
}

/// Sink for headless runs: accepts everything and plays nothing
#[derive(Debug, Default)]
pub struct NullAudio {
    pub sounds: u64,
    pub tracks: u64,
}

impl AudioSink for NullAudio {
    fn play_sound(&mut self, name: &str, volume: f32) -> Result<()> {
        log::trace!("sound {name} @ {volume:.2}");
        self.sounds += 1;
        Ok(())
    }

    fn play_music(&mut self, name: &str, volume: f32) -> Result<()> {
        log::debug!("music {name} @ {volume:.2}");
        self.tracks += 1;
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    pub fn from_settings(sink: S, settings: &Settings) -> Self {
        let mut manager = Self::new(sink);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_music_volume(settings.music_volume);
        manager.set_muted(settings.muted);
        manager
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect; sink failures are returned
    pub fn play(&mut self, effect: SoundEffect) -> Result<()> {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return Ok(());
        }
        self.sink.play_sound(effect.asset(), vol)
    }

    /// Switch the background track; failures are logged and dropped
    pub fn play_music(&mut self, track: MusicTrack) {
        let vol = self.effective_volume(self.music_volume);
        if let Err(err) = self.sink.play_music(track.asset(), vol) {
            log::warn!("music {track:?} unavailable: {err}");
        }
    }

    /// Forward every audio event of a frame
    pub fn dispatch(&mut self, events: &[GameEvent]) -> Result<()> {
        for event in events {
            match *event {
                GameEvent::Sound(effect) => self.play(effect)?,
                GameEvent::Music(track) => self.play_music(track),
                _ => {}
            }
        }
        Ok(())
    }
}
