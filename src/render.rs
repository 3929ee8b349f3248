//! Draw requests handed to an external renderer
//!
//! The simulation never touches textures. Each frame it describes what should
//! be on screen as a list of [`DrawRequest`]s pushed into a [`DrawSink`].

use glam::Vec2;

use crate::sim::GamePhase;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawRequest {
    /// One frame of a sprite strip, rotated about its center
    Sprite {
        sprite: &'static str,
        frame: u32,
        position: Vec2,
        /// Degrees
        rotation: f32,
        width: u32,
        height: u32,
    },
    /// Score/lives overlay while playing
    Hud { score: u64, lives: u32 },
    /// Full-screen menu for a non-playing phase
    Screen { phase: GamePhase, score: u64 },
}

/// Receives draw requests in back-to-front order
pub trait DrawSink {
    fn draw(&mut self, request: DrawRequest);
}

/// Sink that just records requests (headless runs and tests)
#[derive(Debug, Default)]
pub struct DrawList {
    pub requests: Vec<DrawRequest>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.requests.clear();
    }

    pub fn sprite_count(&self) -> usize {
        self.requests
            .iter()
            .filter(|r| matches!(r, DrawRequest::Sprite { .. }))
            .count()
    }
}

impl DrawSink for DrawList {
    fn draw(&mut self, request: DrawRequest) {
        self.requests.push(request);
    }
}
