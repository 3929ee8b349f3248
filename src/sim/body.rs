//! Simulated entity body: kinematics + animation + screen wrap + geometry
//!
//! Every entity kind in the arena owns one `Body`. Frame width/height come
//! from the sprite strip at setup and fix both the bounding box and the
//! collision radius.

use glam::Vec2;

use super::animation::AnimationTimer;
use super::kinematics::Kinematics;
use crate::content::ContentSource;
use crate::error::Result;

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        other.x < self.right()
            && self.x < other.right()
            && other.y < self.bottom()
            && self.y < other.bottom()
    }

    pub fn contains(&self, other: &Rect) -> bool {
        self.x <= other.x
            && other.right() <= self.right()
            && self.y <= other.y
            && other.bottom() <= self.bottom()
    }
}

/// Visible arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Per-kind animation playback parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    pub frame_time_ms: f32,
    pub looping: bool,
}

impl Playback {
    pub const fn looping(frame_time_ms: f32) -> Self {
        Self {
            frame_time_ms,
            looping: true,
        }
    }

    pub const fn once(frame_time_ms: f32) -> Self {
        Self {
            frame_time_ms,
            looping: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub kin: Kinematics,
    pub animation: AnimationTimer,
    /// Teleport across viewport edges instead of leaving the screen
    pub wrap: bool,
    sprite: &'static str,
    playback: Playback,
    frame_width: u32,
    frame_height: u32,
    wrap_count: u32,
    initialized: bool,
}

impl Body {
    pub fn new(sprite: &'static str, playback: Playback, kin: Kinematics, wrap: bool) -> Self {
        Self {
            kin,
            animation: AnimationTimer::default(),
            wrap,
            sprite,
            playback,
            frame_width: 0,
            frame_height: 0,
            wrap_count: 0,
            initialized: false,
        }
    }

    /// Resolve the sprite strip and start the animation; later calls are no-ops
    pub fn initialize_once(&mut self, content: &dyn ContentSource) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        let info = content.sprite(self.sprite)?;
        self.frame_width = info.frame_width;
        self.frame_height = info.frame_height;
        self.animation
            .initialize(info.frames, self.playback.frame_time_ms, self.playback.looping);
        self.wrap_count = 0;
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn sprite(&self) -> &'static str {
        self.sprite
    }

    pub fn position(&self) -> Vec2 {
        self.kin.position
    }

    pub fn width(&self) -> u32 {
        self.frame_width
    }

    pub fn height(&self) -> u32 {
        self.frame_height
    }

    pub fn wrap_count(&self) -> u32 {
        self.wrap_count
    }

    /// Advance the animation by `dt` seconds, then drift by the current velocity
    pub fn update(&mut self, dt: f64, viewport: &Viewport) -> Result<()> {
        self.animation.advance((dt * 1000.0) as f32)?;
        let v = self.kin.velocity;
        self.move_by(v.x, v.y, viewport);
        Ok(())
    }

    /// Translate, then wrap into the viewport if enabled
    pub fn move_by(&mut self, dx: f32, dy: f32, viewport: &Viewport) {
        self.kin.translate(dx, dy);
        if !self.wrap {
            return;
        }

        let before = self.kin.position;
        let mut p = before;
        if p.x <= 0.0 {
            p.x = viewport.width - 1.0;
        }
        if p.y <= 0.0 {
            p.y = viewport.height - 1.0;
        }
        p.x %= viewport.width;
        p.y %= viewport.height;
        self.kin.position = p;

        if p != before {
            self.wrap_count += 1;
        }
    }

    /// Bounding box at the (truncated) position with the frame size
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.kin.position.x.trunc(),
            self.kin.position.y.trunc(),
            self.frame_width as f32,
            self.frame_height as f32,
        )
    }

    /// Reference point for collisions and muzzle placement: position minus half
    /// the frame size (integer halves)
    pub fn center(&self) -> Vec2 {
        self.kin.position
            - Vec2::new((self.frame_width / 2) as f32, (self.frame_height / 2) as f32)
    }

    /// Half the larger frame dimension (integer halves)
    pub fn radius(&self) -> f32 {
        (self.frame_width.max(self.frame_height) / 2) as f32
    }

    pub fn is_offscreen(&self, viewport: &Viewport) -> bool {
        let bounds = self.bounds();
        let view = viewport.bounds();
        !view.intersects(&bounds) && !view.contains(&bounds)
    }

    /// True when the centers are closer than either radius (not their sum)
    pub fn check_collision(&self, other: &Body) -> bool {
        let distance = self.center().distance(other.center()).abs();
        distance < self.radius() || distance < other.radius()
    }
}
