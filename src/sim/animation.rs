//! Frame-index progression driven by elapsed time
//!
//! Pure timing state. Renderers read `frame()` and `is_active()`; nothing here
//! touches textures.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationTimer {
    elapsed_ms: f32,
    frame_time_ms: f32,
    frame_count: u32,
    current_frame: u32,
    looping: bool,
    active: bool,
    initialized: bool,
}

impl AnimationTimer {
    /// One-time setup; starts the sequence at frame 0 and activates it
    pub fn initialize(&mut self, frame_count: u32, frame_time_ms: f32, looping: bool) {
        self.elapsed_ms = 0.0;
        self.frame_time_ms = frame_time_ms;
        self.frame_count = frame_count.max(1);
        self.current_frame = 0;
        self.looping = looping;
        self.active = true;
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// False once a non-looping sequence has played through
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Advance by `dt_ms` milliseconds
    pub fn advance(&mut self, dt_ms: f32) -> Result<()> {
        if !self.initialized {
            return Err(Error::AnimationNotInitialized { operation: "updating" });
        }
        if !self.active {
            return Ok(());
        }

        self.elapsed_ms += dt_ms;
        if self.elapsed_ms > self.frame_time_ms {
            self.current_frame += 1;
            if self.current_frame == self.frame_count {
                self.current_frame = 0;
                if !self.looping {
                    self.active = false;
                }
            }
            self.elapsed_ms = 0.0;
        }
        Ok(())
    }

    /// Frame index to draw
    pub fn frame(&self) -> Result<u32> {
        if !self.initialized {
            return Err(Error::AnimationNotInitialized { operation: "drawing" });
        }
        Ok(self.current_frame)
    }
}
