//! Abstract input snapshot
//!
//! The host maps keyboard/gamepad state onto logical controls once per frame;
//! the simulation only sees held state and rising edges.

use serde::{Deserialize, Serialize};

/// Logical controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    Left,
    Right,
    Forward,
    Fire,
    Hyperspace,
    /// Pause / back / exit
    Back,
    Help,
}

/// Held state of every control for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub fire: bool,
    pub hyperspace: bool,
    pub back: bool,
    pub help: bool,
}

impl Controls {
    pub fn is_down(&self, control: Control) -> bool {
        match control {
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Forward => self.forward,
            Control::Fire => self.fire,
            Control::Hyperspace => self.hyperspace,
            Control::Back => self.back,
            Control::Help => self.help,
        }
    }
}

/// Input commands for a single tick: this frame's controls plus last frame's
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub current: Controls,
    pub previous: Controls,
}

impl TickInput {
    /// Snapshot with no history (nothing counts as held last frame)
    pub fn pressed(current: Controls) -> Self {
        Self {
            current,
            previous: Controls::default(),
        }
    }

    /// Roll the snapshot forward: current becomes previous
    pub fn advance(&mut self, next: Controls) {
        self.previous = self.current;
        self.current = next;
    }

    pub fn held(&self, control: Control) -> bool {
        self.current.is_down(control)
    }

    /// Down this frame and up last frame
    pub fn just_pressed(&self, control: Control) -> bool {
        self.current.is_down(control) && !self.previous.is_down(control)
    }
}
