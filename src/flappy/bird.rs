//! Bird kinematics: jump impulse, quadratic fall, and cosmetic tilt.

use crate::core::config::Kinematics;
use serde::{Deserialize, Serialize};

/// A single simulated bird.
///
/// The bird never moves horizontally; the world scrolls past it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Fixed horizontal position (left edge of the sprite).
    pub x: i32,
    /// Vertical position of the sprite's top edge.
    pub y: f64,
    /// Velocity set by the last jump (negative = upward).
    pub vel: f64,
    /// Ticks elapsed since the last jump.
    pub tick_count: u32,
    /// Display angle in degrees (positive = nose up). Cosmetic only.
    pub tilt: f64,
    /// The y at which the last jump happened.
    pub height: f64,
}

impl Bird {
    pub fn new(x: i32, y: f64) -> Self {
        Self {
            x,
            y,
            vel: 0.0,
            tick_count: 0,
            tilt: 0.0,
            height: y,
        }
    }

    /// Start a new jump arc from the current height.
    pub fn jump(&mut self, kinematics: &Kinematics) {
        self.vel = kinematics.jump_velocity;
        self.tick_count = 0;
        self.height = self.y;
    }

    /// Advance one tick. Returns the vertical displacement applied.
    pub fn advance(&mut self, kinematics: &Kinematics) -> f64 {
        self.tick_count += 1;
        let d = displacement(self.vel, self.tick_count, kinematics);
        self.y += d;

        if d < 0.0 || self.y < self.height + kinematics.tilt_hold_margin {
            if self.tilt < kinematics.max_tilt {
                self.tilt = kinematics.max_tilt;
            }
        } else if self.tilt > kinematics.min_tilt {
            self.tilt = (self.tilt - kinematics.tilt_rate).max(kinematics.min_tilt);
        }

        d
    }

    /// Row of the sprite's top edge in integer pixels.
    pub fn row(&self) -> i32 {
        self.y.round() as i32
    }
}

/// Displacement after `ticks` ticks of an arc that started with `vel`.
///
/// Downward motion is capped at the terminal displacement; upward motion gets
/// the ascent boost.
pub fn displacement(vel: f64, ticks: u32, kinematics: &Kinematics) -> f64 {
    let t = ticks as f64;
    let mut d = vel * t + kinematics.acceleration * t * t;
    if d >= kinematics.terminal_displacement {
        d = kinematics.terminal_displacement;
    }
    if d < 0.0 {
        d -= kinematics.ascent_boost;
    }
    d
}
