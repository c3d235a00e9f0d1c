//! Scrolling floor made of two tiling segments.

use crate::core::config::SimConfig;

/// The ground strip. Only `y` matters to the simulation; the segment
/// offsets exist for renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Floor {
    pub y: i32,
    pub x1: i32,
    pub x2: i32,
    pub width: i32,
    pub velocity: i32,
}

impl Floor {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            y: config.floor_y,
            x1: 0,
            x2: config.floor_segment_width,
            width: config.floor_segment_width,
            velocity: config.pipe_velocity,
        }
    }

    /// Scroll both segments, wrapping one behind the other once it leaves
    /// the screen.
    pub fn advance(&mut self) {
        self.x1 -= self.velocity;
        self.x2 -= self.velocity;

        if self.x1 + self.width < 0 {
            self.x1 = self.x2 + self.width;
        }
        if self.x2 + self.width < 0 {
            self.x2 = self.x1 + self.width;
        }
    }

    /// Horizontal scroll phase in `[0, width)`.
    pub fn phase(&self) -> i32 {
        (-self.x1.min(self.x2)).rem_euclid(self.width)
    }
}
