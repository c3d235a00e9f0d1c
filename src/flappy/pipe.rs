//! Pipe generation, scrolling, and retirement.

use super::mask::SpriteSet;
use crate::core::config::SimConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A top/bottom pipe pair with a gap between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge.
    pub x: i32,
    /// Upper edge of the gap (mouth of the top pipe).
    pub gap_top: i32,
    /// Y of the top pipe sprite's upper edge.
    pub top: i32,
    /// Y of the bottom pipe sprite's upper edge, i.e. the gap's lower edge.
    pub bottom: i32,
    /// Whether a bird has already been credited for this pipe.
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: i32, gap_top: i32, gap_size: i32, pipe_height: i32) -> Self {
        Self {
            x,
            gap_top,
            top: gap_top - pipe_height,
            bottom: gap_top + gap_size,
            passed: false,
        }
    }

    /// Right edge.
    pub fn trailing_edge(&self, width: i32) -> i32 {
        self.x + width
    }
}

/// Live pipes in spawn order, which is also left-to-right order.
#[derive(Debug, Clone)]
pub struct PipeField {
    pipes: Vec<Pipe>,
    width: i32,
    height: i32,
    gap_size: i32,
    gap_top_min: i32,
    gap_top_max: i32,
    velocity: i32,
}

impl PipeField {
    pub fn new(config: &SimConfig, sprites: &SpriteSet) -> Self {
        Self {
            pipes: Vec::new(),
            width: sprites.pipe_width() as i32,
            height: sprites.pipe_height() as i32,
            gap_size: config.gap_size,
            gap_top_min: config.gap_top_min,
            gap_top_max: config.gap_top_max,
            velocity: config.pipe_velocity,
        }
    }

    /// Append a pipe at `x` with its gap top drawn uniformly from the
    /// configured range.
    pub fn spawn<R: Rng>(&mut self, x: i32, rng: &mut R) -> &Pipe {
        let gap_top = if self.gap_top_max > self.gap_top_min {
            rng.gen_range(self.gap_top_min..self.gap_top_max)
        } else {
            self.gap_top_min
        };
        self.push(Pipe::new(x, gap_top, self.gap_size, self.height));
        &self.pipes[self.pipes.len() - 1]
    }

    /// Append an already-built pipe.
    pub fn push(&mut self, pipe: Pipe) {
        self.pipes.push(pipe);
    }

    /// Build a pipe at `x` with a chosen gap top, using this field's geometry.
    pub fn make_pipe(&self, x: i32, gap_top: i32) -> Pipe {
        Pipe::new(x, gap_top, self.gap_size, self.height)
    }

    /// Scroll every pipe left by one tick.
    pub fn advance(&mut self) {
        for pipe in &mut self.pipes {
            pipe.x -= self.velocity;
        }
    }

    /// True once the pipe's trailing edge is past the left window edge.
    pub fn should_retire(&self, pipe: &Pipe) -> bool {
        pipe.trailing_edge(self.width) < 0
    }

    /// Drop off-screen pipes, keeping the rest in order. Returns how many
    /// were removed.
    pub fn retire_offscreen(&mut self) -> usize {
        let before = self.pipes.len();
        let width = self.width;
        self.pipes.retain(|p| p.trailing_edge(width) >= 0);
        before - self.pipes.len()
    }

    /// The first pipe a bird at `x` has not fully flown through yet.
    pub fn ahead_of(&self, x: i32) -> Option<&Pipe> {
        self.pipes
            .iter()
            .find(|p| x <= p.trailing_edge(self.width))
            .or_else(|| self.pipes.last())
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn pipes_mut(&mut self) -> &mut [Pipe] {
        &mut self.pipes
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    pub fn width(&self) -> i32 {
        self.width
    }
}
