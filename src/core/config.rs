//! Simulation configuration.
//!
//! Every value defaults to the fixed constants in [`crate::core::constants`].
//! A JSON file can override any subset of them; validation happens once when
//! the configuration is loaded, never during a tick.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Vertical motion and tilt parameters for a bird.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Kinematics {
    /// Velocity assigned on a jump (negative = upward).
    pub jump_velocity: f64,
    /// Quadratic term of the per-tick displacement.
    pub acceleration: f64,
    /// Largest downward displacement in a single tick.
    pub terminal_displacement: f64,
    /// Extra upward displacement applied while ascending.
    pub ascent_boost: f64,
    pub max_tilt: f64,
    pub tilt_rate: f64,
    pub min_tilt: f64,
    /// Birds within this distance below their jump height keep the nose up.
    pub tilt_hold_margin: f64,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self {
            jump_velocity: JUMP_VELOCITY,
            acceleration: FALL_ACCELERATION,
            terminal_displacement: TERMINAL_DISPLACEMENT,
            ascent_boost: ASCENT_BOOST,
            max_tilt: MAX_TILT,
            tilt_rate: TILT_RATE,
            min_tilt: MIN_TILT,
            tilt_hold_margin: TILT_HOLD_MARGIN,
        }
    }
}

/// World, scoring, and physics configuration for one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// World y of the floor's upper edge.
    pub floor_y: i32,
    pub floor_segment_width: i32,

    pub bird_spawn_x: i32,
    pub bird_spawn_y: f64,
    pub first_pipe_x: i32,
    /// X at which a replacement pipe appears after a pass.
    pub pipe_spawn_x: i32,

    /// Pixels per tick that pipes and floor scroll left.
    pub pipe_velocity: i32,
    /// Vertical opening between the top and bottom pipe.
    pub gap_size: i32,
    /// Inclusive lower bound of the randomized gap top.
    pub gap_top_min: i32,
    /// Exclusive upper bound of the randomized gap top.
    pub gap_top_max: i32,

    pub survival_reward: f64,
    pub pass_reward: f64,
    pub collision_penalty: f64,
    /// Controller outputs strictly above this value trigger a jump.
    pub jump_threshold: f64,

    /// Test collisions against the bird's silhouette rotated by its tilt.
    pub rotate_bird_mask: bool,
    pub ticks_per_second: u32,

    pub kinematics: Kinematics,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            floor_y: FLOOR_Y,
            floor_segment_width: FLOOR_SEGMENT_WIDTH,
            bird_spawn_x: BIRD_SPAWN_X,
            bird_spawn_y: BIRD_SPAWN_Y,
            first_pipe_x: FIRST_PIPE_X,
            pipe_spawn_x: PIPE_SPAWN_X,
            pipe_velocity: PIPE_VELOCITY,
            gap_size: PIPE_GAP,
            gap_top_min: GAP_TOP_MIN,
            gap_top_max: GAP_TOP_MAX,
            survival_reward: SURVIVAL_REWARD,
            pass_reward: PASS_REWARD,
            collision_penalty: COLLISION_PENALTY,
            jump_threshold: JUMP_THRESHOLD,
            rotate_bird_mask: true,
            ticks_per_second: TICKS_PER_SECOND,
            kinematics: Kinematics::default(),
        }
    }
}

impl SimConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a playable world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::InvalidWindow);
        }
        if self.floor_y <= 0 || i64::from(self.floor_y) > i64::from(self.window_height) {
            return Err(ConfigError::FloorOutOfWindow {
                floor_y: self.floor_y,
                window_height: self.window_height,
            });
        }
        if self.gap_size <= 0 {
            return Err(ConfigError::InvalidGapSize(self.gap_size));
        }
        if self.gap_top_min >= self.gap_top_max {
            return Err(ConfigError::DegenerateGapRange {
                min: self.gap_top_min,
                max: self.gap_top_max,
            });
        }
        let lowest_gap_bottom = i64::from(self.gap_top_max) - 1 + i64::from(self.gap_size);
        if lowest_gap_bottom > i64::from(self.floor_y) {
            return Err(ConfigError::GapBelowFloor {
                lowest_gap_bottom,
                floor_y: self.floor_y,
            });
        }
        if self.pipe_velocity <= 0 {
            return Err(ConfigError::InvalidPipeVelocity(self.pipe_velocity));
        }
        if self.floor_segment_width <= 0 {
            return Err(ConfigError::InvalidFloorSegment(self.floor_segment_width));
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::InvalidTickRate);
        }
        if !(self.kinematics.terminal_displacement > 0.0) {
            return Err(ConfigError::InvalidTerminalDisplacement(
                self.kinematics.terminal_displacement,
            ));
        }
        Ok(())
    }
}

/// Configuration validation and loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Window dimensions must be non-zero")]
    InvalidWindow,
    #[error("Floor y {floor_y} lies outside the window (height {window_height})")]
    FloorOutOfWindow { floor_y: i32, window_height: u32 },
    #[error("Pipe gap must be positive, got {0}")]
    InvalidGapSize(i32),
    #[error("Gap top range [{min}, {max}) is empty")]
    DegenerateGapRange { min: i32, max: i32 },
    #[error("Lowest possible gap bottom {lowest_gap_bottom} is below the floor at {floor_y}")]
    GapBelowFloor { lowest_gap_bottom: i64, floor_y: i32 },
    #[error("Pipe velocity must be positive, got {0}")]
    InvalidPipeVelocity(i32),
    #[error("Floor segment width must be positive, got {0}")]
    InvalidFloorSegment(i32),
    #[error("Tick rate must be non-zero")]
    InvalidTickRate,
    #[error("Terminal displacement must be positive, got {0}")]
    InvalidTerminalDisplacement(f64),
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
