//! Controller interface between the simulation and whatever decides when a
//! bird jumps.

use serde::{Deserialize, Serialize};

/// What a controller sees each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Bird's vertical position.
    pub y: f64,
    /// Distance to the upper edge of the gap ahead.
    pub gap_top_distance: f64,
    /// Distance to the lower edge of the gap ahead.
    pub gap_bottom_distance: f64,
}

impl Observation {
    pub fn new(y: f64, gap_top: i32, gap_bottom: i32) -> Self {
        Self {
            y,
            gap_top_distance: (y - gap_top as f64).abs(),
            gap_bottom_distance: (y - gap_bottom as f64).abs(),
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.y, self.gap_top_distance, self.gap_bottom_distance]
    }
}

/// Decision-maker paired with one bird.
pub trait Controller {
    /// Scalar action for this tick. Values above the jump threshold jump.
    fn decide(&mut self, observation: &Observation) -> f64;
}

impl<F> Controller for F
where
    F: FnMut(&Observation) -> f64,
{
    fn decide(&mut self, observation: &Observation) -> f64 {
        self(observation)
    }
}

/// Controller that never jumps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl Controller for Idle {
    fn decide(&mut self, _observation: &Observation) -> f64 {
        0.0
    }
}

/// Interpret a controller output. Non-finite outputs never jump.
pub fn wants_jump(output: f64, threshold: f64) -> bool {
    output.is_finite() && output > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_distances_are_absolute() {
        let obs = Observation::new(300.0, 250, 450);
        assert_eq!(obs.as_array(), [300.0, 50.0, 150.0]);
        let above = Observation::new(100.0, 250, 450);
        assert_eq!(above.gap_top_distance, 150.0);
        assert_eq!(above.gap_bottom_distance, 350.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!wants_jump(0.5, 0.5));
        assert!(wants_jump(0.5001, 0.5));
        assert!(!wants_jump(-3.0, 0.5));
    }

    #[test]
    fn test_non_finite_output_is_no_jump() {
        assert!(!wants_jump(f64::NAN, 0.5));
        assert!(!wants_jump(f64::INFINITY, 0.5));
        assert!(!wants_jump(f64::NEG_INFINITY, 0.5));
    }

    #[test]
    fn test_closure_controller() {
        let mut calls = 0;
        let mut controller = |obs: &Observation| {
            calls += 1;
            if obs.gap_bottom_distance < 100.0 {
                1.0
            } else {
                0.0
            }
        };
        assert_eq!(controller.decide(&Observation::new(400.0, 250, 450)), 1.0);
        assert_eq!(controller.decide(&Observation::new(300.0, 250, 450)), 0.0);
        drop(controller);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_idle_never_jumps() {
        let mut idle = Idle;
        let out = idle.decide(&Observation::new(10.0, 0, 0));
        assert!(!wants_jump(out, 0.5));
    }
}
