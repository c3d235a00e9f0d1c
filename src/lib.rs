//! Flappy Evolve - population simulation and pixel-accurate collision for
//! neuro-evolved Flappy Bird controllers.
//!
//! This module exposes the engine and the headless trainer for testing and
//! external use.

pub mod brain;
pub mod build_info;
pub mod core;
pub mod evolution;
pub mod flappy;
pub mod simulator;

// UI module lives in the binary as it's tightly coupled to the terminal
