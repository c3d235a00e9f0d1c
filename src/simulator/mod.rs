//! Headless multi-generation training.
//!
//! Runs the simulation generation after generation, breeding controllers
//! between runs, and summarizes the run as text or JSON.

mod config;
mod report;
mod runner;

pub use config::{TrainConfig, TrainConfigError};
pub use report::{GenerationStats, TrainingReport};
pub use runner::{run_training, Trainer};
