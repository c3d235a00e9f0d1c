//! Training run configuration.

use crate::core::config::{ConfigError, SimConfig};
use crate::core::constants::DEFAULT_GENERATIONS;
use crate::evolution::{EvolutionConfig, EvolutionError};

/// Configuration for a multi-generation training run.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Generations to run before giving up on the fitness threshold
    pub generations: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Tick budget per generation (None = run until extinction)
    pub max_ticks_per_generation: Option<u64>,

    /// World and scoring parameters
    pub sim: SimConfig,

    /// Breeding parameters
    pub evolution: EvolutionConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per generation)
    pub verbosity: u8,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            generations: DEFAULT_GENERATIONS,
            seed: None,
            max_ticks_per_generation: Some(20_000),
            sim: SimConfig::default(),
            evolution: EvolutionConfig::default(),
            verbosity: 1,
        }
    }
}

impl TrainConfig {
    /// Short, seeded run for smoke testing.
    pub fn quick(seed: u64) -> Self {
        Self {
            generations: 5,
            seed: Some(seed),
            max_ticks_per_generation: Some(2_000),
            evolution: EvolutionConfig {
                population_size: 20,
                ..Default::default()
            },
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Validate the world and breeding parameters together.
    pub fn validate(&self) -> Result<(), TrainConfigError> {
        self.sim.validate()?;
        self.evolution.validate()?;
        if self.generations == 0 {
            return Err(TrainConfigError::NoGenerations);
        }
        Ok(())
    }
}

/// Problems found in a [`TrainConfig`].
#[derive(Debug, thiserror::Error)]
pub enum TrainConfigError {
    #[error(transparent)]
    Sim(#[from] ConfigError),
    #[error(transparent)]
    Evolution(#[from] EvolutionError),
    #[error("At least one generation is required")]
    NoGenerations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TrainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_quick_is_seeded_and_small() {
        let config = TrainConfig::quick(11);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.evolution.population_size, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_errors_bubble_up_from_parts() {
        let mut config = TrainConfig::default();
        config.sim.gap_top_max = config.sim.gap_top_min;
        assert!(matches!(
            config.validate(),
            Err(TrainConfigError::Sim(ConfigError::DegenerateGapRange { .. }))
        ));

        let mut config = TrainConfig::default();
        config.evolution.population_size = 0;
        assert!(matches!(
            config.validate(),
            Err(TrainConfigError::Evolution(EvolutionError::EmptyPopulation))
        ));

        let config = TrainConfig {
            generations: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TrainConfigError::NoGenerations)
        ));
    }
}
