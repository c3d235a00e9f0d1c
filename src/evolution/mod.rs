//! Minimal neuro-evolution used to drive the simulation.
//!
//! The simulation only needs controllers and reports fitness back; this
//! module is one such optimizer: a fixed-topology genome bred with elitism,
//! truncation selection, uniform crossover, and gaussian mutation.

pub mod genome;

pub use genome::Genome;

use crate::core::constants::{DEFAULT_FITNESS_THRESHOLD, DEFAULT_POPULATION_SIZE};
use crate::flappy::Evaluated;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Breeding parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    /// Best genomes copied unchanged into the next generation.
    pub elitism: usize,
    /// Fraction of the ranked population allowed to reproduce.
    pub survival_threshold: f64,
    /// Probability that each gene is perturbed.
    pub mutation_rate: f64,
    /// Standard deviation of a perturbation.
    pub mutation_power: f64,
    /// Standard deviation of initial genes.
    pub init_stdev: f64,
    /// Training stops once any genome reaches this fitness.
    pub fitness_threshold: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            elitism: 2,
            survival_threshold: 0.2,
            mutation_rate: 0.8,
            mutation_power: 0.5,
            init_stdev: 1.0,
            fitness_threshold: DEFAULT_FITNESS_THRESHOLD,
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<(), EvolutionError> {
        if self.population_size == 0 {
            return Err(EvolutionError::EmptyPopulation);
        }
        if self.elitism > self.population_size {
            return Err(EvolutionError::TooManyElites {
                elitism: self.elitism,
                population: self.population_size,
            });
        }
        if !(self.survival_threshold > 0.0 && self.survival_threshold <= 1.0) {
            return Err(EvolutionError::InvalidSurvivalThreshold(
                self.survival_threshold,
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvolutionError::InvalidMutationRate(self.mutation_rate));
        }
        if !self.mutation_power.is_finite() || !self.init_stdev.is_finite() {
            return Err(EvolutionError::NonFiniteDeviation);
        }
        Ok(())
    }
}

/// Evolution parameter errors.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("Population size must be at least 1")]
    EmptyPopulation,
    #[error("Elitism {elitism} exceeds population size {population}")]
    TooManyElites { elitism: usize, population: usize },
    #[error("Survival threshold must be in (0, 1], got {0}")]
    InvalidSurvivalThreshold(f64),
    #[error("Mutation rate must be in [0, 1], got {0}")]
    InvalidMutationRate(f64),
    #[error("Mutation power and initial deviation must be finite")]
    NonFiniteDeviation,
}

/// A fresh random population.
pub fn initial_population<R: Rng>(config: &EvolutionConfig, rng: &mut R) -> Vec<Genome> {
    (0..config.population_size)
        .map(|_| Genome::random(rng, config.init_stdev))
        .collect()
}

/// Breed the next generation from evaluated genomes.
pub fn next_generation<R: Rng>(
    evaluated: &[Evaluated<Genome>],
    config: &EvolutionConfig,
    rng: &mut R,
) -> Vec<Genome> {
    if evaluated.is_empty() {
        return initial_population(config, rng);
    }

    let mut ranked: Vec<&Evaluated<Genome>> = evaluated.iter().collect();
    ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

    let mut next = Vec::with_capacity(config.population_size);
    for elite in ranked.iter().take(config.elitism.min(config.population_size)) {
        next.push(elite.controller.clone());
    }

    let parents = ((ranked.len() as f64 * config.survival_threshold).ceil() as usize)
        .clamp(1, ranked.len());
    while next.len() < config.population_size {
        let a = &ranked[rng.gen_range(0..parents)].controller;
        let b = &ranked[rng.gen_range(0..parents)].controller;
        let mut child = a.crossover(b, rng);
        child.mutate(rng, config.mutation_rate, config.mutation_power);
        next.push(child);
    }
    next
}
