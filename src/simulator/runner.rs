//! Generation-by-generation training driver.
//!
//! `Trainer` owns the genomes and the RNG between generations; the caller owns
//! each `Simulation` while it runs, so the headless runner and the watch-mode
//! UI step the same engine.

use super::config::{TrainConfig, TrainConfigError};
use super::report::{GenerationStats, TrainingReport};
use crate::evolution::{initial_population, next_generation, Genome};
use crate::flappy::{GenerationOutcome, Simulation, SpriteSet};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Breeds genomes and hands out one simulation per generation.
#[derive(Debug)]
pub struct Trainer {
    config: TrainConfig,
    sprites: SpriteSet,
    rng: ChaCha8Rng,
    genomes: Vec<Genome>,
    generation: u32,
    history: Vec<GenerationStats>,
    best: Option<(f64, Genome)>,
    best_score: u32,
    solved: bool,
}

impl Trainer {
    pub fn new(config: TrainConfig) -> Result<Self, TrainConfigError> {
        Self::with_sprites(config, SpriteSet::default())
    }

    pub fn with_sprites(config: TrainConfig, sprites: SpriteSet) -> Result<Self, TrainConfigError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let genomes = initial_population(&config.evolution, &mut rng);
        Ok(Self {
            config,
            sprites,
            rng,
            genomes,
            generation: 0,
            history: Vec::new(),
            best: None,
            best_score: 0,
            solved: false,
        })
    }

    /// Spawn the next generation's world from the current genomes.
    pub fn start_generation(&mut self) -> Simulation<Genome> {
        self.generation += 1;
        let genomes = std::mem::take(&mut self.genomes);
        Simulation::new(
            self.config.sim.clone(),
            self.sprites.clone(),
            genomes,
            self.generation,
            &mut self.rng,
        )
    }

    /// Record a finished generation and breed its successors.
    pub fn finish_generation(&mut self, outcome: GenerationOutcome<Genome>) -> GenerationStats {
        let stats = GenerationStats::from_outcome(&outcome);
        self.best_score = self.best_score.max(outcome.score);

        if let Some(best) = outcome.best() {
            let improved = self
                .best
                .as_ref()
                .map_or(true, |(fitness, _)| best.fitness > *fitness);
            if improved {
                self.best = Some((best.fitness, best.controller.clone()));
            }
            if best.fitness >= self.config.evolution.fitness_threshold {
                log::info!(
                    "generation {} reached fitness threshold {:.1} ({:.1})",
                    outcome.generation,
                    self.config.evolution.fitness_threshold,
                    best.fitness
                );
                self.solved = true;
            }
        }

        log::info!(
            "generation {}: score {}, best {:.1}, mean {:.1}",
            stats.generation,
            stats.score,
            stats.best_fitness,
            stats.mean_fitness
        );

        self.genomes = next_generation(&outcome.members, &self.config.evolution, &mut self.rng);
        self.history.push(stats.clone());
        stats
    }

    /// Whether the threshold was met or the generation budget is spent.
    pub fn is_done(&self) -> bool {
        self.solved || self.generation >= self.config.generations
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.best.as_ref().map(|(fitness, _)| *fitness)
    }

    pub fn into_report(self) -> TrainingReport {
        let (best_fitness, best_genome) = match self.best {
            Some((fitness, genome)) => (fitness, Some(genome)),
            None => (0.0, None),
        };
        TrainingReport {
            generations: self.history,
            best_fitness,
            best_score: self.best_score,
            best_genome,
            solved: self.solved,
            seed: self.config.seed,
        }
    }
}

/// Run headless training and return a report.
pub fn run_training(config: &TrainConfig) -> Result<TrainingReport, TrainConfigError> {
    let mut trainer = Trainer::new(config.clone())?;
    let max_ticks = config.max_ticks_per_generation;

    while !trainer.is_done() {
        let sim = trainer.start_generation();
        let outcome = sim.run_generation(trainer.rng_mut(), max_ticks);
        let stats = trainer.finish_generation(outcome);

        if config.verbosity >= 2 {
            println!(
                "Gen {}/{} - Score {}, Ticks {}, Best {:.1}, Mean {:.1}",
                stats.generation,
                config.generations,
                stats.score,
                stats.ticks,
                stats.best_fitness,
                stats.mean_fitness
            );
        }
    }

    Ok(trainer.into_report())
}
