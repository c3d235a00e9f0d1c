//! Fixed-timestep simulation of one generation.

use super::bird::Bird;
use super::floor::Floor;
use super::mask::SpriteSet;
use super::pipe::{Pipe, PipeField};
use super::population::{CullEvent, Evaluated, Population, TickContext};
use crate::brain::Controller;
use crate::core::config::SimConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Why a generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationEnd {
    /// Every bird was culled.
    Extinct,
    /// The tick budget ran out with birds still alive.
    TickLimit,
    /// Quit was requested from outside.
    Quit,
}

/// Everything that happened in one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub passed: u32,
    pub culled: Vec<CullEvent>,
    pub spawned: u32,
    pub retired: u32,
    pub alive: usize,
    /// Set when this tick found the population already empty.
    pub extinct: bool,
}

/// Result handed back to the optimizer when a generation ends.
#[derive(Debug, Clone)]
pub struct GenerationOutcome<C> {
    pub generation: u32,
    pub score: u32,
    pub ticks: u64,
    pub end: GenerationEnd,
    /// One entry per controller, in spawn order.
    pub members: Vec<Evaluated<C>>,
}

impl<C> GenerationOutcome<C> {
    pub fn best(&self) -> Option<&Evaluated<C>> {
        self.members
            .iter()
            .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
    }

    pub fn mean_fitness(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        self.members.iter().map(|m| m.fitness).sum::<f64>() / self.members.len() as f64
    }
}

/// One generation's world: birds, pipes, floor, and score.
#[derive(Debug, Clone)]
pub struct Simulation<C> {
    config: SimConfig,
    sprites: SpriteSet,
    population: Population<C>,
    pipes: PipeField,
    floor: Floor,
    score: u32,
    tick: u64,
    generation: u32,
    quit_requested: bool,
    invalid_outputs: usize,
}

impl<C: Controller> Simulation<C> {
    /// Spawn one bird per controller and the first pipe.
    pub fn new<R: Rng>(
        config: SimConfig,
        sprites: SpriteSet,
        controllers: impl IntoIterator<Item = C>,
        generation: u32,
        rng: &mut R,
    ) -> Self {
        let mut pipes = PipeField::new(&config, &sprites);
        pipes.spawn(config.first_pipe_x, rng);
        let population = Population::spawn_generation(controllers, &config);
        Self::from_parts(config, sprites, population, pipes, generation)
    }

    /// Assemble a simulation from a prepared population and pipe field.
    pub fn from_parts(
        config: SimConfig,
        sprites: SpriteSet,
        population: Population<C>,
        pipes: PipeField,
        generation: u32,
    ) -> Self {
        let floor = Floor::new(&config);
        Self {
            config,
            sprites,
            population,
            pipes,
            floor,
            score: 0,
            tick: 0,
            generation,
            quit_requested: false,
            invalid_outputs: 0,
        }
    }

    /// Advance the world by one tick.
    ///
    /// Order: controllers act and birds move, then birds touching a pipe or
    /// leaving the play area are culled, then passes are scored and
    /// replacement pipes spawned, and finally pipes and floor scroll.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> TickReport {
        if self.population.is_empty() {
            return TickReport {
                tick: self.tick,
                extinct: true,
                ..Default::default()
            };
        }

        let ctx = TickContext {
            config: &self.config,
            sprites: &self.sprites,
            tick: self.tick,
        };
        let delta = self.population.tick(&mut self.pipes, &ctx);

        if delta.invalid_outputs > 0 {
            if self.invalid_outputs == 0 {
                log::warn!(
                    "generation {}: controller returned a non-finite output; treating as no jump",
                    self.generation
                );
            }
            self.invalid_outputs += delta.invalid_outputs;
        }

        self.score += delta.passed;
        for _ in 0..delta.passed {
            let pipe = self.pipes.spawn(self.config.pipe_spawn_x, rng);
            log::debug!(
                "tick {}: score {}, new pipe with gap at {}",
                self.tick,
                self.score,
                pipe.gap_top
            );
        }

        self.pipes.advance();
        let retired = self.pipes.retire_offscreen();
        self.floor.advance();
        self.tick += 1;

        TickReport {
            tick: self.tick,
            passed: delta.passed,
            culled: delta.culled,
            spawned: delta.passed,
            retired: retired as u32,
            alive: self.population.len(),
            extinct: self.population.is_empty(),
        }
    }

    /// Tick until the population is empty, `max_ticks` is reached, or quit
    /// is requested.
    pub fn run_generation<R: Rng>(
        mut self,
        rng: &mut R,
        max_ticks: Option<u64>,
    ) -> GenerationOutcome<C> {
        let end = loop {
            if let Some(end) = self.stop_reason(max_ticks) {
                break end;
            }
            self.tick(rng);
        };
        self.finish(end)
    }

    /// Reason to stop at the current tick boundary, if any.
    pub fn stop_reason(&self, max_ticks: Option<u64>) -> Option<GenerationEnd> {
        if self.population.is_empty() {
            Some(GenerationEnd::Extinct)
        } else if self.quit_requested {
            Some(GenerationEnd::Quit)
        } else if max_ticks.is_some_and(|limit| self.tick >= limit) {
            Some(GenerationEnd::TickLimit)
        } else {
            None
        }
    }

    /// Close the generation and hand every controller back with its fitness.
    pub fn finish(self, end: GenerationEnd) -> GenerationOutcome<C> {
        log::info!(
            "generation {} ended ({:?}) after {} ticks with score {}",
            self.generation,
            end,
            self.tick,
            self.score
        );
        GenerationOutcome {
            generation: self.generation,
            score: self.score,
            ticks: self.tick,
            end,
            members: self.population.into_evaluated(),
        }
    }

    /// Ask the loop to stop at the next tick boundary.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn is_extinct(&self) -> bool {
        self.population.is_empty()
    }

    pub fn population(&self) -> &Population<C> {
        &self.population
    }

    pub fn birds(&self) -> impl Iterator<Item = &Bird> {
        self.population.birds()
    }

    pub fn alive(&self) -> usize {
        self.population.len()
    }

    pub fn pipes(&self) -> &[Pipe] {
        self.pipes.pipes()
    }

    pub fn pipe_field(&self) -> &PipeField {
        &self.pipes
    }

    pub fn floor(&self) -> &Floor {
        &self.floor
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn sprites(&self) -> &SpriteSet {
        &self.sprites
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.population.best_fitness()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::{Idle, Observation};
    use crate::flappy::population::CullCause;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_new_simulation_has_first_pipe() {
        let mut rng = rng();
        let sim = Simulation::new(
            SimConfig::default(),
            SpriteSet::default(),
            vec![Idle; 3],
            1,
            &mut rng,
        );
        assert_eq!(sim.alive(), 3);
        assert_eq!(sim.pipes().len(), 1);
        assert_eq!(sim.pipes()[0].x, 650);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn test_idle_birds_fall_to_the_floor() {
        let mut rng = rng();
        let sim = Simulation::new(
            SimConfig::default(),
            SpriteSet::default(),
            vec![Idle; 4],
            1,
            &mut rng,
        );
        let outcome = sim.run_generation(&mut rng, Some(1000));
        assert_eq!(outcome.end, GenerationEnd::Extinct);
        assert_eq!(outcome.members.len(), 4);
        for member in &outcome.members {
            assert_eq!(member.cause, Some(CullCause::Floor));
            assert_eq!(member.ticks_survived, outcome.ticks);
        }
    }

    #[test]
    fn test_pipes_scroll_each_tick() {
        let mut rng = rng();
        let mut sim = Simulation::new(
            SimConfig::default(),
            SpriteSet::default(),
            vec![Idle],
            1,
            &mut rng,
        );
        let report = sim.tick(&mut rng);
        assert_eq!(report.tick, 1);
        assert_eq!(sim.pipes()[0].x, 645);
        assert_eq!(sim.floor().x1, -5);
    }

    #[test]
    fn test_tick_on_empty_population_reports_extinct() {
        let mut rng = rng();
        let mut sim = Simulation::new(
            SimConfig::default(),
            SpriteSet::default(),
            Vec::<Idle>::new(),
            1,
            &mut rng,
        );
        let report = sim.tick(&mut rng);
        assert!(report.extinct);
        assert_eq!(sim.ticks(), 0);
        assert_eq!(sim.pipes()[0].x, 650);
    }

    #[test]
    fn test_quit_stops_at_tick_boundary() {
        let mut rng = rng();
        let mut sim = Simulation::new(
            SimConfig::default(),
            SpriteSet::default(),
            vec![Idle; 2],
            3,
            &mut rng,
        );
        sim.tick(&mut rng);
        sim.request_quit();
        let outcome = sim.run_generation(&mut rng, None);
        assert_eq!(outcome.end, GenerationEnd::Quit);
        assert_eq!(outcome.ticks, 1);
        assert!(outcome.members.iter().all(|m| m.cause.is_none()));
    }

    #[test]
    fn test_tick_limit() {
        // Hover controller: jump whenever the bird sinks below y = 300.
        let hover = |obs: &Observation| {
            if obs.y > 300.0 {
                1.0
            } else {
                0.0
            }
        };
        let mut rng = rng();
        let sim = Simulation::new(
            SimConfig::default(),
            SpriteSet::default(),
            vec![hover],
            1,
            &mut rng,
        );
        let outcome = sim.run_generation(&mut rng, Some(10));
        assert_eq!(outcome.ticks, 10);
        assert_eq!(outcome.end, GenerationEnd::TickLimit);
    }

    #[test]
    fn test_outcome_statistics() {
        let outcome = GenerationOutcome {
            generation: 1,
            score: 0,
            ticks: 5,
            end: GenerationEnd::Extinct,
            members: vec![
                Evaluated {
                    id: 0,
                    controller: Idle,
                    fitness: 1.0,
                    cause: None,
                    ticks_survived: 5,
                },
                Evaluated {
                    id: 1,
                    controller: Idle,
                    fitness: 3.0,
                    cause: None,
                    ticks_survived: 5,
                },
            ],
        };
        assert_eq!(outcome.best().map(|b| b.id), Some(1));
        assert!((outcome.mean_fitness() - 2.0).abs() < f64::EPSILON);
    }
}
