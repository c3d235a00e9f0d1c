//! The live set of birds, their controllers, and fitness.
//!
//! Each [`Member`] keeps a bird, its controller, and its fitness together, so
//! removing one removes all three.

use super::bird::Bird;
use super::collision::Silhouette;
use super::mask::SpriteSet;
use super::pipe::PipeField;
use crate::brain::{wants_jump, Controller, Observation};
use crate::core::config::SimConfig;
use serde::{Deserialize, Serialize};

/// Fitness accumulated by one controller during a generation.
///
/// The simulation writes deltas; everything else can only read the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fitness(f64);

impl Fitness {
    pub fn value(&self) -> f64 {
        self.0
    }

    pub(crate) fn credit(&mut self, delta: f64) {
        self.0 += delta;
    }
}

/// Why a bird was removed from the live set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CullCause {
    /// Touched a pipe.
    Collision,
    /// Reached the floor.
    Floor,
    /// Flew above the top of the window.
    Ceiling,
}

/// A live bird with its controller and fitness.
#[derive(Debug, Clone)]
pub struct Member<C> {
    /// Spawn index, stable for the whole generation.
    pub id: usize,
    pub bird: Bird,
    pub controller: C,
    pub fitness: Fitness,
    pub ticks_alive: u64,
}

/// Final record for one controller once a generation ends.
#[derive(Debug, Clone)]
pub struct Evaluated<C> {
    pub id: usize,
    pub controller: C,
    pub fitness: f64,
    /// `None` if the bird was still alive when the generation stopped.
    pub cause: Option<CullCause>,
    pub ticks_survived: u64,
}

/// A bird removed during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CullEvent {
    pub id: usize,
    pub cause: CullCause,
    /// Fitness after any penalty.
    pub fitness: f64,
    pub tick: u64,
}

/// Shared read-only inputs for one tick.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub config: &'a SimConfig,
    pub sprites: &'a SpriteSet,
    pub tick: u64,
}

/// What the population did in one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreDelta {
    /// Pipes passed for the first time.
    pub passed: u32,
    pub culled: Vec<CullEvent>,
    /// Controller outputs that were NaN or infinite.
    pub invalid_outputs: usize,
}

/// Live birds in spawn order plus the records of those already culled.
#[derive(Debug, Clone)]
pub struct Population<C> {
    members: Vec<Member<C>>,
    retired: Vec<Evaluated<C>>,
    next_id: usize,
}

impl<C> Default for Population<C> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            retired: Vec::new(),
            next_id: 0,
        }
    }
}

impl<C: Controller> Population<C> {
    /// One fresh bird at the spawn point per controller, fitness zero.
    pub fn spawn_generation(controllers: impl IntoIterator<Item = C>, config: &SimConfig) -> Self {
        let mut population = Self::default();
        for controller in controllers {
            population.insert(
                Bird::new(config.bird_spawn_x, config.bird_spawn_y),
                controller,
            );
        }
        population
    }

    /// Add a member with an arbitrary bird. Returns its id.
    pub fn insert(&mut self, bird: Bird, controller: C) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.members.push(Member {
            id,
            bird,
            controller,
            fitness: Fitness::default(),
            ticks_alive: 0,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Member<C>] {
        &self.members
    }

    pub fn retired(&self) -> &[Evaluated<C>] {
        &self.retired
    }

    pub fn birds(&self) -> impl Iterator<Item = &Bird> {
        self.members.iter().map(|m| &m.bird)
    }

    /// Best fitness among live and culled members.
    pub fn best_fitness(&self) -> Option<f64> {
        self.members
            .iter()
            .map(|m| m.fitness.value())
            .chain(self.retired.iter().map(|r| r.fitness))
            .max_by(|a, b| a.total_cmp(b))
    }

    /// Run one tick for every live member: act, cull, then credit passes.
    pub fn tick(&mut self, pipes: &mut PipeField, ctx: &TickContext<'_>) -> ScoreDelta {
        let invalid_outputs = self.act(pipes, ctx.config);
        let culled = self.cull(pipes, ctx);
        let passed = self.score_passes(pipes, ctx.config.pass_reward);
        ScoreDelta {
            passed,
            culled,
            invalid_outputs,
        }
    }

    /// Query every controller, credit survival, move, and apply jumps.
    /// Returns how many outputs were not finite.
    pub fn act(&mut self, pipes: &PipeField, config: &SimConfig) -> usize {
        let mut invalid = 0;
        for member in &mut self.members {
            let bird = &mut member.bird;
            let observation = match pipes.ahead_of(bird.x) {
                Some(pipe) => Observation::new(bird.y, pipe.gap_top, pipe.bottom),
                None => Observation {
                    y: bird.y,
                    gap_top_distance: 0.0,
                    gap_bottom_distance: 0.0,
                },
            };
            let output = member.controller.decide(&observation);
            if !output.is_finite() {
                invalid += 1;
            }

            member.fitness.credit(config.survival_reward);
            bird.advance(&config.kinematics);
            if wants_jump(output, config.jump_threshold) {
                bird.jump(&config.kinematics);
            }
            member.ticks_alive += 1;
        }
        invalid
    }

    /// Remove every bird that hit a pipe or left the play area.
    ///
    /// Causes are decided for all members first, then the live list is
    /// compacted in one pass, so several removals in the same tick never
    /// skip or double-handle anyone.
    pub fn cull(&mut self, pipes: &PipeField, ctx: &TickContext<'_>) -> Vec<CullEvent> {
        let config = ctx.config;
        let causes: Vec<Option<CullCause>> = self
            .members
            .iter()
            .map(|m| cull_cause(&m.bird, pipes, ctx.sprites, config))
            .collect();

        if causes.iter().all(Option::is_none) {
            return Vec::new();
        }

        let mut events = Vec::new();
        let mut kept = Vec::with_capacity(self.members.len());
        for (mut member, cause) in self.members.drain(..).zip(causes) {
            let Some(cause) = cause else {
                kept.push(member);
                continue;
            };
            if cause == CullCause::Collision {
                member.fitness.credit(-config.collision_penalty);
            }
            log::debug!(
                "tick {}: bird {} culled ({:?}) at y={:.1}, fitness {:.1}",
                ctx.tick,
                member.id,
                cause,
                member.bird.y,
                member.fitness.value()
            );
            events.push(CullEvent {
                id: member.id,
                cause,
                fitness: member.fitness.value(),
                tick: ctx.tick,
            });
            self.retired.push(Evaluated {
                id: member.id,
                controller: member.controller,
                fitness: member.fitness.value(),
                cause: Some(cause),
                ticks_survived: member.ticks_alive,
            });
        }
        self.members = kept;
        events
    }

    /// Mark pipes that a live bird has flown past and reward every live
    /// member once per newly passed pipe. Returns the number of passes.
    pub fn score_passes(&mut self, pipes: &mut PipeField, reward: f64) -> u32 {
        let Some(lead_x) = self.members.iter().map(|m| m.bird.x).max() else {
            return 0;
        };

        let mut passed = 0;
        for pipe in pipes.pipes_mut() {
            if !pipe.passed && pipe.x < lead_x {
                pipe.passed = true;
                passed += 1;
                log::debug!("pipe at x={} passed by {} birds", pipe.x, self.members.len());
            }
        }
        if passed > 0 {
            for member in &mut self.members {
                member.fitness.credit(reward * passed as f64);
            }
        }
        passed
    }

    /// Consume the population into one record per controller, in spawn order.
    pub fn into_evaluated(self) -> Vec<Evaluated<C>> {
        let mut all = self.retired;
        all.extend(self.members.into_iter().map(|m| Evaluated {
            id: m.id,
            controller: m.controller,
            fitness: m.fitness.value(),
            cause: None,
            ticks_survived: m.ticks_alive,
        }));
        all.sort_by_key(|e| e.id);
        all
    }
}

/// Why `bird` should leave the live set this tick, if at all.
///
/// Pipe contact wins over leaving the play area so the collision penalty is
/// never skipped.
pub fn cull_cause(
    bird: &Bird,
    pipes: &PipeField,
    sprites: &SpriteSet,
    config: &SimConfig,
) -> Option<CullCause> {
    let silhouette = Silhouette::of(bird, sprites, config.rotate_bird_mask);
    if pipes.pipes().iter().any(|p| silhouette.hits(p, sprites)) {
        return Some(CullCause::Collision);
    }
    if bird.y + sprites.bird_height() as f64 >= config.floor_y as f64 {
        return Some(CullCause::Floor);
    }
    if bird.y < 0.0 {
        return Some(CullCause::Ceiling);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::Idle;

    fn setup() -> (SimConfig, SpriteSet) {
        (SimConfig::default(), SpriteSet::default())
    }

    #[test]
    fn test_spawn_generation_pairs_each_controller() {
        let (config, _) = setup();
        let population = Population::spawn_generation(vec![Idle; 5], &config);
        assert_eq!(population.len(), 5);
        for (i, member) in population.members().iter().enumerate() {
            assert_eq!(member.id, i);
            assert_eq!(member.bird.x, 230);
            assert!((member.bird.y - 350.0).abs() < f64::EPSILON);
            assert_eq!(member.fitness.value(), 0.0);
        }
    }

    #[test]
    fn test_act_credits_survival_and_moves() {
        let (config, sprites) = setup();
        let pipes = PipeField::new(&config, &sprites);
        let mut population = Population::spawn_generation(vec![Idle; 2], &config);
        population.act(&pipes, &config);
        for member in population.members() {
            assert!((member.fitness.value() - 0.1).abs() < 1e-12);
            assert!((member.bird.y - 351.5).abs() < 1e-12);
            assert_eq!(member.ticks_alive, 1);
        }
    }

    #[test]
    fn test_act_jumps_after_moving() {
        let (config, sprites) = setup();
        let pipes = PipeField::new(&config, &sprites);
        let mut population =
            Population::spawn_generation(vec![|_: &Observation| 1.0], &config);
        population.act(&pipes, &config);
        let bird = &population.members()[0].bird;
        assert!((bird.y - 351.5).abs() < 1e-12);
        assert!((bird.vel - (-10.5)).abs() < f64::EPSILON);
        assert_eq!(bird.tick_count, 0);
        assert!((bird.height - 351.5).abs() < 1e-12);
    }

    #[test]
    fn test_act_counts_non_finite_outputs_as_no_jump() {
        let (config, sprites) = setup();
        let pipes = PipeField::new(&config, &sprites);
        let mut population =
            Population::spawn_generation(vec![|_: &Observation| f64::NAN; 3], &config);
        assert_eq!(population.act(&pipes, &config), 3);
        assert!(population.members().iter().all(|m| m.bird.vel == 0.0));
    }

    #[test]
    fn test_observation_uses_pipe_ahead() {
        let (config, sprites) = setup();
        let mut pipes = PipeField::new(&config, &sprites);
        pipes.push(pipes.make_pipe(100, 100)); // already cleared by x=230
        pipes.push(pipes.make_pipe(400, 250));
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let log = seen.clone();
        let controller = move |obs: &Observation| {
            log.borrow_mut().push(*obs);
            0.0
        };
        let mut population = Population::spawn_generation(vec![controller], &config);
        population.act(&pipes, &config);
        let obs = seen.borrow()[0];
        assert_eq!(obs, Observation::new(350.0, 250, 450));
    }

    #[test]
    fn test_observation_without_pipes_has_zero_gap_distances() {
        let (config, sprites) = setup();
        let pipes = PipeField::new(&config, &sprites);
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let log = seen.clone();
        let controller = move |obs: &Observation| {
            log.borrow_mut().push(*obs);
            0.0
        };
        let mut population = Population::default();
        population.insert(Bird::new(230, 351.5), controller);
        population.act(&pipes, &config);

        let obs = seen.borrow()[0];
        assert!((obs.y - 351.5).abs() < f64::EPSILON);
        assert_eq!(obs.gap_top_distance, 0.0);
        assert_eq!(obs.gap_bottom_distance, 0.0);
    }

    #[test]
    fn test_multiple_culls_in_one_tick_keep_pairing() {
        let (config, sprites) = setup();
        let mut pipes = PipeField::new(&config, &sprites);
        pipes.push(pipes.make_pipe(220, 250));
        let mut population: Population<Idle> = Population::default();
        // ids 0 and 2 hit the pipe, id 3 is below the floor, 1 and 4 are safe.
        population.insert(Bird::new(230, 150.0), Idle);
        population.insert(Bird::new(230, 300.0), Idle);
        population.insert(Bird::new(230, 420.0), Idle);
        population.insert(Bird::new(0, 700.0), Idle);
        population.insert(Bird::new(0, 300.0), Idle);
        let ctx = TickContext {
            config: &config,
            sprites: &sprites,
            tick: 9,
        };
        let events = population.cull(&pipes, &ctx);

        let culled: Vec<(usize, CullCause)> = events.iter().map(|e| (e.id, e.cause)).collect();
        assert_eq!(
            culled,
            vec![
                (0, CullCause::Collision),
                (2, CullCause::Collision),
                (3, CullCause::Floor)
            ]
        );
        let live: Vec<usize> = population.members().iter().map(|m| m.id).collect();
        assert_eq!(live, vec![1, 4]);
        assert_eq!(population.retired().len(), 3);
        assert_eq!(population.len() + population.retired().len(), 5);
    }

    #[test]
    fn test_collision_penalty_only_for_pipe_hits() {
        let (config, sprites) = setup();
        let mut pipes = PipeField::new(&config, &sprites);
        pipes.push(pipes.make_pipe(220, 250));
        let mut population: Population<Idle> = Population::default();
        population.insert(Bird::new(230, 150.0), Idle);
        population.insert(Bird::new(0, -5.0), Idle);
        let ctx = TickContext {
            config: &config,
            sprites: &sprites,
            tick: 0,
        };
        let events = population.cull(&pipes, &ctx);
        assert_eq!(events[0].cause, CullCause::Collision);
        assert!((events[0].fitness - (-1.0)).abs() < f64::EPSILON);
        assert_eq!(events[1].cause, CullCause::Ceiling);
        assert!((events[1].fitness).abs() < f64::EPSILON);
        assert!(population.is_empty());
    }

    #[test]
    fn test_pass_rewards_every_live_member_once() {
        let (config, sprites) = setup();
        let mut pipes = PipeField::new(&config, &sprites);
        pipes.push(pipes.make_pipe(200, 250));
        let mut population: Population<Idle> = Population::default();
        population.insert(Bird::new(230, 300.0), Idle);
        population.insert(Bird::new(100, 300.0), Idle);

        assert_eq!(population.score_passes(&mut pipes, 5.0), 1);
        assert!(pipes.pipes()[0].passed);
        for member in population.members() {
            assert!((member.fitness.value() - 5.0).abs() < f64::EPSILON);
        }
        // Already passed: no second credit.
        assert_eq!(population.score_passes(&mut pipes, 5.0), 0);
        assert!((population.members()[1].fitness.value() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_population_passes_nothing() {
        let (config, sprites) = setup();
        let mut pipes = PipeField::new(&config, &sprites);
        pipes.push(pipes.make_pipe(0, 250));
        let mut population: Population<Idle> = Population::default();
        assert_eq!(population.score_passes(&mut pipes, 5.0), 0);
        assert!(!pipes.pipes()[0].passed);
    }

    #[test]
    fn test_into_evaluated_is_in_spawn_order() {
        let (config, sprites) = setup();
        let mut pipes = PipeField::new(&config, &sprites);
        pipes.push(pipes.make_pipe(220, 250));
        let mut population: Population<Idle> = Population::default();
        population.insert(Bird::new(230, 300.0), Idle);
        population.insert(Bird::new(230, 150.0), Idle);
        population.insert(Bird::new(0, 300.0), Idle);
        let ctx = TickContext {
            config: &config,
            sprites: &sprites,
            tick: 0,
        };
        population.cull(&pipes, &ctx);
        let evaluated = population.into_evaluated();
        let ids: Vec<usize> = evaluated.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(evaluated[1].cause, Some(CullCause::Collision));
        assert_eq!(evaluated[0].cause, None);
    }
}
