//! Fixed-topology feed-forward genome: three inputs, one `tanh` output.

use crate::brain::{Controller, Observation};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

pub const INPUTS: usize = 3;

/// Connection weights and output bias of a single-neuron network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub weights: [f64; INPUTS],
    pub bias: f64,
}

impl Genome {
    pub fn new(weights: [f64; INPUTS], bias: f64) -> Self {
        Self { weights, bias }
    }

    /// Weights and bias drawn from N(0, `stdev`).
    pub fn random<R: Rng>(rng: &mut R, stdev: f64) -> Self {
        Self {
            weights: std::array::from_fn(|_| gaussian(rng, stdev)),
            bias: gaussian(rng, stdev),
        }
    }

    /// Network output for a raw input vector.
    pub fn activate(&self, inputs: [f64; INPUTS]) -> f64 {
        let sum: f64 = self
            .weights
            .iter()
            .zip(inputs)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;
        sum.tanh()
    }

    /// Perturb each gene with probability `rate` by N(0, `power`).
    pub fn mutate<R: Rng>(&mut self, rng: &mut R, rate: f64, power: f64) {
        let rate = rate.clamp(0.0, 1.0);
        for gene in self.weights.iter_mut().chain(std::iter::once(&mut self.bias)) {
            if rng.gen_bool(rate) {
                *gene += gaussian(rng, power);
            }
        }
    }

    /// Uniform crossover: each gene comes from either parent with equal odds.
    pub fn crossover<R: Rng>(&self, other: &Genome, rng: &mut R) -> Genome {
        let mut child = self.clone();
        for (gene, theirs) in child.weights.iter_mut().zip(other.weights) {
            if rng.gen_bool(0.5) {
                *gene = theirs;
            }
        }
        if rng.gen_bool(0.5) {
            child.bias = other.bias;
        }
        child
    }
}

impl Controller for Genome {
    fn decide(&mut self, observation: &Observation) -> f64 {
        self.activate(observation.as_array())
    }
}

/// Sample from N(0, `stdev`).
fn gaussian<R: Rng>(rng: &mut R, stdev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    z * stdev
}
