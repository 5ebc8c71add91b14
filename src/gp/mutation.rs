//! Mutation operators for the genetic algorithm.
//!
//! Point mutation redraws single weights of randomly chosen individuals.
//! Each hit drops the individual's cached fitness, so the caller has to
//! rescore before selection reads it again.

use crate::gp::individual::Individual;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration for point mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Number of mutation trials per call.
    pub trials: usize,
    /// Replacement weights are drawn from `[-weight_bound, weight_bound)`.
    pub weight_bound: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            trials: 25,
            weight_bound: 5.0,
        }
    }
}

/// Apply `config.trials` point mutations in place.
///
/// Each trial picks a uniformly random individual and a uniformly random
/// weight index and replaces that weight with a fresh draw. The same
/// individual may be hit more than once. Returns the index hit by each trial,
/// in order.
pub fn point_mutate<R: Rng>(
    population: &mut [Individual],
    config: &MutationConfig,
    rng: &mut R,
) -> Vec<usize> {
    if population.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::with_capacity(config.trials);
    for _ in 0..config.trials {
        let i = rng.gen_range(0..population.len());
        let width = population[i].width();
        if width == 0 {
            continue;
        }
        let j = rng.gen_range(0..width);
        let value = rng.gen_range(-config.weight_bound..config.weight_bound);
        population[i].set_weight(j, value);
        hits.push(i);
    }
    hits
}
