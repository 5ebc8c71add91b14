//! Individual representation: one candidate linear classifier.
//!
//! The fitness is cached, not derived on read. Every weight change drops the
//! cached value, and selection refuses to read an individual until it has
//! been scored again.

use crate::dataset::Dataset;
use crate::error::{GaError, GaResult};
use crate::features::FeatureVector;
use crate::gp::fitness::evaluate_fitness;
use rand::Rng;

/// A weight vector plus the fitness it earned on the last dataset it was scored against.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    weights: Vec<f64>,
    fitness: Option<usize>,
}

impl Individual {
    /// Create an unscored individual from explicit weights.
    #[must_use]
    pub fn new(weights: Vec<f64>) -> Self {
        Self {
            weights,
            fitness: None,
        }
    }

    /// Create an unscored individual with `width` weights drawn uniformly from `[-bound, bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is not positive or `2 * bound` is not finite.
    #[must_use]
    pub fn random<R: Rng>(rng: &mut R, width: usize, bound: f64) -> Self {
        let weights = (0..width).map(|_| rng.gen_range(-bound..bound)).collect();
        Self::new(weights)
    }

    /// The weights, one per alphabet symbol.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of weights.
    #[must_use]
    pub fn width(&self) -> usize {
        self.weights.len()
    }

    /// Cached fitness, or `None` if the weights changed since the last scoring.
    #[must_use]
    pub fn fitness(&self) -> Option<usize> {
        self.fitness
    }

    /// Whether a fitness value is cached.
    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.fitness.is_some()
    }

    /// Replace one weight and invalidate the cached fitness.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_weight(&mut self, index: usize, value: f64) {
        self.weights[index] = value;
        self.fitness = None;
    }

    /// Recompute and cache fitness against `dataset`.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::EmptyDataset`] or [`GaError::DimensionMismatch`].
    pub fn score(&mut self, dataset: &Dataset) -> GaResult<usize> {
        let fitness = evaluate_fitness(&self.weights, dataset)?;
        self.fitness = Some(fitness);
        Ok(fitness)
    }

    #[cfg(test)]
    pub(crate) fn set_fitness_for_test(&mut self, fitness: usize) {
        self.fitness = Some(fitness);
    }
}

/// Linear decision rule: `dot(weights, features) > 0`.
///
/// There is no bias term, so the zero vector always classifies as `false`.
///
/// # Errors
///
/// Returns [`GaError::DimensionMismatch`] if the widths differ.
pub fn classify(weights: &[f64], features: &FeatureVector) -> GaResult<bool> {
    let counts = features.counts();
    if weights.len() != counts.len() {
        return Err(GaError::DimensionMismatch {
            weights: weights.len(),
            features: counts.len(),
        });
    }

    let total: f64 = weights
        .iter()
        .zip(counts)
        .map(|(w, &c)| w * f64::from(c))
        .sum();
    Ok(total > 0.0)
}
