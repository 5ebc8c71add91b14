//! Random initial population.

use crate::dataset::Dataset;
use crate::error::{GaError, GaResult};
use crate::gp::individual::Individual;
use rand::Rng;

/// Generate `size` random individuals of `width` weights and score each one.
///
/// Weights are drawn uniformly from `[-weight_bound, weight_bound)`. Every
/// returned individual carries a fitness against `training`.
///
/// # Errors
///
/// Returns [`GaError::EmptyDataset`] for an empty training set,
/// [`GaError::InvalidConfig`] for a bound that is not positive or whose range overflows,
/// or [`GaError::DimensionMismatch`] if `width` disagrees with the examples.
pub fn initial_population<R: Rng>(
    size: usize,
    width: usize,
    weight_bound: f64,
    training: &Dataset,
    rng: &mut R,
) -> GaResult<Vec<Individual>> {
    if training.is_empty() {
        return Err(GaError::EmptyDataset);
    }
    check_weight_bound(weight_bound)?;

    (0..size)
        .map(|_| {
            let mut individual = Individual::random(rng, width, weight_bound);
            individual.score(training)?;
            Ok(individual)
        })
        .collect()
}

/// Weights are drawn from `[-bound, bound)`, so the width of that range must be finite too.
///
/// # Errors
///
/// Returns [`GaError::InvalidConfig`] if `bound` is not positive or `2 * bound` overflows.
pub(crate) fn check_weight_bound(bound: f64) -> GaResult<()> {
    if bound > 0.0 && (2.0 * bound).is_finite() {
        Ok(())
    } else {
        Err(GaError::InvalidConfig(format!(
            "weight bound must be positive with a finite range, got {bound}"
        )))
    }
}
