//! Crossover operators for the genetic algorithm.
//!
//! Single-point crossover splices a prefix of one parent's weights onto the
//! suffix of the other's. The child always owns a fresh weight vector.

use crate::error::{GaError, GaResult};
use crate::gp::individual::Individual;
use rand::Rng;

/// Single-point crossover between two parents.
///
/// The cut index is drawn uniformly from `[0, width)`; the child takes
/// `mom`'s weights before the cut and `dad`'s from the cut onward. The child
/// is returned unscored.
///
/// # Errors
///
/// Returns [`GaError::DimensionMismatch`] if the parents differ in width.
pub fn crossover<R: Rng>(mom: &Individual, dad: &Individual, rng: &mut R) -> GaResult<Individual> {
    if mom.width() != dad.width() {
        return Err(GaError::DimensionMismatch {
            weights: mom.width(),
            features: dad.width(),
        });
    }

    let cut = if mom.width() == 0 {
        0
    } else {
        rng.gen_range(0..mom.width())
    };
    Ok(Individual::new(splice(mom.weights(), dad.weights(), cut)))
}

/// `mom[..cut]` followed by `dad[cut..]`, as a new vector.
///
/// # Panics
///
/// Panics if `cut` exceeds either slice's length.
#[must_use]
pub fn splice(mom: &[f64], dad: &[f64], cut: usize) -> Vec<f64> {
    let mut weights = Vec::with_capacity(dad.len());
    weights.extend_from_slice(&mom[..cut]);
    weights.extend_from_slice(&dad[cut..]);
    weights
}
