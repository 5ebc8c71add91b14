//! Fitness evaluation for classifiers.
//!
//! Fitness is the number of examples a weight vector labels correctly. The
//! same function scores the training set during evolution and the held-out
//! set afterwards.

// Accuracy uses intentional casts
#![allow(clippy::cast_precision_loss)]

use crate::dataset::Dataset;
use crate::error::{GaError, GaResult};
use crate::gp::individual::{classify, Individual};
use serde::Serialize;

/// Outcome of classifying every example in a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Examples classified correctly (the fitness).
    pub correct: usize,
    /// Dataset size (the fitness ceiling).
    pub total: usize,
    /// Target-language examples labeled as target.
    pub true_positives: usize,
    /// Other-language examples labeled as other.
    pub true_negatives: usize,
    /// Other-language examples labeled as target.
    pub false_positives: usize,
    /// Target-language examples labeled as other.
    pub false_negatives: usize,
}

impl Evaluation {
    /// Fraction of examples classified correctly.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

/// Classify every example and tally the results.
///
/// # Errors
///
/// Returns [`GaError::EmptyDataset`] if `dataset` has no examples, or
/// [`GaError::DimensionMismatch`] if any example's width differs from the weights.
pub fn evaluate(weights: &[f64], dataset: &Dataset) -> GaResult<Evaluation> {
    if dataset.is_empty() {
        return Err(GaError::EmptyDataset);
    }

    let mut eval = Evaluation {
        total: dataset.len(),
        ..Evaluation::default()
    };
    for example in dataset.examples() {
        let predicted = classify(weights, example.features())?;
        match (predicted, example.label()) {
            (true, true) => eval.true_positives += 1,
            (false, false) => eval.true_negatives += 1,
            (true, false) => eval.false_positives += 1,
            (false, true) => eval.false_negatives += 1,
        }
    }
    eval.correct = eval.true_positives + eval.true_negatives;

    Ok(eval)
}

/// Number of examples in `dataset` that `weights` classify correctly.
///
/// # Errors
///
/// Same as [`evaluate`].
pub fn evaluate_fitness(weights: &[f64], dataset: &Dataset) -> GaResult<usize> {
    evaluate(weights, dataset).map(|eval| eval.correct)
}

/// Score every individual whose fitness is not cached.
///
/// Returns how many individuals were scored.
///
/// # Errors
///
/// Propagates the first scoring failure.
pub fn score_population(population: &mut [Individual], dataset: &Dataset) -> GaResult<usize> {
    let mut scored = 0;
    for individual in population.iter_mut().filter(|ind| !ind.is_scored()) {
        individual.score(dataset)?;
        scored += 1;
    }
    Ok(scored)
}
