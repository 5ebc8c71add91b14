//! Summaries of a trained classifier.
//!
//! The letter partition shows which symbols push a line toward the target
//! language. The summary bundles everything a run produced so the CLI can
//! print it as text or JSON.

use crate::dataset::Dataset;
use crate::error::{GaError, GaResult};
use crate::features::Alphabet;
use crate::gp::{evaluate, Evaluation, EvolutionConfig, EvolutionStats, Individual};
use serde::Serialize;

/// Alphabet symbols split by the sign of their weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterPartition {
    /// Symbols with a positive weight (evidence for the target language).
    pub positive: String,
    /// Symbols with a zero or negative weight (evidence for the other language).
    pub negative: String,
}

impl LetterPartition {
    /// Partition `alphabet` by the sign of the matching weight, in alphabet order.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::DimensionMismatch`] if the widths differ.
    pub fn from_weights(alphabet: &Alphabet, weights: &[f64]) -> GaResult<Self> {
        if alphabet.len() != weights.len() {
            return Err(GaError::DimensionMismatch {
                weights: weights.len(),
                features: alphabet.len(),
            });
        }

        let mut positive = String::new();
        let mut negative = String::new();
        for (&symbol, &weight) in alphabet.symbols().iter().zip(weights) {
            if weight > 0.0 {
                positive.push(symbol);
            } else {
                negative.push(symbol);
            }
        }
        Ok(Self { positive, negative })
    }
}

/// Everything one training run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingSummary {
    /// Configuration the run used, seed included.
    pub config: EvolutionConfig,
    /// Symbols the weights refer to, in order.
    pub alphabet: String,
    /// Weights of the best individual.
    pub weights: Vec<f64>,
    /// Letters by weight sign.
    pub letters: LetterPartition,
    /// Score on the training set.
    pub training: Evaluation,
    /// Score on the held-out set, when one was given.
    pub test: Option<Evaluation>,
    /// Per-generation statistics.
    pub stats: EvolutionStats,
}

impl TrainingSummary {
    /// Build a summary, scoring `best` on the training and (optional) test sets.
    ///
    /// # Errors
    ///
    /// Returns any scoring error, e.g. [`GaError::EmptyDataset`] for an empty test set.
    pub fn new(
        config: &EvolutionConfig,
        alphabet: &Alphabet,
        best: &Individual,
        stats: EvolutionStats,
        training: &Dataset,
        test: Option<&Dataset>,
    ) -> GaResult<Self> {
        let letters = LetterPartition::from_weights(alphabet, best.weights())?;
        let training = evaluate(best.weights(), training)?;
        let test = test.map(|data| evaluate(best.weights(), data)).transpose()?;

        Ok(Self {
            config: *config,
            alphabet: alphabet.symbols().iter().collect(),
            weights: best.weights().to_vec(),
            letters,
            training,
            test,
            stats,
        })
    }
}
