//! Error types for classifier training.

use std::fmt;

/// Failures raised by the feature, fitness and evolution code.
///
/// None of these are retried. A mis-scored run is worse than an aborted one,
/// so every variant ends the run that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum GaError {
    /// Weight vector and feature vector disagree in length.
    DimensionMismatch {
        /// Number of weights in the classifier.
        weights: usize,
        /// Number of entries in the feature vector.
        features: usize,
    },
    /// Fitness-proportionate sampling over a population whose total fitness is zero.
    DegenerateSelection,
    /// Fitness computation or training on a dataset with no examples.
    EmptyDataset,
    /// Selection read an individual whose fitness was invalidated and never recomputed.
    Unscored {
        /// Position of the individual in the population.
        index: usize,
    },
    /// The evolution configuration cannot produce a valid run.
    InvalidConfig(String),
}

impl fmt::Display for GaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GaError::DimensionMismatch { weights, features } => {
                write!(f, "dimension mismatch: {weights} weights vs {features} features")
            }
            GaError::DegenerateSelection => {
                write!(f, "degenerate selection: total population fitness is zero")
            }
            GaError::EmptyDataset => write!(f, "dataset has no examples"),
            GaError::Unscored { index } => {
                write!(f, "individual {index} has no fitness score")
            }
            GaError::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for GaError {}

/// Result type for training operations.
pub type GaResult<T> = Result<T, GaError>;
