// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! langid-ga: evolve a linear classifier that tells two languages apart.
//!
//! Each line of text is reduced to letter counts. A genetic algorithm searches
//! for a weight vector whose dot product with those counts is positive for
//! the target language and non-positive for the other one.
//!
//! Runs are single-threaded and reproducible: every random draw comes from one
//! generator seeded from the configuration.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Corpus files  →  Dataset          │
//! ├─────────────────────────────────────┤
//! │   Feature extraction (letters)      │
//! ├─────────────────────────────────────┤
//! │   Genetic algorithm (gp)            │
//! ├─────────────────────────────────────┤
//! │   Report (letters, test score)      │
//! └─────────────────────────────────────┘
//! ```

pub mod corpus;
pub mod dataset;
pub mod error;
pub mod features;
pub mod gp;
pub mod report;

pub use error::{GaError, GaResult};

// Re-export key types at crate root for convenience
pub use dataset::{Dataset, LabeledExample};
pub use features::{Alphabet, FeatureVector};
pub use gp::{evolve, EvolutionConfig, EvolutionStats, Individual};
pub use report::{LetterPartition, TrainingSummary};

/// Label given to examples of the target language.
pub const TARGET_LABEL: bool = true;

/// Label given to examples of the other language.
pub const OTHER_LABEL: bool = false;
