//! Genetic algorithm for evolving linear language classifiers.
//!
//! A classifier is a weight vector over letter counts; it answers "target
//! language" when the dot product with a feature vector is positive. A
//! population of such vectors is evolved against a labeled training set.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │         Evolution Loop              │
//! ├─────────────────────────────────────┤
//! │  Selection │ Crossover │ Mutation   │
//! ├─────────────────────────────────────┤
//! │         Fitness Evaluation          │
//! ├─────────────────────────────────────┤
//! │    Individual (weights + fitness)   │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use langid_ga::gp::{evolve, EvolutionConfig};
//!
//! let config = EvolutionConfig::default();
//! let (best, stats) = evolve(&config, &training)?;
//! let test_score = langid_ga::gp::evaluate_fitness(best.weights(), &test)?;
//! ```

mod crossover;
mod evolution;
mod fitness;
mod individual;
mod mutation;
mod population;
mod selection;

pub use crossover::{crossover, splice};
pub use evolution::{
    evolve, Evolution, EvolutionConfig, EvolutionStats, GenerationStats, Phase,
};
pub use fitness::{evaluate, evaluate_fitness, score_population, Evaluation};
pub use individual::{classify, Individual};
pub use mutation::{point_mutate, MutationConfig};
pub use population::initial_population;
pub use selection::{best_index, sample_proportional, sort_by_fitness, truncate, SelectionStats};
