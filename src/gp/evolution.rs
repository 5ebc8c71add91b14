//! Main evolution loop for the genetic algorithm.
//!
//! This module orchestrates the evolutionary process: initialization,
//! truncation, mutation, rescoring and crossover, for a fixed number of
//! generations.

// Evolution uses intentional casts for statistics
#![allow(clippy::cast_precision_loss)]

use crate::dataset::Dataset;
use crate::error::{GaError, GaResult};
use crate::gp::crossover::crossover;
use crate::gp::fitness::score_population;
use crate::gp::individual::Individual;
use crate::gp::mutation::{point_mutate, MutationConfig};
use crate::gp::population::{check_weight_bound, initial_population};
use crate::gp::selection::{best_index, sample_proportional, truncate, SelectionStats};
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use std::time::Instant;

/// Configuration for the evolution process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Population size, restored at the end of every generation.
    pub population_size: usize,
    /// Number of generations to run.
    pub generations: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
    /// Weights are drawn from `[-weight_bound, weight_bound)`.
    pub weight_bound: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 20,
            seed: 42,
            weight_bound: 5.0,
        }
    }
}

impl EvolutionConfig {
    /// Check that the configuration can produce a run.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidConfig`] if the population has fewer than two
    /// individuals or `[-weight_bound, weight_bound)` is empty or overflows.
    pub fn validate(&self) -> GaResult<()> {
        if self.population_size < 2 {
            return Err(GaError::InvalidConfig(format!(
                "population size must be at least 2, got {}",
                self.population_size
            )));
        }
        check_weight_bound(self.weight_bound)
    }

    /// Individuals kept by truncation each generation.
    #[must_use]
    pub fn survivors(&self) -> usize {
        self.population_size / 2
    }

    /// Children bred each generation to restore the population size.
    #[must_use]
    pub fn offspring(&self) -> usize {
        self.population_size - self.survivors()
    }

    /// Point mutation settings: a quarter of the population size in trials.
    #[must_use]
    pub fn mutation(&self) -> MutationConfig {
        MutationConfig {
            trials: self.population_size / 4,
            weight_bound: self.weight_bound,
        }
    }
}

/// Statistics for a single generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    /// Generation number, starting at 0.
    pub generation: usize,
    /// Fitness of the full population at the start of the generation.
    pub fitness: SelectionStats,
    /// Survivors rescored after mutation.
    pub rescored: usize,
}

/// Overall statistics from an evolution run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionStats {
    /// Statistics per generation.
    pub generations: Vec<GenerationStats>,
    /// Fitness of the final population.
    pub final_fitness: SelectionStats,
    /// Fitness of the returned individual.
    pub best_fitness: usize,
    /// Generations actually run.
    pub completed_generations: usize,
    /// Whether the observer stopped the run early.
    pub cancelled: bool,
    /// Total time in seconds.
    pub elapsed_seconds: f64,
}

/// Where an [`Evolution`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Population generated and scored; no generation run yet.
    Initialized,
    /// Running (or just finished) the given generation.
    Evolving {
        /// Zero-based generation number.
        generation: usize,
    },
    /// The generation budget is spent.
    Converged,
}

/// A single evolution run over one training set.
///
/// Owns the population and the random source for the whole run, so a run is
/// reproducible from its seed. Not resumable: after an error the population
/// may be mid-generation and the run should be dropped.
#[derive(Debug)]
pub struct Evolution<'a, R = SmallRng> {
    config: EvolutionConfig,
    training: &'a Dataset,
    rng: R,
    population: Vec<Individual>,
    phase: Phase,
    completed: usize,
    history: Vec<GenerationStats>,
}

impl<'a> Evolution<'a, SmallRng> {
    /// Start a run with an RNG seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// See [`Evolution::with_rng`].
    pub fn new(config: &EvolutionConfig, training: &'a Dataset) -> GaResult<Self> {
        Self::with_rng(config, training, SmallRng::seed_from_u64(config.seed))
    }
}

impl<'a, R: Rng> Evolution<'a, R> {
    /// Start a run drawing all randomness from `rng`.
    ///
    /// Generates and scores the initial population.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidConfig`] for an invalid configuration,
    /// [`GaError::EmptyDataset`] for an empty training set, or
    /// [`GaError::DimensionMismatch`] if the examples differ in width.
    pub fn with_rng(config: &EvolutionConfig, training: &'a Dataset, mut rng: R) -> GaResult<Self> {
        config.validate()?;
        let width = training.width().ok_or(GaError::EmptyDataset)?;
        let population = initial_population(
            config.population_size,
            width,
            config.weight_bound,
            training,
            &mut rng,
        )?;

        info!(
            "initialized {} individuals of width {width} on {} examples",
            population.len(),
            training.len()
        );

        Ok(Self {
            config: *config,
            training,
            rng,
            population,
            phase: Phase::Initialized,
            completed: 0,
            history: Vec::with_capacity(config.generations),
        })
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The current population.
    #[must_use]
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Number of generations completed so far.
    #[must_use]
    pub fn completed_generations(&self) -> usize {
        self.completed
    }

    /// Statistics of every generation run so far.
    #[must_use]
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Run one generation.
    ///
    /// Returns `None` once the generation budget is spent.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::DegenerateSelection`] if the survivors' total
    /// fitness is zero, or any scoring error.
    pub fn step(&mut self) -> GaResult<Option<GenerationStats>> {
        if self.completed >= self.config.generations {
            self.phase = Phase::Converged;
            return Ok(None);
        }

        let generation = self.completed;
        self.phase = Phase::Evolving { generation };

        let fitness = SelectionStats::from_population(&self.population)?;
        info!(
            "Gen {:>5}: best={} mean={:.2} std={:.2}",
            generation, fitness.best_fitness, fitness.mean_fitness, fitness.fitness_std
        );

        truncate(&mut self.population, self.config.survivors())?;
        self.population.shuffle(&mut self.rng);

        let hits = point_mutate(&mut self.population, &self.config.mutation(), &mut self.rng);
        let rescored = score_population(&mut self.population, self.training)?;
        debug!(
            "Gen {generation:>5}: {} mutation trials, {rescored} survivors rescored",
            hits.len()
        );

        let children = breed(
            &self.population,
            self.config.offspring(),
            self.training,
            &mut self.rng,
        )?;
        self.population.extend(children);

        self.completed += 1;
        if self.completed >= self.config.generations {
            self.phase = Phase::Converged;
        }

        let stats = GenerationStats {
            generation,
            fitness,
            rescored,
        };
        self.history.push(stats);
        Ok(Some(stats))
    }

    /// The fittest individual of the current population; earliest wins ties.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::Unscored`] if any individual lacks a fitness value.
    pub fn best(&self) -> GaResult<&Individual> {
        best_index(&self.population).map(|index| &self.population[index])
    }

    /// Run every remaining generation and return the best individual.
    ///
    /// # Errors
    ///
    /// Any error from [`Evolution::step`] aborts the run.
    pub fn run(self) -> GaResult<(Individual, EvolutionStats)> {
        self.run_with(|_| ControlFlow::Continue(()))
    }

    /// Like [`Evolution::run`], calling `observer` after each generation.
    ///
    /// Returning [`ControlFlow::Break`] stops the run at that generation
    /// boundary; the best individual so far is returned.
    ///
    /// # Errors
    ///
    /// Any error from [`Evolution::step`] aborts the run.
    pub fn run_with<F>(mut self, mut observer: F) -> GaResult<(Individual, EvolutionStats)>
    where
        F: FnMut(&GenerationStats) -> ControlFlow<()>,
    {
        let start_time = Instant::now();
        let mut cancelled = false;

        while let Some(stats) = self.step()? {
            if observer(&stats).is_break() {
                if self.phase != Phase::Converged {
                    warn!(
                        "stopped after {} of {} generations",
                        self.completed, self.config.generations
                    );
                    cancelled = true;
                }
                break;
            }
        }

        let index = best_index(&self.population)?;
        let best = self.population[index].clone();
        let best_fitness = best.fitness().ok_or(GaError::Unscored { index })?;
        let final_fitness = SelectionStats::from_population(&self.population)?;
        info!(
            "finished {} generations: best={best_fitness} mean={:.2}",
            self.completed, final_fitness.mean_fitness
        );

        Ok((
            best,
            EvolutionStats {
                generations: self.history,
                final_fitness,
                best_fitness,
                completed_generations: self.completed,
                cancelled,
                elapsed_seconds: start_time.elapsed().as_secs_f64(),
            },
        ))
    }
}

/// Breed `count` children from `parents` by proportional sampling and crossover.
///
/// Every child is scored against `training` before it is returned.
fn breed<R: Rng>(
    parents: &[Individual],
    count: usize,
    training: &Dataset,
    rng: &mut R,
) -> GaResult<Vec<Individual>> {
    let mut children = Vec::with_capacity(count);
    for _ in 0..count {
        let mom = &parents[sample_proportional(parents, rng)?];
        let dad = &parents[sample_proportional(parents, rng)?];
        let mut child = crossover(mom, dad, rng)?;
        child.score(training)?;
        children.push(child);
    }
    Ok(children)
}

/// Run the evolution process with default seeding.
///
/// Generates a scored population, runs `config.generations` generations of
/// truncation, mutation and crossover, and returns the fittest individual.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the training set is
/// empty or inconsistent, or selection degenerates.
pub fn evolve(config: &EvolutionConfig, training: &Dataset) -> GaResult<(Individual, EvolutionStats)> {
    Evolution::new(config, training)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::LabeledExample;
    use crate::features::FeatureVector;
    use crate::gp::fitness::evaluate_fitness;

    fn toy_dataset() -> Dataset {
        [([3, 0], true), ([0, 3], false), ([2, 0], true), ([0, 2], false)]
            .into_iter()
            .map(|(counts, label)| LabeledExample::new(FeatureVector::from_counts(counts.to_vec()), label))
            .collect()
    }

    fn config(population_size: usize, generations: usize, seed: u64) -> EvolutionConfig {
        EvolutionConfig {
            population_size,
            generations,
            seed,
            weight_bound: 5.0,
        }
    }

    #[test]
    fn test_evolution_config_default() {
        let config = EvolutionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.survivors(), 50);
        assert_eq!(config.offspring(), 50);
        assert_eq!(config.mutation().trials, 25);
    }

    #[test]
    fn test_odd_population_is_restored() {
        let config = config(5, 1, 1);
        assert_eq!(config.survivors() + config.offspring(), 5);
    }

    #[test]
    fn test_invalid_config() {
        assert!(config(1, 5, 0).validate().is_err());
        let mut bad_bound = config(4, 5, 0);
        bad_bound.weight_bound = -1.0;
        assert!(bad_bound.validate().is_err());
    }

    #[test]
    fn test_overflowing_bound_is_rejected() {
        let mut huge = config(4, 2, 1);
        huge.weight_bound = 1e308;
        assert!(matches!(huge.validate(), Err(GaError::InvalidConfig(_))));

        let data = toy_dataset();
        assert!(matches!(evolve(&huge, &data), Err(GaError::InvalidConfig(_))));
    }

    #[test]
    fn test_phases() {
        let data = toy_dataset();
        let mut run = Evolution::new(&config(40, 2, 3), &data).unwrap();
        assert_eq!(run.phase(), Phase::Initialized);

        run.step().unwrap();
        assert_eq!(run.phase(), Phase::Evolving { generation: 0 });

        run.step().unwrap();
        assert_eq!(run.phase(), Phase::Converged);
        assert_eq!(run.completed_generations(), 2);
        assert!(run.step().unwrap().is_none());
        assert_eq!(run.history().len(), 2);
    }

    #[test]
    fn test_population_size_is_stable() {
        let data = toy_dataset();
        let mut run = Evolution::new(&config(40, 6, 11), &data).unwrap();
        while run.step().unwrap().is_some() {
            assert_eq!(run.population().len(), 40);
        }
    }

    #[test]
    fn test_mutated_survivors_are_rescored_eagerly() {
        let data = toy_dataset();
        let mut run = Evolution::new(&config(40, 5, 5), &data).unwrap();

        let mut rescored = 0;
        while let Some(stats) = run.step().unwrap() {
            rescored += stats.rescored;
            // No stale fitness survives a generation
            for ind in run.population() {
                assert_eq!(ind.fitness(), Some(evaluate_fitness(ind.weights(), &data).unwrap()));
            }
        }
        assert!(rescored > 0);
    }

    #[test]
    fn test_zero_generations_returns_best_initial() {
        let data = toy_dataset();
        let run = Evolution::new(&config(8, 0, 21), &data).unwrap();
        let expected = run.best().unwrap().clone();

        let (best, stats) = run.run().unwrap();
        assert_eq!(best, expected);
        assert_eq!(stats.completed_generations, 0);
        assert!(stats.generations.is_empty());
    }

    #[test]
    fn test_observer_can_stop_the_run() {
        let data = toy_dataset();
        let run = Evolution::new(&config(40, 10, 4), &data).unwrap();

        let (best, stats) = run
            .run_with(|stats| {
                if stats.generation == 2 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();

        assert!(stats.cancelled);
        assert_eq!(stats.completed_generations, 3);
        assert_eq!(best.fitness(), Some(stats.best_fitness));
    }

    #[test]
    fn test_empty_training_set() {
        let empty = Dataset::new();
        let result = Evolution::new(&config(4, 5, 0), &empty);
        assert!(matches!(result, Err(GaError::EmptyDataset)));
    }
}
