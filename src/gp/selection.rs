//! Selection operators for the genetic algorithm.
//!
//! Survivors are chosen by truncation: the fitter half of the population
//! lives on. Crossover parents are drawn from the survivors with probability
//! proportional to fitness.

// Selection uses intentional casts for statistics
#![allow(clippy::cast_precision_loss)]

use crate::error::{GaError, GaResult};
use crate::gp::individual::Individual;
use rand::Rng;
use serde::Serialize;
use std::cmp::Reverse;

/// Cached fitness of every individual, in population order.
fn fitness_values(population: &[Individual]) -> GaResult<Vec<usize>> {
    population
        .iter()
        .enumerate()
        .map(|(index, ind)| ind.fitness().ok_or(GaError::Unscored { index }))
        .collect()
}

/// Sort by fitness, best first.
///
/// The sort is stable: individuals with equal fitness keep their relative
/// order, which keeps seeded runs reproducible.
///
/// # Errors
///
/// Returns [`GaError::Unscored`] if any individual lacks a fitness value.
pub fn sort_by_fitness(population: &mut [Individual]) -> GaResult<()> {
    fitness_values(population)?;
    population.sort_by_key(|ind| Reverse(ind.fitness()));
    Ok(())
}

/// Keep the `survivors` fittest individuals and drop the rest.
///
/// Elitist: the fittest individual is always kept when `survivors > 0`.
///
/// # Errors
///
/// Returns [`GaError::Unscored`] if any individual lacks a fitness value.
pub fn truncate(population: &mut Vec<Individual>, survivors: usize) -> GaResult<()> {
    sort_by_fitness(population)?;
    population.truncate(survivors);
    Ok(())
}

/// Index of the fittest individual; the earliest one wins ties.
///
/// # Errors
///
/// Returns [`GaError::Unscored`] if any individual lacks a fitness value, or
/// [`GaError::DegenerateSelection`] for an empty population.
pub fn best_index(population: &[Individual]) -> GaResult<usize> {
    let fitness = fitness_values(population)?;
    let mut best: Option<(usize, usize)> = None;
    for (index, &fit) in fitness.iter().enumerate() {
        if best.is_none_or(|(_, best_fit)| fit > best_fit) {
            best = Some((index, fit));
        }
    }
    best.map(|(index, _)| index).ok_or(GaError::DegenerateSelection)
}

/// Fitness-proportionate (roulette wheel) sampling.
///
/// Draws a point in `[0, total_fitness)` and walks the population until the
/// point falls inside an individual's share. Returns that individual's index.
///
/// # Errors
///
/// Returns [`GaError::DegenerateSelection`] if the total fitness is zero
/// (including an empty population), or [`GaError::Unscored`] if any
/// individual lacks a fitness value.
pub fn sample_proportional<R: Rng>(population: &[Individual], rng: &mut R) -> GaResult<usize> {
    let fitness = fitness_values(population)?;
    let total: usize = fitness.iter().sum();
    if total == 0 {
        return Err(GaError::DegenerateSelection);
    }

    let mut point = rng.gen_range(0..total);
    for (index, &fit) in fitness.iter().enumerate() {
        if point < fit {
            return Ok(index);
        }
        point -= fit;
    }

    // Unreachable with integer shares; fall back to the last individual.
    Ok(fitness.len() - 1)
}

/// Fitness statistics for one population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionStats {
    /// Mean fitness of the population.
    pub mean_fitness: f64,
    /// Best fitness in the population.
    pub best_fitness: usize,
    /// Worst fitness in the population.
    pub worst_fitness: usize,
    /// Standard deviation of fitness.
    pub fitness_std: f64,
}

impl SelectionStats {
    /// Calculate statistics from fitness values.
    #[must_use]
    pub fn from_fitness(fitness: &[usize]) -> Self {
        if fitness.is_empty() {
            return Self {
                mean_fitness: 0.0,
                best_fitness: 0,
                worst_fitness: 0,
                fitness_std: 0.0,
            };
        }

        let sum: usize = fitness.iter().sum();
        let mean = sum as f64 / fitness.len() as f64;

        let best = fitness.iter().copied().max().unwrap_or(0);
        let worst = fitness.iter().copied().min().unwrap_or(0);

        let variance: f64 = fitness
            .iter()
            .map(|&f| (f as f64 - mean).powi(2))
            .sum::<f64>()
            / fitness.len() as f64;

        Self {
            mean_fitness: mean,
            best_fitness: best,
            worst_fitness: worst,
            fitness_std: variance.sqrt(),
        }
    }

    /// Calculate statistics over a scored population.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::Unscored`] if any individual lacks a fitness value.
    pub fn from_population(population: &[Individual]) -> GaResult<Self> {
        Ok(Self::from_fitness(&fitness_values(population)?))
    }
}

#[cfg(test)]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// Individuals whose single weight records their original position.
    fn scored(fitness: &[usize]) -> Vec<Individual> {
        fitness
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                let mut ind = Individual::new(vec![i as f64]);
                ind.set_fitness_for_test(f);
                ind
            })
            .collect()
    }

    fn positions(population: &[Individual]) -> Vec<usize> {
        population.iter().map(|ind| ind.weights()[0] as usize).collect()
    }

    #[test]
    fn test_sort_is_stable_and_descending() {
        let mut population = scored(&[1, 3, 2, 3, 1]);
        sort_by_fitness(&mut population).unwrap();

        assert_eq!(positions(&population), vec![1, 3, 2, 0, 4]);
    }

    #[test]
    fn test_truncate_keeps_top_half() {
        let mut population = scored(&[0, 4, 1, 3]);
        truncate(&mut population, 2).unwrap();

        assert_eq!(positions(&population), vec![1, 3]);
    }

    #[test]
    fn test_sort_rejects_unscored() {
        let mut population = scored(&[2, 2]);
        population.push(Individual::new(vec![9.0]));

        assert_eq!(sort_by_fitness(&mut population), Err(GaError::Unscored { index: 2 }));
    }

    #[test]
    fn test_best_index_first_of_ties() {
        assert_eq!(best_index(&scored(&[1, 5, 5, 2])).unwrap(), 1);
        assert_eq!(best_index(&[]), Err(GaError::DegenerateSelection));
    }

    #[test]
    fn test_proportional_sampling_prefers_fitter() {
        let mut rng = SmallRng::seed_from_u64(42);
        let population = scored(&[1, 0, 8, 1]);

        let mut counts = [0usize; 4];
        for _ in 0..1000 {
            counts[sample_proportional(&population, &mut rng).unwrap()] += 1;
        }

        // Zero fitness is never drawn
        assert_eq!(counts[1], 0);
        let max_idx = counts.iter().enumerate().max_by_key(|(_, c)| **c).unwrap().0;
        assert_eq!(max_idx, 2);
    }

    #[test]
    fn test_proportional_sampling_zero_total() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(
            sample_proportional(&scored(&[0, 0, 0]), &mut rng),
            Err(GaError::DegenerateSelection)
        );
        assert_eq!(sample_proportional(&[], &mut rng), Err(GaError::DegenerateSelection));
    }

    #[test]
    fn test_selection_stats() {
        let stats = SelectionStats::from_fitness(&[1, 2, 3, 4, 5]);

        assert!((stats.mean_fitness - 3.0).abs() < 0.001);
        assert_eq!(stats.best_fitness, 5);
        assert_eq!(stats.worst_fitness, 1);
        assert!((stats.fitness_std - 2.0_f64.sqrt()).abs() < 0.001);
    }
}
