//! Property-based tests for features, classification and the GA operators.
//!
//! Run with: cargo test --release prop_ga

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use langid_ga::gp::{classify, crossover, evaluate, evaluate_fitness, truncate};
use langid_ga::{evolve, Alphabet, Dataset, EvolutionConfig, FeatureVector, Individual, LabeledExample};

const WIDTH: usize = 6;

fn weights() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-5.0f64..5.0, WIDTH)
}

fn counts() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..50, WIDTH)
}

fn dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec((counts(), any::<bool>()), 1..20).prop_map(|rows| {
        rows.into_iter()
            .map(|(c, label)| LabeledExample::new(FeatureVector::from_counts(c), label))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Every extracted vector is as wide as the alphabet and counts only its letters.
    #[test]
    fn prop_extract_width_matches_alphabet(text in ".{0,200}") {
        let alphabet = Alphabet::latin();
        let fv = alphabet.extract(&text);

        prop_assert_eq!(fv.len(), alphabet.len());
        let letters = text
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_ascii_lowercase())
            .count();
        prop_assert_eq!(fv.total(), letters as u64);
    }

    /// Scaling the weights by a positive power of two never changes a decision.
    #[test]
    fn prop_classify_scale_invariant(w in weights(), c in counts(), exp in 1i32..8) {
        let fv = FeatureVector::from_counts(c);
        let factor = 2f64.powi(exp);
        let scaled: Vec<f64> = w.iter().map(|x| x * factor).collect();

        prop_assert_eq!(classify(&w, &fv).unwrap(), classify(&scaled, &fv).unwrap());
    }

    /// The zero vector is always classified as the other language.
    #[test]
    fn prop_zero_vector_is_other(w in weights()) {
        let fv = FeatureVector::from_counts(vec![0; WIDTH]);
        prop_assert!(!classify(&w, &fv).unwrap());
    }

    /// Fitness is the number of agreeing examples and never exceeds the dataset size.
    #[test]
    fn prop_fitness_counts_agreements(w in weights(), data in dataset()) {
        let fitness = evaluate_fitness(&w, &data).unwrap();
        let expected = data
            .iter()
            .filter(|ex| classify(&w, ex.features()).unwrap() == ex.label())
            .count();

        prop_assert_eq!(fitness, expected);
        prop_assert!(fitness <= data.len());

        let eval = evaluate(&w, &data).unwrap();
        prop_assert_eq!(eval.correct, fitness);
        prop_assert_eq!(
            eval.true_positives + eval.true_negatives + eval.false_positives + eval.false_negatives,
            data.len()
        );
    }

    /// A child takes a prefix from mom and the rest from dad.
    #[test]
    fn prop_crossover_parentage(mom in weights(), dad in weights(), seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let child = crossover(&Individual::new(mom.clone()), &Individual::new(dad.clone()), &mut rng).unwrap();

        prop_assert_eq!(child.width(), WIDTH);
        prop_assert!(!child.is_scored());
        let from_dad = (0..WIDTH)
            .find(|&i| child.weights()[i].to_bits() != mom[i].to_bits())
            .unwrap_or(WIDTH);
        for i in 0..WIDTH {
            if i < from_dad {
                prop_assert_eq!(child.weights()[i].to_bits(), mom[i].to_bits());
            } else {
                prop_assert_eq!(child.weights()[i].to_bits(), dad[i].to_bits());
            }
        }
    }

    /// Truncation keeps the fittest individual.
    #[test]
    fn prop_truncation_keeps_best(
        population in prop::collection::vec(weights(), 2..30),
        data in dataset(),
        survivors in 1usize..30
    ) {
        let mut population: Vec<Individual> = population
            .into_iter()
            .map(|w| {
                let mut ind = Individual::new(w);
                ind.score(&data).unwrap();
                ind
            })
            .collect();
        let best_before = population.iter().filter_map(Individual::fitness).max();

        truncate(&mut population, survivors).unwrap();

        prop_assert!(population.len() <= survivors);
        let best_after = population.iter().filter_map(Individual::fitness).max();
        prop_assert_eq!(best_before, best_after);
        prop_assert!(population.windows(2).all(|w| w[0].fitness() >= w[1].fitness()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The same seed always evolves the same weights.
    #[test]
    fn prop_seeded_runs_are_reproducible(seed in any::<u64>(), data in dataset()) {
        let config = EvolutionConfig {
            population_size: 12,
            generations: 4,
            seed,
            weight_bound: 5.0,
        };

        match (evolve(&config, &data), evolve(&config, &data)) {
            (Ok((a, a_stats)), Ok((b, b_stats))) => {
                let a_bits: Vec<u64> = a.weights().iter().map(|x| x.to_bits()).collect();
                let b_bits: Vec<u64> = b.weights().iter().map(|x| x.to_bits()).collect();
                prop_assert_eq!(a_bits, b_bits);
                prop_assert_eq!(a_stats.best_fitness, b_stats.best_fitness);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "seeded runs diverged"),
        }
    }
}
