#![no_main]

use arbitrary::Arbitrary;
use langid_ga::gp::{classify, evaluate};
use langid_ga::{Dataset, FeatureVector, LabeledExample};
use libfuzzer_sys::fuzz_target;

/// Structured input for classification fuzzing.
#[derive(Arbitrary, Debug)]
struct ClassifyInput {
    /// Raw weights; non-finite values are replaced.
    weights: Vec<f64>,
    /// Letter counts and label for each example.
    examples: Vec<(Vec<u32>, bool)>,
}

fuzz_target!(|input: ClassifyInput| {
    let width = input.weights.len().min(64);
    let weights: Vec<f64> = input.weights[..width]
        .iter()
        .map(|w| if w.is_finite() { w.clamp(-1e6, 1e6) } else { 0.0 })
        .collect();

    let dataset: Dataset = input
        .examples
        .into_iter()
        .take(256)
        .map(|(mut counts, label)| {
            counts.resize(width, 0);
            LabeledExample::new(FeatureVector::from_counts(counts), label)
        })
        .collect();

    let Ok(eval) = evaluate(&weights, &dataset) else {
        assert!(dataset.is_empty());
        return;
    };
    assert_eq!(eval.total, dataset.len());
    assert!(eval.correct <= eval.total);

    let agreeing = dataset
        .iter()
        .filter(|ex| classify(&weights, ex.features()).ok() == Some(ex.label()))
        .count();
    assert_eq!(agreeing, eval.correct);
});
