//! Output formatting utilities for CLI.

use langid_ga::gp::Evaluation;
use langid_ga::{Alphabet, FeatureVector, TrainingSummary};
use serde::Serialize;

/// JSON-serializable feature extraction result.
#[derive(Debug, Serialize)]
pub(super) struct JsonFeatures<'a> {
    /// Symbols in column order.
    alphabet: String,
    /// One row per non-blank input line.
    vectors: &'a [FeatureVector],
}

impl<'a> JsonFeatures<'a> {
    /// Create from an alphabet and its extracted vectors.
    pub(super) fn new(alphabet: &Alphabet, vectors: &'a [FeatureVector]) -> Self {
        Self {
            alphabet: alphabet.symbols().iter().collect(),
            vectors,
        }
    }
}

/// Format feature vectors as a whitespace-separated table.
pub(super) fn format_features_text(alphabet: &Alphabet, vectors: &[FeatureVector]) -> String {
    let mut output = String::new();

    let header: Vec<String> = alphabet.symbols().iter().map(|c| format!("{c:>3}")).collect();
    output.push_str(&header.concat());
    output.push('\n');

    for fv in vectors {
        let row: Vec<String> = fv.counts().iter().map(|n| format!("{n:>3}")).collect();
        output.push_str(&row.concat());
        output.push('\n');
    }

    output
}

fn format_score(eval: &Evaluation) -> String {
    format!(
        "{}/{} ({:.2}%)",
        eval.correct,
        eval.total,
        eval.accuracy() * 100.0
    )
}

/// Format a training summary as human-readable text.
pub(super) fn format_summary_text(summary: &TrainingSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Training Result (seed: {})\n",
        summary.config.seed
    ));
    output.push_str(&format!(
        "  Population: {}  Generations: {}/{}{}\n",
        summary.config.population_size,
        summary.stats.completed_generations,
        summary.config.generations,
        if summary.stats.cancelled { " (stopped early)" } else { "" }
    ));
    output.push_str(&format!(
        "  Elapsed: {:.2}s\n\n",
        summary.stats.elapsed_seconds
    ));

    output.push_str(&format!("  positive (target): {}\n", summary.letters.positive));
    output.push_str(&format!("  negative (other):  {}\n\n", summary.letters.negative));

    output.push_str(&format!(
        "  Training fitness: {}\n",
        format_score(&summary.training)
    ));
    if let Some(test) = &summary.test {
        output.push_str(&format!("  Score on test set: {}\n", format_score(test)));
        output.push_str(&format!(
            "    target: {} right, {} wrong; other: {} right, {} wrong\n",
            test.true_positives, test.false_negatives, test.true_negatives, test.false_positives
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_table() {
        let alphabet = Alphabet::new("ab").unwrap();
        let vectors = alphabet.instances("aab\nb");
        let text = format_features_text(&alphabet, &vectors);

        assert_eq!(text, "  a  b\n  2  1\n  0  1\n");
    }

    #[test]
    fn test_features_json() {
        let alphabet = Alphabet::new("ab").unwrap();
        let vectors = alphabet.instances("aab");
        let json = serde_json::to_string(&JsonFeatures::new(&alphabet, &vectors)).unwrap();

        assert_eq!(json, r#"{"alphabet":"ab","vectors":[[2,1]]}"#);
    }
}
