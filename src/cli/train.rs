//! CLI command for training a classifier.

#![allow(clippy::needless_pass_by_value)]

use super::output::format_summary_text;
use super::{CliError, OutputFormat};
use indicatif::{ProgressBar, ProgressStyle};
use langid_ga::corpus::{load_dataset, CorpusSource};
use langid_ga::gp::Evolution;
use langid_ga::{Alphabet, Dataset, EvolutionConfig, TrainingSummary, OTHER_LABEL, TARGET_LABEL};
use log::info;
use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

/// Options for the train command.
#[derive(Debug)]
pub(crate) struct TrainOptions {
    /// Training corpora in the target language.
    pub(crate) target: Vec<PathBuf>,
    /// Training corpora in the other language.
    pub(crate) other: Vec<PathBuf>,
    /// Held-out corpora in the target language.
    pub(crate) test_target: Vec<PathBuf>,
    /// Held-out corpora in the other language.
    pub(crate) test_other: Vec<PathBuf>,
    /// Population size override.
    pub(crate) population: Option<usize>,
    /// Generation count override.
    pub(crate) generations: Option<usize>,
    /// Seed override.
    pub(crate) seed: Option<u64>,
    /// Weight bound override.
    pub(crate) weight_bound: Option<f64>,
    /// JSON configuration file.
    pub(crate) config: Option<PathBuf>,
    /// Output format.
    pub(crate) format: OutputFormat,
    /// Show a progress bar over generations.
    pub(crate) progress: bool,
}

/// Execute the train command.
///
/// # Errors
///
/// Returns an error if a corpus cannot be loaded, the configuration is
/// invalid, or the run aborts.
pub(crate) fn execute(options: TrainOptions) -> Result<(), CliError> {
    let config = build_config(&options)?;

    // Other language first, then target
    let training_sources = sources(&options.other, &options.target);
    let test_sources = sources(&options.test_other, &options.test_target);
    check_disjoint(&training_sources, &test_sources)?;

    let alphabet = Alphabet::latin();
    let training = load_dataset(&training_sources, &alphabet)?;
    let test = if test_sources.is_empty() {
        None
    } else {
        Some(load_dataset(&test_sources, &alphabet)?)
    };

    let (positives, negatives) = training.label_counts();
    info!(
        "training on {} examples ({positives} target, {negatives} other), seed {}",
        training.len(),
        config.seed
    );

    let summary = train(&config, &alphabet, &training, test.as_ref(), options.progress)?;

    match options.format {
        OutputFormat::Text => print!("{}", format_summary_text(&summary)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

/// Evolve on `training` and summarize the best individual.
fn train(
    config: &EvolutionConfig,
    alphabet: &Alphabet,
    training: &Dataset,
    test: Option<&Dataset>,
    progress: bool,
) -> Result<TrainingSummary, CliError> {
    let pb = if progress {
        let pb = ProgressBar::new(u64::try_from(config.generations).unwrap_or(u64::MAX));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} generations {msg}")
                .map_err(|e| CliError::new(format!("invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let (best, stats) = Evolution::new(config, training)?.run_with(|generation| {
        if let Some(pb) = &pb {
            pb.set_message(format!("best={}", generation.fitness.best_fitness));
            pb.inc(1);
        }
        ControlFlow::Continue(())
    })?;

    if let Some(pb) = pb {
        pb.finish_with_message(format!("best={}", stats.best_fitness));
    }

    Ok(TrainingSummary::new(config, alphabet, &best, stats, training, test)?)
}

/// Configuration from the optional JSON file, with flags taking precedence.
fn build_config(options: &TrainOptions) -> Result<EvolutionConfig, CliError> {
    let mut config = match &options.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                CliError::new(format!("Failed to read {}: {e}", path.display()))
            })?;
            serde_json::from_str(&text)?
        }
        None => EvolutionConfig {
            seed: wall_clock_seed(),
            ..EvolutionConfig::default()
        },
    };

    if let Some(population) = options.population {
        config.population_size = population;
    }
    if let Some(generations) = options.generations {
        config.generations = generations;
    }
    if let Some(seed) = options.seed {
        config.seed = seed;
    }
    if let Some(bound) = options.weight_bound {
        config.weight_bound = bound;
    }

    config.validate()?;
    Ok(config)
}

fn wall_clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(42)
}

fn sources(other: &[PathBuf], target: &[PathBuf]) -> Vec<CorpusSource> {
    other
        .iter()
        .map(|path| CorpusSource::new(path, OTHER_LABEL))
        .chain(target.iter().map(|path| CorpusSource::new(path, TARGET_LABEL)))
        .collect()
}

/// Reject a held-out corpus that is also a training corpus.
fn check_disjoint(training: &[CorpusSource], test: &[CorpusSource]) -> Result<(), CliError> {
    for held_out in test {
        if training.iter().any(|t| same_file(&t.path, &held_out.path)) {
            return Err(CliError::new(format!(
                "{} is used for both training and testing",
                held_out.path.display()
            )));
        }
    }
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
