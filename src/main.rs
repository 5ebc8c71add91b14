//! langid-ga CLI - Command-line interface for evolving language classifiers.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// langid-ga - Evolve a letter-frequency classifier for two languages
#[derive(Parser, Debug)]
#[command(name = "langid-ga")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Evolve a classifier on labeled corpora
    Train {
        /// Corpus files in the target language (one example per line)
        #[arg(long, required = true, num_args = 1..)]
        target: Vec<PathBuf>,

        /// Corpus files in the other language
        #[arg(long, required = true, num_args = 1..)]
        other: Vec<PathBuf>,

        /// Held-out corpus files in the target language
        #[arg(long, num_args = 1..)]
        test_target: Vec<PathBuf>,

        /// Held-out corpus files in the other language
        #[arg(long, num_args = 1..)]
        test_other: Vec<PathBuf>,

        /// Population size (default: 100)
        #[arg(short, long)]
        population: Option<usize>,

        /// Number of generations (default: 20)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Random seed (default: wall clock)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Initial and mutated weights are drawn from [-bound, bound) (default: 5)
        #[arg(long)]
        weight_bound: Option<f64>,

        /// JSON file with an evolution configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(long)]
        progress: bool,
    },

    /// Print the letter-count vector of every line in a file
    Features {
        /// Text file to analyze
        #[arg(required = true)]
        file: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match args.command {
        Commands::Train {
            target,
            other,
            test_target,
            test_other,
            population,
            generations,
            seed,
            weight_bound,
            config,
            format,
            progress,
        } => cli::train::execute(cli::train::TrainOptions {
            target,
            other,
            test_target,
            test_other,
            population,
            generations,
            seed,
            weight_bound,
            config,
            format,
            progress,
        }),

        Commands::Features { file, format } => cli::features::execute(&file, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
