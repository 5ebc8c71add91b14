//! Features command implementation.

use super::output::{format_features_text, JsonFeatures};
use super::{CliError, OutputFormat};
use langid_ga::corpus::read_corpus;
use langid_ga::Alphabet;
use std::path::Path;

/// Execute the features command: one letter-count vector per non-blank line.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub(crate) fn execute(file: &Path, format: OutputFormat) -> Result<(), CliError> {
    let text = read_corpus(file)?;
    let alphabet = Alphabet::latin();
    let vectors = alphabet.instances(&text);

    match format {
        OutputFormat::Text => print!("{}", format_features_text(&alphabet, &vectors)),
        OutputFormat::Json => {
            let json = JsonFeatures::new(&alphabet, &vectors);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
