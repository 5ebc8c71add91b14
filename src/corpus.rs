//! Loading line-delimited corpora into labeled datasets.
//!
//! Each non-blank line of a corpus file becomes one example, tagged with the
//! label of the language the file belongs to.

use crate::dataset::{Dataset, LabeledExample};
use crate::features::Alphabet;
use log::debug;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A corpus file and the label its lines receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusSource {
    /// Path to a UTF-8 text file, one example per line.
    pub path: PathBuf,
    /// `true` for the target language.
    pub label: bool,
}

impl CorpusSource {
    /// Create a source.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, label: bool) -> Self {
        Self {
            path: path.into(),
            label,
        }
    }
}

/// Error while loading a corpus.
#[derive(Debug)]
pub enum CorpusError {
    /// The file could not be read.
    Io {
        /// Offending file.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The file holds no non-blank lines.
    Empty {
        /// Offending file.
        path: PathBuf,
    },
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Empty { path } => write!(f, "corpus {} has no non-blank lines", path.display()),
        }
    }
}

impl std::error::Error for CorpusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Empty { .. } => None,
        }
    }
}

/// Read a whole corpus file.
///
/// # Errors
///
/// Returns [`CorpusError::Io`] if the file is missing or not valid UTF-8.
pub fn read_corpus(path: &Path) -> Result<String, CorpusError> {
    fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a corpus and turn each non-blank line into an example labeled `label`.
///
/// # Errors
///
/// Returns [`CorpusError::Io`] on read failure or [`CorpusError::Empty`] if
/// no example was produced.
pub fn load_examples(
    path: &Path,
    label: bool,
    alphabet: &Alphabet,
) -> Result<Vec<LabeledExample>, CorpusError> {
    let text = read_corpus(path)?;
    let examples: Vec<LabeledExample> = alphabet
        .instances(&text)
        .into_iter()
        .map(|fv| LabeledExample::new(fv, label))
        .collect();

    if examples.is_empty() {
        return Err(CorpusError::Empty {
            path: path.to_path_buf(),
        });
    }
    debug!("loaded {} examples from {} (label={label})", examples.len(), path.display());
    Ok(examples)
}

/// Load every source, in order, into one dataset.
///
/// # Errors
///
/// Stops at the first source that fails to load.
pub fn load_dataset(sources: &[CorpusSource], alphabet: &Alphabet) -> Result<Dataset, CorpusError> {
    let mut dataset = Dataset::new();
    for source in sources {
        for example in load_examples(&source.path, source.label, alphabet)? {
            dataset.push(example);
        }
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn corpus_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_examples_labels_every_line() {
        let file = corpus_file("the house\n\nis red\n");
        let examples = load_examples(file.path(), false, &Alphabet::latin()).unwrap();

        assert_eq!(examples.len(), 2);
        assert!(examples.iter().all(|ex| !ex.label()));
        assert_eq!(examples[1].features().total(), 5);
    }

    #[test]
    fn test_load_dataset_keeps_source_order() {
        let en = corpus_file("one\ntwo\n");
        let es = corpus_file("uno\n");
        let sources = [CorpusSource::new(en.path(), false), CorpusSource::new(es.path(), true)];

        let dataset = load_dataset(&sources, &Alphabet::latin()).unwrap();
        let labels: Vec<bool> = dataset.iter().map(LabeledExample::label).collect();
        assert_eq!(labels, vec![false, false, true]);
    }

    #[test]
    fn test_blank_corpus_is_an_error() {
        let file = corpus_file("\n   \n");
        let err = load_examples(file.path(), true, &Alphabet::latin()).unwrap_err();
        assert!(matches!(err, CorpusError::Empty { .. }));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_corpus(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }
}
