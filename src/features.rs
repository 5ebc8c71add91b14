//! Letter-frequency feature extraction.
//!
//! Text is case-folded and reduced to one count per alphabet symbol. The
//! width of every vector produced here equals the alphabet size, which is the
//! width the classifier weights are generated with.

use crate::error::{GaError, GaResult};
use serde::Serialize;

/// Symbols of the default alphabet, in feature order.
pub const LATIN_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Ordered set of symbols counted by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::latin()
    }
}

impl Alphabet {
    /// The 26 lowercase ASCII letters.
    #[must_use]
    pub fn latin() -> Self {
        Self {
            symbols: LATIN_LETTERS.chars().collect(),
        }
    }

    /// Build an alphabet from explicit symbols.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidConfig`] if the symbol list is empty, holds
    /// an uppercase symbol (case folding would never produce it), or repeats
    /// a symbol.
    pub fn new(symbols: &str) -> GaResult<Self> {
        let mut out: Vec<char> = Vec::with_capacity(symbols.len());
        for c in symbols.chars() {
            if c.is_uppercase() {
                return Err(GaError::InvalidConfig(format!(
                    "alphabet symbol {c:?} is not lowercase"
                )));
            }
            if out.contains(&c) {
                return Err(GaError::InvalidConfig(format!(
                    "alphabet symbol {c:?} appears twice"
                )));
            }
            out.push(c);
        }
        if out.is_empty() {
            return Err(GaError::InvalidConfig("alphabet is empty".to_string()));
        }
        Ok(Self { symbols: out })
    }

    /// Number of symbols, which is also the feature width.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed alphabet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in feature order.
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Feature index of a (already case-folded) symbol.
    #[must_use]
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().position(|&s| s == symbol)
    }

    /// Count occurrences of each symbol in `text` after case folding.
    ///
    /// Characters outside the alphabet are ignored. Empty text yields the
    /// zero vector.
    #[must_use]
    pub fn extract(&self, text: &str) -> FeatureVector {
        let mut counts = vec![0u32; self.symbols.len()];
        for c in text.chars().flat_map(char::to_lowercase) {
            if let Some(i) = self.index_of(c) {
                counts[i] = counts[i].saturating_add(1);
            }
        }
        FeatureVector { counts }
    }

    /// Extract one feature vector per non-blank line of `text`.
    ///
    /// Lines are trimmed before the blank check; `\r\n` endings are accepted.
    #[must_use]
    pub fn instances(&self, text: &str) -> Vec<FeatureVector> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.extract(line))
            .collect()
    }
}

/// Per-symbol occurrence counts for one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FeatureVector {
    counts: Vec<u32>,
}

impl FeatureVector {
    /// Wrap precomputed counts.
    ///
    /// Width is not checked here; classification rejects vectors whose width
    /// disagrees with the weights.
    #[must_use]
    pub fn from_counts(counts: Vec<u32>) -> Self {
        Self { counts }
    }

    /// Counts in alphabet order.
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Feature width.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True for a zero-width vector.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// True when no alphabet symbol occurred.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Total number of counted symbols.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }
}
