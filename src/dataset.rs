//! Labeled examples and the datasets built from them.

use crate::features::FeatureVector;

/// A feature vector tagged with its language.
///
/// `true` marks the target language, `false` the other one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledExample {
    features: FeatureVector,
    label: bool,
}

impl LabeledExample {
    /// Create an example.
    #[must_use]
    pub fn new(features: FeatureVector, label: bool) -> Self {
        Self { features, label }
    }

    /// The example's features.
    #[must_use]
    pub fn features(&self) -> &FeatureVector {
        &self.features
    }

    /// The example's label.
    #[must_use]
    pub fn label(&self) -> bool {
        self.label
    }
}

/// Ordered collection of labeled examples.
///
/// Used both as a training set and as a held-out test set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    examples: Vec<LabeledExample>,
}

impl Dataset {
    /// An empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing examples, keeping their order.
    #[must_use]
    pub fn from_examples(examples: Vec<LabeledExample>) -> Self {
        Self { examples }
    }

    /// Append one example.
    pub fn push(&mut self, example: LabeledExample) {
        self.examples.push(example);
    }

    /// Append every feature vector with the same label.
    pub fn extend_labeled<I>(&mut self, features: I, label: bool)
    where
        I: IntoIterator<Item = FeatureVector>,
    {
        self.examples
            .extend(features.into_iter().map(|fv| LabeledExample::new(fv, label)));
    }

    /// Number of examples; also the fitness ceiling.
    #[must_use]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// True when there are no examples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Examples in order.
    #[must_use]
    pub fn examples(&self) -> &[LabeledExample] {
        &self.examples
    }

    /// Iterate over the examples.
    pub fn iter(&self) -> std::slice::Iter<'_, LabeledExample> {
        self.examples.iter()
    }

    /// Feature width of the first example, if any.
    #[must_use]
    pub fn width(&self) -> Option<usize> {
        self.examples.first().map(|ex| ex.features.len())
    }

    /// Count of `(true, false)` labels.
    #[must_use]
    pub fn label_counts(&self) -> (usize, usize) {
        let positives = self.examples.iter().filter(|ex| ex.label).count();
        (positives, self.examples.len() - positives)
    }
}

impl FromIterator<LabeledExample> for Dataset {
    fn from_iter<T: IntoIterator<Item = LabeledExample>>(iter: T) -> Self {
        Self {
            examples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a LabeledExample;
    type IntoIter = std::slice::Iter<'a, LabeledExample>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}
