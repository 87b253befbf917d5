// src/core/grouper.rs
use crate::core::aggregator::WordSet;
use crate::core::types::Word;
use serde::Serialize;
use std::collections::BTreeMap;

/// Equivalence class -> words, sorted by form.
pub type ClassBuckets<'w> = BTreeMap<u32, Vec<&'w Word>>;

/// First letter -> equivalence class -> words, for a single scheme.
/// A read-only view over a `WordSet`; it owns no words itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupIndex<'w> {
    #[serde(skip)]
    scheme: String,
    letters: BTreeMap<String, ClassBuckets<'w>>,
}

impl<'w> GroupIndex<'w> {
    /// Groups every word of the set by its first letter and its class under
    /// `scheme`. Words without an encoding for that scheme are left out;
    /// the aggregator computes all registered schemes, so for a registered
    /// name that never happens.
    pub fn build(words: &'w WordSet, scheme: &str) -> Self {
        let mut letters: BTreeMap<String, ClassBuckets<'w>> = BTreeMap::new();
        for word in words.words() {
            let Some(encoding) = word.encoding(scheme) else {
                continue;
            };
            letters
                .entry(word.first_letter())
                .or_default()
                .entry(encoding.equivalence_class)
                .or_default()
                .push(word);
        }
        for bucket in letters.values_mut().flat_map(|classes| classes.values_mut()) {
            bucket.sort_by(|a, b| a.form.cmp(&b.form));
        }
        Self { scheme: scheme.to_string(), letters }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Words starting with `letter` whose class is `class`.
    pub fn bucket(&self, letter: &str, class: u32) -> &[&'w Word] {
        self.letters
            .get(letter)
            .and_then(|classes| classes.get(&class))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn letters(&self) -> impl Iterator<Item = (&str, &ClassBuckets<'w>)> {
        self.letters.iter().map(|(letter, classes)| (letter.as_str(), classes))
    }

    /// Total number of word placements; equals the word count of the set.
    pub fn word_count(&self) -> usize {
        self.letters.values().flat_map(|classes| classes.values()).map(Vec::len).sum()
    }
}
