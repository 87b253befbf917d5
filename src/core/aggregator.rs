// src/core/aggregator.rs
use crate::core::classifier::Modulus;
use crate::core::encoder::SchemeRegistry;
use crate::core::normalizer::strip;
use crate::core::types::{Diacritic, Encoding, LexiconEntry, LexiconId, Word};
use serde::Serialize;
use std::collections::btree_map::{BTreeMap, Entry};
use tracing::{debug, warn};

/// Every consonantal form of a run, with all of its spellings.
/// Serializes as the plain `form -> Word` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WordSet {
    words: BTreeMap<String, Word>,
    #[serde(skip)]
    entries: BTreeMap<LexiconId, LexiconEntry>,
}

impl WordSet {
    pub fn get(&self, form: &str) -> Option<&Word> {
        self.words.get(form)
    }

    /// Words in form order.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.words.values()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Lexicon id -> the record's spelling and its stripped form.
    pub fn entries(&self) -> &BTreeMap<LexiconId, LexiconEntry> {
        &self.entries
    }
}

/// Collects raw spellings into words. Encodings are computed the first
/// time a form is seen and reused for every later spelling of it.
pub struct WordSetBuilder<'r> {
    registry: &'r SchemeRegistry,
    modulus: Modulus,
    words: BTreeMap<String, Word>,
    entries: BTreeMap<LexiconId, LexiconEntry>,
}

impl<'r> WordSetBuilder<'r> {
    pub fn new(registry: &'r SchemeRegistry, modulus: Modulus) -> Self {
        Self { registry, modulus, words: BTreeMap::new(), entries: BTreeMap::new() }
    }

    /// Adds one `(id, spelling)` record. Ids are expected to be unique;
    /// the loader guarantees this for file input.
    pub fn insert(&mut self, lexicon_id: LexiconId, spelling: &str) {
        let form = strip(spelling);
        if form.is_empty() {
            warn!(lexicon_id, spelling, "spelling has no letters, using the empty form");
        }
        let diacritic = Diacritic::new(lexicon_id, spelling);

        match self.words.entry(form.clone()) {
            Entry::Occupied(mut slot) => {
                debug!(lexicon_id, form = %form, "merging spelling into existing word");
                slot.get_mut().diacritics.push(diacritic);
            }
            Entry::Vacant(slot) => {
                let encodings = encode_all(self.registry, self.modulus, &form);
                debug!(lexicon_id, form = %form, "new word");
                slot.insert(Word { form: form.clone(), encodings, diacritics: vec![diacritic] });
            }
        }

        self.entries
            .insert(lexicon_id, LexiconEntry { spelling: spelling.to_string(), form });
    }

    pub fn finish(mut self) -> WordSet {
        for word in self.words.values_mut() {
            word.diacritics.sort();
        }
        WordSet { words: self.words, entries: self.entries }
    }
}

fn encode_all(registry: &SchemeRegistry, modulus: Modulus, form: &str) -> BTreeMap<String, Encoding> {
    registry
        .iter()
        .map(|scheme| {
            let value = scheme.encode(form);
            let equivalence_class = modulus.classify(&value);
            (scheme.name().to_string(), Encoding { value, equivalence_class })
        })
        .collect()
}

/// Builds the word set from `(id, spelling)` records in any order.
pub fn aggregate<I, S>(records: I, registry: &SchemeRegistry, modulus: Modulus) -> WordSet
where
    I: IntoIterator<Item = (LexiconId, S)>,
    S: AsRef<str>,
{
    let mut builder = WordSetBuilder::new(registry, modulus);
    for (lexicon_id, spelling) in records {
        builder.insert(lexicon_id, spelling.as_ref());
    }
    builder.finish()
}
