// src/core/types.rs
use num_bigint::BigUint;
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// The numeric part of a Strong's identifier ("H430" -> 430).
pub type LexiconId = u32;

/// One observed spelling of a word, vowel points and all, as it appears
/// in the source lexicon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diacritic {
    pub lexicon_id: LexiconId,
    pub spelling: String,
}

impl Diacritic {
    pub fn new(lexicon_id: LexiconId, spelling: impl Into<String>) -> Self {
        Self { lexicon_id, spelling: spelling.into() }
    }
}

// Spelling first; the id only breaks ties between identical spellings.
impl Ord for Diacritic {
    fn cmp(&self, other: &Self) -> Ordering {
        self.spelling
            .cmp(&other.spelling)
            .then(self.lexicon_id.cmp(&other.lexicon_id))
    }
}

impl PartialOrd for Diacritic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A non-negative numeral of any size. The digit-weighted scheme gains a
/// decimal place per letter, so long forms outgrow every fixed-width integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Numeral(BigUint);

impl Numeral {
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn to_u128(&self) -> Option<u128> {
        u128::try_from(&self.0).ok()
    }
}

impl From<BigUint> for Numeral {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u32> for Numeral {
    fn from(value: u32) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u64> for Numeral {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u128> for Numeral {
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Always a plain number in JSON, however wide.
impl Serialize for Numeral {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::Error;

        match self.to_u128() {
            Some(value) => serializer.serialize_u128(value),
            None => self
                .0
                .to_str_radix(10)
                .parse::<serde_json::Number>()
                .map_err(S::Error::custom)?
                .serialize(serializer),
        }
    }
}

/// A word's numeral value under one scheme and the class it reduces to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encoding {
    pub value: Numeral,
    pub equivalence_class: u32,
}

/// The consonantal form shared by one or more diacritics.
/// This is the "value" in the words document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    pub form: String,
    /// Scheme name -> encoding. Filled once, when the form is first seen.
    pub encodings: BTreeMap<String, Encoding>,
    /// Every spelling that strips to `form`. Sorted once aggregation is done.
    pub diacritics: Vec<Diacritic>,
}

impl Word {
    /// The encoding for a scheme, if that scheme was computed for this run.
    pub fn encoding(&self, scheme: &str) -> Option<&Encoding> {
        self.encodings.get(scheme)
    }

    /// The first character of the form as a bucket key. Empty forms
    /// land in the "" bucket.
    pub fn first_letter(&self) -> String {
        self.form.chars().next().map(String::from).unwrap_or_default()
    }
}

/// One input record with its stripped form, keyed by lexicon id in the
/// diacritics document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub spelling: String,
    pub form: String,
}
