// src/core/encoder.rs
//! Numbering schemes ("mispar") and the registry that selects them by name.

use crate::core::normalizer::ALEF;
use crate::core::types::Numeral;
use crate::errors::ConfigError;
use num_bigint::BigUint;
use std::collections::BTreeMap;
use std::fmt;

pub const HECHRECHI: &str = "hechrechi";
pub const GADOL: &str = "gadol";
pub const HAAKHOR: &str = "haakhor";

/// A rule that turns a consonantal form into a number.
///
/// Implementations are stateless apart from their own value tables, so one
/// registry can be shared by every stage of a run.
pub trait NumberingScheme: fmt::Debug + Send + Sync {
    /// Registry key; also the name used in output documents.
    fn name(&self) -> &str;

    /// Value of the form. The empty form is always 0.
    fn encode(&self, form: &str) -> Numeral;
}

/// Ordinal of a letter counted from `ALEF` = 1. Anything below the anchor
/// (vowel points that slipped through) counts as 0.
pub fn letter_value(c: char) -> u32 {
    if c < ALEF {
        0
    } else {
        c as u32 - ALEF as u32 + 1
    }
}

/// Sum of letter ordinals. "אב" = 1 + 2 = 3.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hechrechi;

impl NumberingScheme for Hechrechi {
    fn name(&self) -> &str {
        HECHRECHI
    }

    fn encode(&self, form: &str) -> Numeral {
        form.chars().map(letter_value).sum::<BigUint>().into()
    }
}

/// Values for the five final forms under the expanded scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalLetterTable {
    values: BTreeMap<char, u32>,
}

impl FinalLetterTable {
    pub const FINALS: [char; 5] = ['ך', 'ם', 'ן', 'ף', 'ץ'];

    /// Continues the sequence past ת (27): ך=28, ם=29, ן=30, ף=31, ץ=32.
    pub fn continuing() -> Self {
        let last = letter_value('ת');
        let values = Self::FINALS
            .iter()
            .zip(1u32..)
            .map(|(&c, step)| (c, last + step))
            .collect();
        Self { values }
    }

    /// Replaces the value of one letter. Letters that are not final forms
    /// may be listed too; they are then valued by the table instead of by
    /// their ordinal.
    pub fn with_override(mut self, letter: char, value: u32) -> Self {
        self.values.insert(letter, value);
        self
    }

    pub fn get(&self, letter: char) -> Option<u32> {
        self.values.get(&letter).copied()
    }
}

impl Default for FinalLetterTable {
    fn default() -> Self {
        Self::continuing()
    }
}

/// Same as `Hechrechi`, except final forms take their value from a
/// `FinalLetterTable`.
#[derive(Debug, Clone, Default)]
pub struct Gadol {
    finals: FinalLetterTable,
}

impl Gadol {
    pub fn new(finals: FinalLetterTable) -> Self {
        Self { finals }
    }
}

impl NumberingScheme for Gadol {
    fn name(&self) -> &str {
        GADOL
    }

    fn encode(&self, form: &str) -> Numeral {
        form.chars()
            .map(|c| self.finals.get(c).unwrap_or_else(|| letter_value(c)))
            .sum::<BigUint>()
            .into()
    }
}

/// Reads the form as a base-10 numeral with the first letter in the ones
/// place: letter i contributes `value * 10^i`. "אב" = 1 + 2*10 = 21.
#[derive(Debug, Default, Clone, Copy)]
pub struct HaAkhor;

impl NumberingScheme for HaAkhor {
    fn name(&self) -> &str {
        HAAKHOR
    }

    fn encode(&self, form: &str) -> Numeral {
        let mut total = BigUint::default();
        let mut weight = BigUint::from(1u32);
        for c in form.chars() {
            total += &weight * letter_value(c);
            weight *= 10u32;
        }
        total.into()
    }
}

/// Name -> scheme lookup, in registration order.
///
/// The aggregator only ever iterates a registry, so adding a scheme means
/// registering one more implementation here.
#[derive(Debug, Default)]
pub struct SchemeRegistry {
    schemes: Vec<Box<dyn NumberingScheme>>,
}

impl SchemeRegistry {
    pub fn new() -> Self {
        Self { schemes: Vec::new() }
    }

    /// The three built-in schemes, with the given final-letter table for Gadol.
    pub fn standard(finals: FinalLetterTable) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(Hechrechi));
        registry.register(Box::new(Gadol::new(finals)));
        registry.register(Box::new(HaAkhor));
        registry
    }

    /// Adds a scheme. A scheme with the same name replaces the old one in place.
    pub fn register(&mut self, scheme: Box<dyn NumberingScheme>) {
        match self.schemes.iter().position(|s| s.name() == scheme.name()) {
            Some(idx) => self.schemes[idx] = scheme,
            None => self.schemes.push(scheme),
        }
    }

    pub fn get(&self, name: &str) -> Result<&dyn NumberingScheme, ConfigError> {
        self.schemes
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
            .ok_or_else(|| self.unknown(name))
    }

    pub fn names(&self) -> Vec<&str> {
        self.schemes.iter().map(|s| s.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn NumberingScheme> {
        self.schemes.iter().map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Keeps only the named schemes, in the order given. Every name must be
    /// registered and at least one must be given.
    pub fn select<S: AsRef<str>>(mut self, names: &[S]) -> Result<Self, ConfigError> {
        let registered = self.names().join(", ");
        let mut selected = Self::new();
        for name in names {
            let name = name.as_ref();
            if selected.get(name).is_ok() {
                continue;
            }
            let idx = self
                .schemes
                .iter()
                .position(|s| s.name() == name)
                .ok_or_else(|| ConfigError::UnknownScheme {
                    name: name.to_string(),
                    registered: registered.clone(),
                })?;
            selected.register(self.schemes.remove(idx));
        }
        if selected.is_empty() {
            return Err(ConfigError::NoSchemesSelected);
        }
        Ok(selected)
    }

    fn unknown(&self, name: &str) -> ConfigError {
        ConfigError::UnknownScheme {
            name: name.to_string(),
            registered: self.names().join(", "),
        }
    }
}
