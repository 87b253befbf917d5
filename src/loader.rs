// File: src/loader.rs
//! Reads a Strong's dictionary document into `(id, lemma)` pairs.
//!
//! The document is a JSON object keyed by identifiers like "H430", each
//! value an object with at least a text `lemma`. Other fields are ignored.

use crate::core::types::LexiconId;
use crate::errors::LoadError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Lexicon id -> lemma (the raw, pointed spelling).
pub type Lexicon = BTreeMap<LexiconId, String>;

/// "H430" -> 430. The first character is the lexicon prefix and is dropped;
/// the rest must be a plain decimal number.
pub fn parse_lexicon_id(key: &str) -> Result<LexiconId, LoadError> {
    let invalid = || LoadError::InvalidIdentifier { key: key.to_string() };
    let mut chars = key.chars();
    chars.next().ok_or_else(invalid)?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    digits.parse().map_err(|_| invalid())
}

pub fn parse_lexicon(text: &str) -> Result<Lexicon, LoadError> {
    let document: Value = serde_json::from_str(text)?;
    let Value::Object(records) = document else {
        return Err(LoadError::NotAnObject);
    };

    let mut lexicon = Lexicon::new();
    let mut keys: BTreeMap<LexiconId, String> = BTreeMap::new();
    for (key, record) in records {
        let lexicon_id = parse_lexicon_id(&key)?;
        let lemma = record
            .get("lemma")
            .and_then(Value::as_str)
            .ok_or_else(|| LoadError::MissingLemma { key: key.clone() })?;
        if let Some(first) = keys.insert(lexicon_id, key.clone()) {
            return Err(LoadError::DuplicateIdentifier { id: lexicon_id, first, second: key });
        }
        lexicon.insert(lexicon_id, lemma.to_string());
    }
    Ok(lexicon)
}

pub fn load_lexicon(path: &Path) -> Result<Lexicon, LoadError> {
    let text = fs::read_to_string(path)
        .map_err(|source| LoadError::Read { path: path.display().to_string(), source })?;
    let lexicon = parse_lexicon(&text)?;
    info!(path = %path.display(), records = lexicon.len(), "loaded lexicon");
    Ok(lexicon)
}
