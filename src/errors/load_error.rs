//! Input document errors.

use super::error_code::{self, ErrorCode};

/// A record that cannot be turned into an `(id, lemma)` pair fails the
/// whole run; nothing is skipped.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("input is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input document must be an object keyed by lexicon id")]
    NotAnObject,

    #[error("record '{key}' is missing a text 'lemma' field")]
    MissingLemma { key: String },

    #[error("lexicon id '{key}' is not a one-letter prefix followed by a number")]
    InvalidIdentifier { key: String },

    #[error("lexicon id {id} appears more than once ('{first}' and '{second}')")]
    DuplicateIdentifier { id: u32, first: String, second: String },
}

impl ErrorCode for LoadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Read { .. } => error_code::INPUT_UNREADABLE,
            _ => error_code::MALFORMED_RECORD,
        }
    }
}
