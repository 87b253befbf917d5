//! Configuration errors. Raised before any input is read.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("equivalence base must be a positive 32-bit integer, got {base}")]
    InvalidBase { base: i64 },

    #[error("unknown numbering scheme '{name}' (registered: {registered})")]
    UnknownScheme { name: String, registered: String },

    #[error("no numbering scheme selected")]
    NoSchemesSelected,

    #[error("final-letter override key '{key}' must be a single letter")]
    InvalidFinalLetter { key: String },

    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Read { .. } => error_code::INPUT_UNREADABLE,
            _ => error_code::INVALID_CONFIGURATION,
        }
    }
}
