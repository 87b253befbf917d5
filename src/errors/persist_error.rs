//! Output errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON rendering failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode rendering failed: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("could not move output into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl ErrorCode for PersistError {
    fn error_code(&self) -> &'static str {
        error_code::OUTPUT_FAILED
    }
}
