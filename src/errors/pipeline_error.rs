//! Top-level error for a pipeline run.

use super::error_code::ErrorCode;
use super::{ConfigError, LoadError, PersistError};

/// Aggregates subsystem errors via `From` conversions. Any of these
/// aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Output error: {0}")]
    Persist(#[from] PersistError),
}

impl ErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Load(e) => e.error_code(),
            Self::Persist(e) => e.error_code(),
        }
    }
}
