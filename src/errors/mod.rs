//! Error handling for the mispar pipeline.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod load_error;
pub mod persist_error;
pub mod pipeline_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use load_error::LoadError;
pub use persist_error::PersistError;
pub use pipeline_error::PipelineError;
