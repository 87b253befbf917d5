//! Machine-readable error codes.

/// Every error enum implements this so callers can report a stable code
/// alongside the human-readable message.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "INVALID_CONFIGURATION").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_CONFIGURATION: &str = "INVALID_CONFIGURATION";
pub const MALFORMED_RECORD: &str = "MALFORMED_RECORD";
pub const INPUT_UNREADABLE: &str = "INPUT_UNREADABLE";
pub const OUTPUT_FAILED: &str = "OUTPUT_FAILED";
