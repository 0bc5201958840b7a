//! Error types for the localsync engine.

use thiserror::Error;

/// The one failure the sync dispatcher reports through its error callback.
pub const RECORD_NOT_FOUND: &str = "Record not found";

/// All possible errors from the engine.
///
/// None of these are reported through sync callbacks; they are returned to the
/// caller of [`crate::sync`] as faults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Model errors
    #[error("model has no identifier")]
    MissingId,

    #[error("identifier cannot be stored in the index: {0}")]
    InvalidId(String),

    #[error("unknown sync method: {0}")]
    InvalidMethod(String),

    // Storage errors
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    // State errors
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
