//! Error types for the spamlens library.
//!
//! All errors are represented by the [`SpamLensError`] enum. The two
//! categories that matter most to callers are:
//!
//! - [`SpamLensError::Configuration`]: the request cannot produce a usable
//!   model (empty corpus, no vocabulary, mismatched lengths). Fatal.
//! - [`SpamLensError::Data`]: a single input record is malformed (unknown
//!   label, missing column). The caller decides whether to skip or abort.
//!
//! # Examples
//!
//! ```
//! use spamlens::error::{SpamLensError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpamLensError::configuration("corpus is empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for spamlens operations.
#[derive(Error, Debug)]
pub enum SpamLensError {
    /// I/O errors (file operations, stdin, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unusable training request: empty corpus, zero-size vocabulary,
    /// non-matching vector/label lengths, invalid parameters.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A malformed input record (unknown label, missing field).
    #[error("Data error: {0}")]
    Data(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Persisted model could not be used (unsupported version, wrong shape).
    #[error("Model error: {0}")]
    Model(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with SpamLensError.
pub type Result<T> = std::result::Result<T, SpamLensError>;

impl SpamLensError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        SpamLensError::Configuration(msg.into())
    }

    /// Create a new data error.
    pub fn data<S: Into<String>>(msg: S) -> Self {
        SpamLensError::Data(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SpamLensError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        SpamLensError::Model(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        SpamLensError::Serialization(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SpamLensError::Other(msg.into())
    }

    /// Check whether this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SpamLensError::Configuration(_))
    }

    /// Check whether this error is a data error.
    pub fn is_data(&self) -> bool {
        matches!(self, SpamLensError::Data(_))
    }
}

impl From<bincode::Error> for SpamLensError {
    fn from(err: bincode::Error) -> Self {
        SpamLensError::Serialization(err.to_string())
    }
}
