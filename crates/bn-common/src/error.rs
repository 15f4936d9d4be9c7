//! Error types shared across the bn-* crates.

use thiserror::Error;

/// Result type alias for bn operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type.
///
/// Layer-specific errors (document validation, network construction,
/// evaluation) convert into this type at the crate boundaries.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("invalid network: {0}")]
    InvalidNetwork(String),

    #[error("unresolved query assignment: {0}")]
    UnresolvedQuery(String),

    // Inference errors (30-39)
    #[error("invalid table data: {0}")]
    InvalidTable(String),

    #[error("inference failed: {0}")]
    Inference(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting and exit code mapping.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidDocument(_) => 11,
            Error::InvalidNetwork(_) => 12,
            Error::UnresolvedQuery(_) => 13,
            Error::InvalidTable(_) => 30,
            Error::Inference(_) => 31,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// True for errors caused by the input documents rather than evaluation.
    pub fn is_config(&self) -> bool {
        (10..20).contains(&self.code())
    }
}
