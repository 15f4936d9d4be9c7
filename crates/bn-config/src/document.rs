//! Shared loading behaviour for the JSON input documents.

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::validate::ValidationError;

/// A document that can be read from a JSON file or string.
pub trait JsonDocument: DeserializeOwned {
    /// Human-readable document kind, used in error messages.
    const KIND: &'static str;

    /// Load the document from a JSON file.
    fn from_file(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse_json(&content)
    }

    /// Parse the document from a JSON string.
    fn parse_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json).map_err(|e| {
            ValidationError::ParseError(format!("Invalid {} JSON: {}", Self::KIND, e))
        })
    }
}
