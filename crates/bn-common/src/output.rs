//! Output format selection for answer emission.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How answers are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Compact JSON array of `{index, answer}` objects
    #[default]
    Json,
    /// Indented JSON
    Pretty,
    /// One `index<TAB>answer` line per query
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}
