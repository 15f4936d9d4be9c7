//! Network document loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for structure.json, values.json, and queries.json
//! - File and string loading through [`JsonDocument`]
//! - Semantic validation that reports table problems as warnings

pub mod document;
pub mod queries;
pub mod structure;
pub mod validate;
pub mod values;

pub use document::JsonDocument;
pub use queries::{Queries, Query};
pub use structure::{Structure, Variables};
pub use validate::{validate_documents, ValidationError, ValidationReport, ValidationWarning};
pub use values::{ConditionalRow, Values};
