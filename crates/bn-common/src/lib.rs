//! Common types for Bayesian-network enumeration.
//!
//! This crate provides foundational types shared across the bn-* crates:
//! - Variable identifiers and value labels
//! - Label-level partial and complete assignments
//! - Common error types
//! - Output formats

pub mod assignment;
pub mod error;
pub mod id;
pub mod output;

pub use assignment::Assignment;
pub use error::{Error, Result};
pub use id::{Value, VariableId};
pub use output::OutputFormat;
