//! # Import Error Types Module
//!
//! This module defines custom error types used throughout the recipe import pipeline.
//! It provides structured error handling for the multi-source merge step and other
//! precondition violations.
//!
//! Note that empty or unusable single-document input is NOT an error: the pipeline
//! produces a zero-confidence [`crate::import_model::ImportResult`] for it. Errors
//! are reserved for genuine caller mistakes such as merging zero sources.

/// Custom error types for recipe import operations
#[derive(Debug, Clone)]
pub enum ImportError {
    /// Multi-source merge was invoked with no sources, or none of the sources
    /// contained any usable text
    NoUsableSources,
    /// Text normalization errors
    Normalization(String),
    /// Parsing errors that cannot be absorbed by the fallback line classifier
    Parse(String),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::NoUsableSources => {
                write!(f, "No usable source text was provided for merging")
            }
            ImportError::Normalization(msg) => write!(f, "Normalization error: {msg}"),
            ImportError::Parse(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<anyhow::Error> for ImportError {
    fn from(err: anyhow::Error) -> Self {
        ImportError::Parse(err.to_string())
    }
}
