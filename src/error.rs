//! Error types for the benchmark harness.
//!
//! The deduplication functions themselves are total and never fail; these
//! errors only come from configuration, verification, and report export.

use thiserror::Error;

/// Harness errors
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scenario '{0}': expected UNIQUExFACTOR[@ITERATIONS] with non-zero values")]
    InvalidScenario(String),

    #[error("Algorithm '{name}' not found (available: {})", available.join(", "))]
    UnknownAlgorithm {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("Variant '{variant}' failed verification: {reason}")]
    Verification { variant: String, reason: String },

    #[error("Variant '{variant}' returned {actual} elements for {scenario}, expected {expected}")]
    ResultMismatch {
        variant: String,
        scenario: String,
        expected: usize,
        actual: usize,
    },
}

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, BenchError>;
