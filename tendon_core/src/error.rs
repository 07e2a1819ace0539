//! Error types for the tendon_core library.
//!
//! The numeric formulas never fail; these errors come from loading,
//! parsing and validating session input around them.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tendon_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session input failed caller-side validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Session input file could not be interpreted
    #[error("Input error: {0}")]
    Input(String),
}
