//! Error handling module for taxcalc
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Field-level validation problems are values (see `validation`), not errors;
//! this type covers everything that can actually fail.

use thiserror::Error;

/// Main error type for taxcalc
#[derive(Error, Debug)]
pub enum TaxCalcError {
    /// IO errors (config files, terminal, log file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (user input that cannot be accepted)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for taxcalc operations
pub type Result<T> = std::result::Result<T, TaxCalcError>;

impl TaxCalcError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}
