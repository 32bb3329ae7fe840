//! Error types for the abundance-eval library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Input size error: {0}")]
    InputSize(String),

    #[error("No ids are in common between the observed and expected tables")]
    NoOverlap,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Undefined metric '{metric}': zero denominator")]
    UndefinedMetric { metric: &'static str },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, EvalError>;
