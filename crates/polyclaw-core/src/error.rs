//! Error types for polyclaw-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid outcome: {0}")]
    InvalidOutcome(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
