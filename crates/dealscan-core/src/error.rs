//! Error types module
//!
//! This module provides the core error types used throughout the Dealscan
//! application. All errors are unified under the `AppError` enum, covering
//! validation, submission, transport, and review-session errors.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Empty batch: submit called with no staged files")]
    EmptyBatch,

    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Error conversion implementations following Rust best practices
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Transport {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(format!("JSON parsing error: {}", err))
    }
}

impl AppError {
    /// Get the error type name for detailed error reporting
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::EmptyBatch => "EmptyBatch",
            AppError::Transport { .. } => "Transport",
            AppError::MalformedResponse(_) => "MalformedResponse",
            AppError::NotFound(_) => "NotFound",
            AppError::InvalidState(_) => "InvalidState",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Whether the user can recover by fixing their input and trying again,
    /// as opposed to a terminal failure of the submission attempt.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::EmptyBatch
                | AppError::NotFound(_)
                | AppError::InvalidState(_)
                | AppError::InvalidInput(_)
        )
    }
}
