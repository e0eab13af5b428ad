//! Error types for configuration loading and validation
//!
//! The projection itself cannot fail; only reading and checking inputs can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlannerError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PlannerError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
