//! Error types for the transportation toolkit
//!
//! [`TransportError`] covers every failure a solve can produce. Only
//! validation failures are recoverable by the caller; the remaining variants
//! signal a broken invariant or a solver backend problem.
//!
//! # Example
//!
//! ```
//! use tpt_core::{ProblemInstance, TransportError};
//!
//! let err = ProblemInstance::new(vec![], vec![1.0], vec![]).unwrap_err();
//! assert!(matches!(err, TransportError::Validation { .. }));
//! assert!(err.is_recoverable());
//! ```

use thiserror::Error;

/// Unified error type for all transportation solves.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Malformed or out-of-range input (dimension mismatch, negative or
    /// non-finite values).
    #[error("Validation error in `{field}`: {message}")]
    Validation { field: String, message: String },

    /// The solver reported infeasibility on a balanced instance.
    #[error("Problem infeasible: {0}")]
    Infeasible(String),

    /// The solver reported an unbounded objective.
    #[error("Problem unbounded: {0}")]
    Unbounded(String),

    /// The solver did not converge within its iteration bound.
    #[error("Solver did not converge within {iterations} iterations")]
    NumericInstability { iterations: usize },

    /// Backend failure not covered by the other variants.
    #[error("Solver error: {0}")]
    Solver(String),

    /// No backend registered under the requested id.
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),
}

impl TransportError {
    /// Build a validation error for `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TransportError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the caller can fix this by correcting the input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TransportError::Validation { .. })
    }

    /// Offending field name for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            TransportError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using TransportError.
pub type TransportResult<T> = Result<T, TransportError>;

// Instance files are parsed upstream; a bad document is an input problem.
impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::validation("instance", err.to_string())
    }
}
