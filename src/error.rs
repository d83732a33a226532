//! Error types for allocation runs.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by the allocation entry points.
///
/// Raised before any equipment is drawn, so a failed run never yields a
/// partial plan.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// The request failed validation.
    #[error("invalid argument: {} ({} problem(s) found)", first_message(.errors), .errors.len())]
    InvalidArgument { errors: Vec<ValidationError> },
}

impl AllocationError {
    /// The validation errors behind this failure.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidArgument { errors } => errors,
        }
    }
}

impl From<Vec<ValidationError>> for AllocationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidArgument { errors }
    }
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("no details")
}

/// Result alias for allocation runs.
pub type AllocationResult<T> = Result<T, AllocationError>;
