//! Category-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors returned by category handlers.
///
/// System categories and other users' categories are reported as
/// `NotFound` for every write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Category not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage operation timed out")]
    Timeout,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl CategoryError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CategoryError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        CategoryError::Conflict(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CategoryError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CategoryError::NotFound => ErrorCode::CategoryNotFound,
            CategoryError::Conflict(_) => ErrorCode::Conflict,
            CategoryError::Timeout => ErrorCode::Timeout,
            CategoryError::Unavailable(_) => ErrorCode::Unavailable,
            CategoryError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            CategoryError::ValidationFailed { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<ValidationError> for CategoryError {
    fn from(err: ValidationError) -> Self {
        CategoryError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for CategoryError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::InvalidStateTransition => {
                CategoryError::ValidationFailed {
                    field: err.field().unwrap_or("unknown").to_string(),
                    message: err.message,
                }
            }
            ErrorCode::CategoryNotFound | ErrorCode::Forbidden => CategoryError::NotFound,
            ErrorCode::Conflict | ErrorCode::ConcurrentModification => {
                CategoryError::Conflict(err.message)
            }
            ErrorCode::Timeout => CategoryError::Timeout,
            ErrorCode::Unavailable => CategoryError::Unavailable(err.message),
            _ => CategoryError::Infrastructure(err.message),
        }
    }
}
