//! Decision-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Which record a not-found error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Decision,
    Option,
    ProCon,
}

impl RecordKind {
    fn label(&self) -> &'static str {
        match self {
            RecordKind::Decision => "Decision",
            RecordKind::Option => "Option",
            RecordKind::ProCon => "Pro/con",
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            RecordKind::Decision => ErrorCode::DecisionNotFound,
            RecordKind::Option => ErrorCode::OptionNotFound,
            RecordKind::ProCon => ErrorCode::ProConNotFound,
        }
    }
}

/// Errors returned by decision, option, pro/con and outcome handlers.
///
/// A record owned by another user is reported as `NotFound`, exactly like a
/// record that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("{} not found", .0.label())]
    NotFound(RecordKind),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage operation timed out")]
    Timeout,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl DecisionError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DecisionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn not_found() -> Self {
        DecisionError::NotFound(RecordKind::Decision)
    }
    pub fn option_not_found() -> Self {
        DecisionError::NotFound(RecordKind::Option)
    }
    pub fn pro_con_not_found() -> Self {
        DecisionError::NotFound(RecordKind::ProCon)
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        DecisionError::Conflict(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        DecisionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DecisionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            DecisionError::NotFound(kind) => kind.code(),
            DecisionError::Conflict(_) => ErrorCode::Conflict,
            DecisionError::Timeout => ErrorCode::Timeout,
            DecisionError::Unavailable(_) => ErrorCode::Unavailable,
            DecisionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DecisionError::NotFound(_))
    }

    /// Offending field for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            DecisionError::ValidationFailed { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<ValidationError> for DecisionError {
    fn from(err: ValidationError) -> Self {
        DecisionError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for DecisionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::InvalidStateTransition => {
                DecisionError::ValidationFailed {
                    field: err.field().unwrap_or("unknown").to_string(),
                    message: err.message,
                }
            }
            ErrorCode::DecisionNotFound | ErrorCode::Forbidden => {
                DecisionError::NotFound(RecordKind::Decision)
            }
            ErrorCode::OptionNotFound => DecisionError::NotFound(RecordKind::Option),
            ErrorCode::ProConNotFound => DecisionError::NotFound(RecordKind::ProCon),
            ErrorCode::CategoryNotFound => DecisionError::ValidationFailed {
                field: "category_id".to_string(),
                message: "Category not found".to_string(),
            },
            ErrorCode::Conflict | ErrorCode::ConcurrentModification => {
                DecisionError::Conflict(err.message)
            }
            ErrorCode::Timeout => DecisionError::Timeout,
            ErrorCode::Unavailable => DecisionError::Unavailable(err.message),
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                DecisionError::Infrastructure(err.message)
            }
        }
    }
}
