//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' must be {max} characters or less, got {actual}")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates a length-limit validation error.
    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Validates a required, length-bounded text field.
///
/// Returns the trimmed value. Length is counted in characters.
pub fn bounded_text(field: &str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let len = trimmed.chars().count();
    if len > max {
        return Err(ValidationError::too_long(field, max, len));
    }
    Ok(trimmed.to_string())
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidStateTransition,

    // Not found errors
    DecisionNotFound,
    OptionNotFound,
    ProConNotFound,
    CategoryNotFound,

    // Authorization errors
    Forbidden,

    // Conflict errors
    Conflict,
    ConcurrentModification,

    // Infrastructure errors
    Timeout,
    Unavailable,
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Returns true for the "row not visible to caller" family.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ErrorCode::DecisionNotFound
                | ErrorCode::OptionNotFound
                | ErrorCode::ProConNotFound
                | ErrorCode::CategoryNotFound
        )
    }

    const ALL: [ErrorCode; 13] = [
        ErrorCode::ValidationFailed,
        ErrorCode::InvalidStateTransition,
        ErrorCode::DecisionNotFound,
        ErrorCode::OptionNotFound,
        ErrorCode::ProConNotFound,
        ErrorCode::CategoryNotFound,
        ErrorCode::Forbidden,
        ErrorCode::Conflict,
        ErrorCode::ConcurrentModification,
        ErrorCode::Timeout,
        ErrorCode::Unavailable,
        ErrorCode::DatabaseError,
        ErrorCode::InternalError,
    ];

    /// Wire spelling, e.g. `DECISION_NOT_FOUND`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::DecisionNotFound => "DECISION_NOT_FOUND",
            ErrorCode::OptionNotFound => "OPTION_NOT_FOUND",
            ErrorCode::ProConNotFound => "PRO_CON_NOT_FOUND",
            ErrorCode::CategoryNotFound => "CATEGORY_NOT_FOUND",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::ConcurrentModification => "CONCURRENT_MODIFICATION",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::Unavailable => "UNAVAILABLE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| format!("unknown error code '{}'", s))
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the `field` detail, if any.
    pub fn field(&self) -> Option<&str> {
        self.details.get("field").map(String::as_str)
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::validation(err.field().to_string(), err.to_string())
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("title");
        assert_eq!(format!("{}", err), "Field 'title' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("satisfaction", 1, 5, 7);
        assert_eq!(
            format!("{}", err),
            "Field 'satisfaction' must be between 1 and 5, got 7"
        );
    }

    #[test]
    fn validation_error_reports_field() {
        let err = ValidationError::too_long("title", 200, 201);
        assert_eq!(err.field(), "title");
    }

    #[test]
    fn bounded_text_trims_and_counts_characters() {
        assert_eq!(bounded_text("title", "  hi  ", 5).unwrap(), "hi");
        // Multi-byte characters count once each.
        assert!(bounded_text("title", &"é".repeat(5), 5).is_ok());
        assert!(bounded_text("title", &"é".repeat(6), 5).is_err());
        assert!(bounded_text("title", "   ", 5).is_err());
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::DecisionNotFound, "Decision not found");
        assert_eq!(format!("{}", err), "[DECISION_NOT_FOUND] Decision not found");
    }

    #[test]
    fn domain_error_from_validation_keeps_field() {
        let err: DomainError = ValidationError::empty_field("name").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn error_code_parses_its_display_form() {
        let code: ErrorCode = "PRO_CON_NOT_FOUND".parse().unwrap();
        assert_eq!(code, ErrorCode::ProConNotFound);
        assert!("NOPE".parse::<ErrorCode>().is_err());
    }

    #[test]
    fn not_found_family_is_recognised() {
        assert!(ErrorCode::OptionNotFound.is_not_found());
        assert!(!ErrorCode::Forbidden.is_not_found());
    }
}
