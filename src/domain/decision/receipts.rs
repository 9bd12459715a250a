//! Results of the trash and purge operations.
//!
//! Soft delete and purge return different types so the irreversible one
//! can never be mistaken for the other.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DecisionId, ErrorCode, Timestamp};

/// Proof that a decision sits in the trash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftDeleteReceipt {
    pub decision_id: DecisionId,
    pub deleted_at: Timestamp,
    /// True when the decision was already in the trash; nothing changed.
    pub already_deleted: bool,
}

/// Proof that a decision and all its descendants are gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeReceipt {
    pub decision_id: DecisionId,
    pub options_removed: u64,
    pub pros_cons_removed: u64,
    pub outcomes_removed: u64,
}

/// Per-id failure inside a bulk operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub decision_id: DecisionId,
    #[serde(with = "error_code_str")]
    pub code: ErrorCode,
    pub message: String,
}

/// Result of a bulk operation; every id ends up in exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkResult<T> {
    pub succeeded: Vec<T>,
    pub failed: Vec<BulkFailure>,
}

impl<T> BulkResult<T> {
    pub fn new() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl<T> Default for BulkResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

mod error_code_str {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::domain::foundation::ErrorCode;

    pub fn serialize<S: Serializer>(code: &ErrorCode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(code)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ErrorCode, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
