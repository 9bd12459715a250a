//! Decision repository port (write side).
//!
//! Defines the contract for persisting Decision aggregates together with
//! their options and pros/cons, and for appending outcome check-ins.
//!
//! # Design
//!
//! - **Aggregate-shaped**: options and pros/cons are loaded and saved with
//!   their decision; there is no separate child repository
//! - **One call, one transaction**: every write method is atomic
//! - **Owner-scoped writes**: trash, restore, purge and outcome writes take
//!   the caller and treat foreign rows as absent

use crate::domain::decision::{Decision, PurgeReceipt, SoftDeleteReceipt};
use crate::domain::foundation::{DecisionId, DomainError, OptionId, ProConId, Timestamp, UserId};
use crate::domain::outcome::{NewOutcome, RecordedOutcome};
use async_trait::async_trait;

/// Repository port for Decision aggregate persistence.
#[async_trait]
pub trait DecisionRepository: Send + Sync {
    /// Save a new decision with its options and pros/cons.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, decision: &Decision) -> Result<(), DomainError>;

    /// Find a decision by its ID, trashed or not.
    ///
    /// Returns `None` if not found. Ownership is checked by the caller.
    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>, DomainError>;

    /// Find the decision that owns an option.
    async fn find_by_option(&self, id: &OptionId) -> Result<Option<Decision>, DomainError>;

    /// Find the decision that owns a pro/con.
    async fn find_by_pro_con(&self, id: &ProConId) -> Result<Option<Decision>, DomainError>;

    /// Every live decision of `owner` with its children, newest first.
    async fn list_live(&self, owner: &UserId) -> Result<Vec<Decision>, DomainError>;

    /// Replace the stored aggregate if it still carries `expected_updated_at`.
    ///
    /// Options and pros/cons are synchronised: rows missing from the
    /// aggregate are deleted, the rest are inserted or updated.
    ///
    /// # Errors
    ///
    /// - `DecisionNotFound` if the decision is gone or trashed
    /// - `ConcurrentModification` if `updated_at` no longer matches
    async fn update(
        &self,
        decision: &Decision,
        expected_updated_at: &Timestamp,
    ) -> Result<(), DomainError>;

    /// Stamp `deleted_at` unless it is already set.
    ///
    /// # Errors
    ///
    /// - `DecisionNotFound` if absent or owned by someone else
    async fn soft_delete(
        &self,
        owner: &UserId,
        id: &DecisionId,
        at: Timestamp,
    ) -> Result<SoftDeleteReceipt, DomainError>;

    /// Clear `deleted_at` and return the decision. A live row is returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - `DecisionNotFound` if absent or owned by someone else
    async fn restore(&self, owner: &UserId, id: &DecisionId) -> Result<Decision, DomainError>;

    /// Permanently remove the decision, its options, their pros/cons and
    /// its outcomes. Children go first; nothing is removed on failure.
    ///
    /// # Errors
    ///
    /// - `DecisionNotFound` if absent or owned by someone else
    async fn purge(&self, owner: &UserId, id: &DecisionId) -> Result<PurgeReceipt, DomainError>;

    /// Append a check-in with the next check-in number and apply its
    /// status effect to the decision in the same write.
    ///
    /// # Errors
    ///
    /// - `DecisionNotFound` if absent, trashed or owned by someone else
    async fn append_outcome(
        &self,
        owner: &UserId,
        id: &DecisionId,
        outcome: NewOutcome,
    ) -> Result<RecordedOutcome, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn DecisionRepository) {}
    }
}
