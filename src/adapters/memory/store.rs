//! In-memory journal store.
//!
//! Holds decisions, outcomes and categories behind one `tokio::sync::RwLock`.
//! Every port method takes the lock once for its whole duration, so each
//! call is atomic with respect to every other call.
//!
//! Useful for:
//! - Unit and integration tests of the application handlers
//! - Embedding the journal without a database
//!
//! Does not persist data across restarts.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::category::Category;
use crate::domain::decision::Decision;
use crate::domain::foundation::{CategoryId, DecisionId, DomainError, ErrorCode};
use crate::domain::outcome::OutcomeRecord;

#[derive(Debug, Default)]
pub(super) struct JournalState {
    pub(super) decisions: HashMap<DecisionId, Decision>,
    pub(super) outcomes: HashMap<DecisionId, Vec<OutcomeRecord>>,
    pub(super) categories: HashMap<CategoryId, Category>,
}

/// In-memory implementation of the decision and category ports.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryJournalStore::with_system_categories());
/// let create = CreateDecisionHandler::new(store.clone(), store.clone());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryJournalStore {
    pub(super) state: RwLock<JournalState>,
}

impl InMemoryJournalStore {
    /// Creates an empty store with no categories at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the system categories.
    pub fn with_system_categories() -> Self {
        let categories = Category::system_defaults()
            .into_iter()
            .map(|c| (*c.id(), c))
            .collect();
        Self {
            state: RwLock::new(JournalState {
                categories,
                ..JournalState::default()
            }),
        }
    }

    /// Number of stored decisions, trashed ones included.
    pub async fn decision_count(&self) -> usize {
        self.state.read().await.decisions.len()
    }

    /// Number of stored options across all decisions.
    pub async fn option_count(&self) -> usize {
        self.state
            .read()
            .await
            .decisions
            .values()
            .map(|d| d.options().len())
            .sum()
    }

    /// Number of stored pros/cons across all decisions.
    pub async fn pro_con_count(&self) -> usize {
        self.state
            .read()
            .await
            .decisions
            .values()
            .map(Decision::pro_con_count)
            .sum()
    }

    /// Number of stored outcome check-ins across all decisions.
    pub async fn outcome_count(&self) -> usize {
        self.state.read().await.outcomes.values().map(Vec::len).sum()
    }
}

pub(super) fn record_not_found(code: ErrorCode) -> DomainError {
    DomainError::new(code, "Record not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::SYSTEM_CATEGORIES;

    #[tokio::test]
    async fn new_store_is_empty() {
        let store = InMemoryJournalStore::new();
        assert_eq!(store.decision_count().await, 0);
        assert!(store.state.read().await.categories.is_empty());
    }

    #[tokio::test]
    async fn seeded_store_has_system_categories() {
        let store = InMemoryJournalStore::with_system_categories();
        let state = store.state.read().await;
        assert_eq!(state.categories.len(), SYSTEM_CATEGORIES.len());
        assert!(state.categories.values().all(Category::is_system));
    }
}
