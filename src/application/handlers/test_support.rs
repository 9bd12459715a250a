//! Fixtures shared by the handler tests.

use std::sync::Arc;

use crate::adapters::memory::InMemoryJournalStore;
use crate::domain::decision::{Decision, NewDecision, NewOption};
use crate::domain::foundation::{CommandMetadata, DecisionId, Timestamp};
use crate::ports::DecisionRepository;

pub(crate) fn journal() -> Arc<InMemoryJournalStore> {
    Arc::new(InMemoryJournalStore::with_system_categories())
}

pub(crate) fn owner() -> CommandMetadata {
    CommandMetadata::test_fixture("owner-1")
}

pub(crate) fn stranger() -> CommandMetadata {
    CommandMetadata::test_fixture("stranger-1")
}

/// Stores a decision owned by [`owner`].
pub(crate) async fn seed(store: &InMemoryJournalStore, fields: NewDecision) -> Decision {
    seed_for(store, &owner(), fields).await
}

pub(crate) async fn seed_for(
    store: &InMemoryJournalStore,
    metadata: &CommandMetadata,
    fields: NewDecision,
) -> Decision {
    let decision = Decision::create(
        DecisionId::new(),
        metadata.user_id.clone(),
        fields,
        Timestamp::now(),
    )
    .unwrap();
    DecisionRepository::insert(store, &decision).await.unwrap();
    decision
}

/// "Switch jobs?" with options "Stay" (one pro, one con) and "Leave".
pub(crate) async fn seed_with_options(store: &InMemoryJournalStore) -> Decision {
    seed(
        store,
        NewDecision::titled("Switch jobs?")
            .with_option(NewOption::titled("Stay").with_pro("Stable").with_con("Bored"))
            .with_option(NewOption::titled("Leave")),
    )
    .await
}
