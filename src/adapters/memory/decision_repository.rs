//! `DecisionRepository` for the in-memory store.

use std::cmp::Reverse;

use async_trait::async_trait;
use tracing::debug;

use super::store::{record_not_found, InMemoryJournalStore};
use crate::domain::decision::{Decision, PurgeReceipt, SoftDeleteReceipt};
use crate::domain::foundation::{
    DecisionId, DomainError, ErrorCode, OptionId, OutcomeId, ProConId, Timestamp, UserId,
};
use crate::domain::outcome::{NewOutcome, RecordedOutcome};
use crate::ports::DecisionRepository;

#[async_trait]
impl DecisionRepository for InMemoryJournalStore {
    async fn insert(&self, decision: &Decision) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.decisions.contains_key(decision.id()) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Decision {} already exists", decision.id()),
            ));
        }
        state.decisions.insert(*decision.id(), decision.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>, DomainError> {
        Ok(self.state.read().await.decisions.get(id).cloned())
    }

    async fn find_by_option(&self, id: &OptionId) -> Result<Option<Decision>, DomainError> {
        let state = self.state.read().await;
        Ok(state.decisions.values().find(|d| d.has_option(id)).cloned())
    }

    async fn find_by_pro_con(&self, id: &ProConId) -> Result<Option<Decision>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .decisions
            .values()
            .find(|d| d.pro_con(id).is_some())
            .cloned())
    }

    async fn list_live(&self, owner: &UserId) -> Result<Vec<Decision>, DomainError> {
        let state = self.state.read().await;
        let mut live: Vec<Decision> = state
            .decisions
            .values()
            .filter(|d| d.user_id() == owner && !d.is_deleted())
            .cloned()
            .collect();
        live.sort_by_key(|d| Reverse((*d.created_at(), *d.id())));
        Ok(live)
    }

    async fn update(
        &self,
        decision: &Decision,
        expected_updated_at: &Timestamp,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let stored = state
            .decisions
            .get_mut(decision.id())
            .filter(|d| !d.is_deleted())
            .ok_or_else(|| record_not_found(ErrorCode::DecisionNotFound))?;

        if stored.updated_at() != expected_updated_at {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                "Decision was modified by another request",
            ));
        }
        *stored = decision.clone();
        Ok(())
    }

    async fn soft_delete(
        &self,
        owner: &UserId,
        id: &DecisionId,
        at: Timestamp,
    ) -> Result<SoftDeleteReceipt, DomainError> {
        let mut state = self.state.write().await;
        let decision = state
            .decisions
            .get_mut(id)
            .filter(|d| d.user_id() == owner)
            .ok_or_else(|| record_not_found(ErrorCode::DecisionNotFound))?;

        let already_deleted = decision.soft_delete(at);
        Ok(SoftDeleteReceipt {
            decision_id: *id,
            deleted_at: decision.deleted_at().copied().unwrap_or(at),
            already_deleted,
        })
    }

    async fn restore(&self, owner: &UserId, id: &DecisionId) -> Result<Decision, DomainError> {
        let mut state = self.state.write().await;
        let decision = state
            .decisions
            .get_mut(id)
            .filter(|d| d.user_id() == owner)
            .ok_or_else(|| record_not_found(ErrorCode::DecisionNotFound))?;

        decision.restore();
        Ok(decision.clone())
    }

    async fn purge(&self, owner: &UserId, id: &DecisionId) -> Result<PurgeReceipt, DomainError> {
        let mut state = self.state.write().await;
        if !state.decisions.get(id).is_some_and(|d| d.user_id() == owner) {
            return Err(record_not_found(ErrorCode::DecisionNotFound));
        }

        let outcomes_removed = state.outcomes.remove(id).map_or(0, |o| o.len()) as u64;
        let decision = state
            .decisions
            .remove(id)
            .ok_or_else(|| record_not_found(ErrorCode::DecisionNotFound))?;

        let receipt = PurgeReceipt {
            decision_id: *id,
            options_removed: decision.options().len() as u64,
            pros_cons_removed: decision.pro_con_count() as u64,
            outcomes_removed,
        };
        debug!(decision_id = %id, ?receipt, "Purged decision from memory");
        Ok(receipt)
    }

    async fn append_outcome(
        &self,
        owner: &UserId,
        id: &DecisionId,
        outcome: NewOutcome,
    ) -> Result<RecordedOutcome, DomainError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let decision = state
            .decisions
            .get_mut(id)
            .filter(|d| d.user_id() == owner && !d.is_deleted())
            .ok_or_else(|| record_not_found(ErrorCode::DecisionNotFound))?;

        let history = state.outcomes.entry(*id).or_default();
        let previous = history.iter().map(|o| o.check_in_number).max();
        let record = outcome.into_record(OutcomeId::new(), *id, previous);
        let decision_status = decision.note_outcome_recorded(record.recorded_at);
        history.push(record.clone());

        Ok(RecordedOutcome {
            outcome: record,
            decision_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{DecisionPatch, NewDecision, NewOption};
    use crate::domain::foundation::DecisionStatus;
    use crate::domain::outcome::OutcomeResult;

    fn owner() -> UserId {
        UserId::new("owner").unwrap()
    }

    fn stranger() -> UserId {
        UserId::new("stranger").unwrap()
    }

    async fn stored_decision(store: &InMemoryJournalStore) -> Decision {
        let decision = Decision::create(
            DecisionId::new(),
            owner(),
            NewDecision::titled("Adopt a dog?")
                .with_option(NewOption::titled("Yes").with_pro("Company").with_con("Walks"))
                .with_option(NewOption::titled("No")),
            Timestamp::now(),
        )
        .unwrap();
        store.insert(&decision).await.unwrap();
        decision
    }

    #[tokio::test]
    async fn list_live_skips_trash_and_foreign_rows() {
        let store = InMemoryJournalStore::new();
        let kept = stored_decision(&store).await;
        let trashed = stored_decision(&store).await;
        store
            .soft_delete(&owner(), trashed.id(), Timestamp::now())
            .await
            .unwrap();
        let foreign = Decision::create(
            DecisionId::new(),
            stranger(),
            NewDecision::titled("Not mine"),
            Timestamp::now(),
        )
        .unwrap();
        store.insert(&foreign).await.unwrap();

        let live = store.list_live(&owner()).await.unwrap();

        assert_eq!(live, vec![kept]);
        assert_eq!(live[0].options().len(), 2);
    }

    fn outcome() -> NewOutcome {
        NewOutcome::new(OutcomeResult::Better, Some(5), None, Timestamp::now()).unwrap()
    }

    #[tokio::test]
    async fn update_with_stale_version_is_rejected() {
        let store = InMemoryJournalStore::new();
        let mut decision = stored_decision(&store).await;
        let stale = decision.updated_at().plus_secs(-10);
        decision
            .apply_patch(
                DecisionPatch {
                    title: Some("Adopt a cat?".to_string()),
                    ..DecisionPatch::default()
                },
                Timestamp::now(),
            )
            .unwrap();

        let err = store.update(&decision, &stale).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrentModification);
    }

    #[tokio::test]
    async fn soft_delete_is_idempotent_and_owner_scoped() {
        let store = InMemoryJournalStore::new();
        let decision = stored_decision(&store).await;

        let first = store
            .soft_delete(&owner(), decision.id(), Timestamp::now())
            .await
            .unwrap();
        let second = store
            .soft_delete(&owner(), decision.id(), Timestamp::now().plus_secs(5))
            .await
            .unwrap();

        assert!(!first.already_deleted);
        assert!(second.already_deleted);
        assert_eq!(first.deleted_at, second.deleted_at);

        let err = store
            .soft_delete(&stranger(), decision.id(), Timestamp::now())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DecisionNotFound);
    }

    #[tokio::test]
    async fn purge_removes_every_descendant() {
        let store = InMemoryJournalStore::new();
        let decision = stored_decision(&store).await;
        store
            .append_outcome(&owner(), decision.id(), outcome())
            .await
            .unwrap();

        let receipt = store.purge(&owner(), decision.id()).await.unwrap();

        assert_eq!(receipt.options_removed, 2);
        assert_eq!(receipt.pros_cons_removed, 2);
        assert_eq!(receipt.outcomes_removed, 1);
        assert_eq!(store.decision_count().await, 0);
        assert_eq!(store.option_count().await, 0);
        assert_eq!(store.outcome_count().await, 0);
    }

    #[tokio::test]
    async fn purge_by_stranger_changes_nothing() {
        let store = InMemoryJournalStore::new();
        let decision = stored_decision(&store).await;

        assert!(store.purge(&stranger(), decision.id()).await.is_err());
        assert_eq!(store.decision_count().await, 1);
    }

    #[tokio::test]
    async fn outcomes_append_with_increasing_check_ins() {
        let store = InMemoryJournalStore::new();
        let decision = stored_decision(&store).await;

        for expected in 1..=3 {
            let recorded = store
                .append_outcome(&owner(), decision.id(), outcome())
                .await
                .unwrap();
            assert_eq!(recorded.outcome.check_in_number, expected);
            assert_eq!(recorded.decision_status, DecisionStatus::Draft);
        }
    }

    #[tokio::test]
    async fn outcome_on_trashed_decision_is_not_found() {
        let store = InMemoryJournalStore::new();
        let decision = stored_decision(&store).await;
        store
            .soft_delete(&owner(), decision.id(), Timestamp::now())
            .await
            .unwrap();

        let err = store
            .append_outcome(&owner(), decision.id(), outcome())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DecisionNotFound);
    }

    #[tokio::test]
    async fn find_by_child_ids_returns_parent() {
        let store = InMemoryJournalStore::new();
        let decision = stored_decision(&store).await;
        let option = decision.options()[0].clone();
        let pro_con = option.pros_cons()[0].id();

        let by_option = store.find_by_option(option.id()).await.unwrap().unwrap();
        let by_pro_con = store.find_by_pro_con(pro_con).await.unwrap().unwrap();

        assert_eq!(by_option.id(), decision.id());
        assert_eq!(by_pro_con.id(), decision.id());
        assert!(store.find_by_option(&OptionId::new()).await.unwrap().is_none());
    }
}
