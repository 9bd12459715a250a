//! `DecisionReader` for the in-memory store.

use std::cmp::Reverse;

use async_trait::async_trait;

use super::store::{record_not_found, InMemoryJournalStore, JournalState};
use crate::domain::decision::Decision;
use crate::domain::foundation::{DecisionId, DomainError, ErrorCode, UserId};
use crate::domain::outcome::{OutcomeFacts, OutcomeRecord, OutcomeResult};
use crate::ports::{DecisionFilter, DecisionPage, DecisionReader, DecisionSummary, TrashFilter};

#[async_trait]
impl DecisionReader for InMemoryJournalStore {
    async fn list(
        &self,
        owner: &UserId,
        filter: &DecisionFilter,
    ) -> Result<DecisionPage, DomainError> {
        let state = self.state.read().await;
        let mut rows: Vec<&Decision> = state
            .decisions
            .values()
            .filter(|d| {
                d.user_id() == owner
                    && !d.is_deleted()
                    && filter.matches(d, latest_result(&state, d.id()))
            })
            .collect();
        let total = rows.len() as u64;

        rows.sort_by_key(|d| Reverse((*d.created_at(), *d.id())));
        let page = &filter.page;
        let fetched = rows
            .into_iter()
            .filter(|d| page.cursor.map_or(true, |c| c.precedes(d.created_at(), d.id())))
            .skip(page.effective_offset() as usize)
            .take(page.limit as usize + 1)
            .map(DecisionSummary::from)
            .collect();

        Ok(DecisionPage::from_fetched(fetched, page.limit, total))
    }

    async fn list_trash(
        &self,
        owner: &UserId,
        filter: &TrashFilter,
    ) -> Result<DecisionPage, DomainError> {
        let state = self.state.read().await;
        let mut rows: Vec<&Decision> = state
            .decisions
            .values()
            .filter(|d| d.user_id() == owner && filter.matches(d))
            .collect();
        let total = rows.len() as u64;

        rows.sort_by_key(|d| Reverse((d.deleted_at().copied(), *d.id())));
        let fetched = rows
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize + 1)
            .map(DecisionSummary::from)
            .collect();

        let mut page = DecisionPage::from_fetched(fetched, filter.limit, total);
        // Trash is paged by offset only.
        page.next_cursor = None;
        Ok(page)
    }

    async fn list_outcomes(
        &self,
        owner: &UserId,
        decision_id: &DecisionId,
    ) -> Result<Vec<OutcomeRecord>, DomainError> {
        let state = self.state.read().await;
        if !state
            .decisions
            .get(decision_id)
            .is_some_and(|d| d.user_id() == owner)
        {
            return Err(record_not_found(ErrorCode::DecisionNotFound));
        }

        let mut outcomes = state.outcomes.get(decision_id).cloned().unwrap_or_default();
        outcomes.sort_by_key(|o| o.check_in_number);
        Ok(outcomes)
    }

    async fn outcome_facts(&self, owner: &UserId) -> Result<Vec<OutcomeFacts>, DomainError> {
        let state = self.state.read().await;
        let facts = state
            .decisions
            .values()
            .filter(|d| d.user_id() == owner && !d.is_deleted())
            .map(|d| OutcomeFacts {
                decision_id: *d.id(),
                category_id: d.category_id().copied(),
                category_name: d
                    .category_id()
                    .and_then(|id| state.categories.get(id))
                    .map(|c| c.name().to_string()),
                emotional_state: d.emotional_state(),
                latest_result: latest_result(&state, d.id()),
                option_count: d.options().len() as u32,
                chosen_position: d.chosen_option_id().and_then(|chosen| {
                    d.options()
                        .iter()
                        .position(|o| o.id() == chosen)
                        .map(|index| index as u32 + 1)
                }),
            })
            .collect();
        Ok(facts)
    }
}

fn latest_result(state: &JournalState, id: &DecisionId) -> Option<OutcomeResult> {
    state
        .outcomes
        .get(id)
        .and_then(|history| history.iter().max_by_key(|o| o.check_in_number))
        .map(|o| o.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{DecisionPatch, NewDecision, NewOption};
    use crate::domain::foundation::{DecisionStatus, Timestamp};
    use crate::domain::outcome::NewOutcome;
    use crate::ports::{DecisionRepository, PageCursor, PageRequest};

    fn owner() -> UserId {
        UserId::new("owner").unwrap()
    }

    async fn seed(store: &InMemoryJournalStore, user: &UserId, title: &str, age_secs: i64) -> Decision {
        let decision = Decision::create(
            DecisionId::new(),
            user.clone(),
            NewDecision::titled(title),
            Timestamp::now().plus_secs(-age_secs),
        )
        .unwrap();
        store.insert(&decision).await.unwrap();
        decision
    }

    #[tokio::test]
    async fn list_is_newest_first_and_owner_scoped() {
        let store = InMemoryJournalStore::new();
        seed(&store, &owner(), "Oldest", 30).await;
        seed(&store, &owner(), "Middle", 20).await;
        seed(&store, &owner(), "Newest", 10).await;
        seed(&store, &UserId::new("other").unwrap(), "Foreign", 5).await;

        let page = store
            .list(&owner(), &DecisionFilter::page(PageRequest::first(10)))
            .await
            .unwrap();

        let titles: Vec<_> = page.items.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
        assert_eq!(page.total, 3);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn cursor_pages_do_not_overlap() {
        let store = InMemoryJournalStore::new();
        for age in 1..=5 {
            seed(&store, &owner(), &format!("Decision {}", age), age * 10).await;
        }

        let first = store
            .list(&owner(), &DecisionFilter::page(PageRequest::first(2)))
            .await
            .unwrap();
        let cursor = first.next_cursor.unwrap();
        let second = store
            .list(
                &owner(),
                &DecisionFilter::page(PageRequest::first(2).after_cursor(cursor)),
            )
            .await
            .unwrap();

        assert!(first.has_more);
        assert_eq!(second.items.len(), 2);
        assert!(second
            .items
            .iter()
            .all(|s| cursor.precedes(&s.created_at, &s.id)));
        assert!(first.items.iter().all(|a| second.items.iter().all(|b| a.id != b.id)));
    }

    #[tokio::test]
    async fn cursor_pages_through_rows_sharing_a_timestamp() {
        let store = InMemoryJournalStore::new();
        let created_at = Timestamp::now();
        let mut expected = Vec::new();
        for n in 0..5 {
            let decision = Decision::create(
                DecisionId::new(),
                owner(),
                NewDecision::titled(format!("Imported {}", n)),
                created_at,
            )
            .unwrap();
            store.insert(&decision).await.unwrap();
            expected.push(*decision.id());
        }

        let mut seen = Vec::new();
        let mut cursor: Option<PageCursor> = None;
        loop {
            let mut page = PageRequest::first(2);
            if let Some(cursor) = cursor {
                page = page.after_cursor(cursor);
            }
            let result = store
                .list(&owner(), &DecisionFilter::page(page))
                .await
                .unwrap();
            seen.extend(result.items.iter().map(|s| s.id));
            match result.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        expected.sort_by(|a, b| b.cmp(a));
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn facts_report_the_chosen_option_position() {
        let store = InMemoryJournalStore::new();
        let mut decision = Decision::create(
            DecisionId::new(),
            owner(),
            NewDecision::titled("Which city?")
                .with_option(NewOption::titled("Lisbon"))
                .with_option(NewOption::titled("Porto"))
                .with_option(NewOption::titled("Faro")),
            Timestamp::now(),
        )
        .unwrap();
        store.insert(&decision).await.unwrap();
        let loaded_at = *decision.updated_at();
        let porto = *decision.options()[1].id();
        decision
            .apply_patch(DecisionPatch::decide(porto), Timestamp::now())
            .unwrap();
        store.update(&decision, &loaded_at).await.unwrap();

        let facts = store.outcome_facts(&owner()).await.unwrap();

        assert_eq!(facts[0].option_count, 3);
        assert_eq!(facts[0].chosen_position, Some(2));
    }

    #[tokio::test]
    async fn trash_lists_only_deleted_rows() {
        let store = InMemoryJournalStore::new();
        let kept = seed(&store, &owner(), "Kept", 20).await;
        let binned = seed(&store, &owner(), "Binned", 10).await;
        store
            .soft_delete(&owner(), binned.id(), Timestamp::now())
            .await
            .unwrap();

        let trash = store
            .list_trash(
                &owner(),
                &TrashFilter {
                    search: None,
                    limit: 10,
                    offset: 0,
                },
            )
            .await
            .unwrap();
        let live = store
            .list(&owner(), &DecisionFilter::page(PageRequest::first(10)))
            .await
            .unwrap();

        assert_eq!(trash.items.len(), 1);
        assert_eq!(&trash.items[0].id, binned.id());
        assert_eq!(live.items.len(), 1);
        assert_eq!(&live.items[0].id, kept.id());
    }

    #[tokio::test]
    async fn facts_use_the_latest_check_in() {
        let store = InMemoryJournalStore::new();
        let decision = seed(&store, &owner(), "Move abroad?", 10).await;
        for result in [OutcomeResult::Worse, OutcomeResult::Better] {
            let outcome = NewOutcome::new(result, None, None, Timestamp::now()).unwrap();
            store
                .append_outcome(&owner(), decision.id(), outcome)
                .await
                .unwrap();
        }

        let facts = store.outcome_facts(&owner()).await.unwrap();

        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].latest_result, Some(OutcomeResult::Better));
        assert_eq!(decision.status(), DecisionStatus::Draft);
    }

    #[tokio::test]
    async fn outcomes_of_foreign_decision_are_not_found() {
        let store = InMemoryJournalStore::new();
        let decision = seed(&store, &owner(), "Private", 10).await;

        let err = store
            .list_outcomes(&UserId::new("other").unwrap(), decision.id())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DecisionNotFound);
    }
}
