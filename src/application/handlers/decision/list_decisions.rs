//! ListDecisionsHandler - Query handler for the caller's live decisions.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use super::super::paging::PageLimits;
use crate::domain::decision::{DecisionError, EmotionalState};
use crate::domain::foundation::{CategoryId, CommandMetadata, DecisionStatus, Timestamp};
use crate::domain::outcome::OutcomeResult;
use crate::ports::{DecisionFilter, DecisionPage, DecisionReader, PageCursor, PageRequest};

/// Query for one page of live decisions, newest first.
#[derive(Debug, Clone, Default)]
pub struct ListDecisionsQuery {
    pub status: Option<DecisionStatus>,
    pub category_id: Option<CategoryId>,
    pub emotional_state: Option<EmotionalState>,
    pub search: Option<String>,
    /// First day included, UTC.
    pub created_from: Option<NaiveDate>,
    /// Last day included, UTC.
    pub created_to: Option<NaiveDate>,
    /// Result of the latest check-in.
    pub outcome: Option<OutcomeResult>,
    pub limit: Option<u32>,
    pub offset: u32,
    /// `next_cursor` of the previous page; takes precedence over `offset`.
    pub cursor: Option<PageCursor>,
}

/// Handler for listing decisions.
pub struct ListDecisionsHandler {
    reader: Arc<dyn DecisionReader>,
    limits: PageLimits,
}

impl ListDecisionsHandler {
    pub fn new(reader: Arc<dyn DecisionReader>, limits: PageLimits) -> Self {
        Self { reader, limits }
    }

    pub async fn handle(
        &self,
        query: ListDecisionsQuery,
        metadata: CommandMetadata,
    ) -> Result<DecisionPage, DecisionError> {
        // 1. Resolve paging and the date window
        let limit = self.limits.resolve(query.limit)?;
        if let (Some(from), Some(to)) = (query.created_from, query.created_to) {
            if from > to {
                return Err(DecisionError::validation(
                    "created_from",
                    "Start date must not be after end date",
                ));
            }
        }

        let mut page = PageRequest::first(limit).with_offset(query.offset);
        if let Some(cursor) = query.cursor {
            page = page.after_cursor(cursor);
        }

        let filter = DecisionFilter {
            status: query.status,
            category_id: query.category_id,
            emotional_state: query.emotional_state,
            search: query.search,
            created_from: query.created_from.map(Timestamp::start_of_day),
            created_to: query.created_to.map(Timestamp::end_of_day),
            outcome: query.outcome,
            page,
        };

        // 2. Query the owner's rows
        let result = self.reader.list(&metadata.user_id, &filter).await?;

        debug!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            returned = result.items.len(),
            total = result.total,
            "Listed decisions"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{journal, owner, seed, stranger};
    use crate::domain::decision::NewDecision;
    use crate::domain::outcome::NewOutcome;
    use crate::ports::DecisionRepository;

    #[tokio::test]
    async fn lists_only_callers_rows() {
        let store = journal();
        seed(&store, NewDecision::titled("Mine")).await;
        let handler = ListDecisionsHandler::new(store.clone(), PageLimits::default());

        let mine = handler
            .handle(ListDecisionsQuery::default(), owner())
            .await
            .unwrap();
        let theirs = handler
            .handle(ListDecisionsQuery::default(), stranger())
            .await
            .unwrap();

        assert_eq!(mine.total, 1);
        assert_eq!(theirs.total, 0);
    }

    #[tokio::test]
    async fn filters_by_status_and_search() {
        let store = journal();
        seed(&store, NewDecision::titled("Move to Lisbon")).await;
        seed(
            &store,
            NewDecision::titled("Move to Porto").with_status(DecisionStatus::Deliberating),
        )
        .await;
        seed(&store, NewDecision::titled("Buy a bike")).await;
        let handler = ListDecisionsHandler::new(store.clone(), PageLimits::default());

        let page = handler
            .handle(
                ListDecisionsQuery {
                    status: Some(DecisionStatus::Draft),
                    search: Some("move".to_string()),
                    ..ListDecisionsQuery::default()
                },
                owner(),
            )
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Move to Lisbon");
    }

    #[tokio::test]
    async fn clamps_limit_and_reports_more() {
        let store = journal();
        for i in 0..3 {
            seed(&store, NewDecision::titled(format!("Decision {}", i))).await;
        }
        let limits = PageLimits {
            default_size: 2,
            max_size: 2,
        };
        let handler = ListDecisionsHandler::new(store.clone(), limits);

        let page = handler
            .handle(
                ListDecisionsQuery {
                    limit: Some(50),
                    ..ListDecisionsQuery::default()
                },
                owner(),
            )
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert!(page.has_more);
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn rejects_inverted_date_window() {
        let store = journal();
        let handler = ListDecisionsHandler::new(store.clone(), PageLimits::default());

        let err = handler
            .handle(
                ListDecisionsQuery {
                    created_from: NaiveDate::from_ymd_opt(2024, 5, 2),
                    created_to: NaiveDate::from_ymd_opt(2024, 5, 1),
                    ..ListDecisionsQuery::default()
                },
                owner(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("created_from"));
    }

    #[tokio::test]
    async fn todays_window_includes_new_rows() {
        let store = journal();
        seed(&store, NewDecision::titled("Today")).await;
        let today = Timestamp::now().as_datetime().date_naive();
        let handler = ListDecisionsHandler::new(store.clone(), PageLimits::default());

        let page = handler
            .handle(
                ListDecisionsQuery {
                    created_from: Some(today),
                    created_to: Some(today),
                    ..ListDecisionsQuery::default()
                },
                owner(),
            )
            .await
            .unwrap();

        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn filters_by_latest_outcome() {
        let store = journal();
        let improved = seed(&store, NewDecision::titled("Improved")).await;
        let soured = seed(&store, NewDecision::titled("Soured")).await;
        seed(&store, NewDecision::titled("Pending")).await;
        for (decision, results) in [
            (&improved, [OutcomeResult::Worse, OutcomeResult::Better]),
            (&soured, [OutcomeResult::Better, OutcomeResult::Worse]),
        ] {
            for result in results {
                let outcome = NewOutcome::new(result, None, None, Timestamp::now()).unwrap();
                store
                    .append_outcome(&owner().user_id, decision.id(), outcome)
                    .await
                    .unwrap();
            }
        }
        let handler = ListDecisionsHandler::new(store.clone(), PageLimits::default());

        let page = handler
            .handle(
                ListDecisionsQuery {
                    outcome: Some(OutcomeResult::Better),
                    ..ListDecisionsQuery::default()
                },
                owner(),
            )
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, *improved.id());
    }
}
