//! ListOutcomesHandler - Query handler for a decision's check-in history.

use std::sync::Arc;

use tracing::debug;

use super::super::access::load_decision;
use crate::domain::decision::DecisionError;
use crate::domain::foundation::{CommandMetadata, DecisionId};
use crate::domain::outcome::OutcomeRecord;
use crate::ports::{DecisionReader, DecisionRepository};

/// Query for every check-in of one live decision.
#[derive(Debug, Clone, Copy)]
pub struct ListOutcomesQuery {
    pub decision_id: DecisionId,
}

/// Handler for listing outcomes.
pub struct ListOutcomesHandler {
    repository: Arc<dyn DecisionRepository>,
    reader: Arc<dyn DecisionReader>,
}

impl ListOutcomesHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>, reader: Arc<dyn DecisionReader>) -> Self {
        Self { repository, reader }
    }

    pub async fn handle(
        &self,
        query: ListOutcomesQuery,
        metadata: CommandMetadata,
    ) -> Result<Vec<OutcomeRecord>, DecisionError> {
        load_decision(
            self.repository.as_ref(),
            &query.decision_id,
            &metadata.user_id,
            false,
        )
        .await?;

        let outcomes = self
            .reader
            .list_outcomes(&metadata.user_id, &query.decision_id)
            .await?;

        debug!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %query.decision_id,
            count = outcomes.len(),
            "Listed outcomes"
        );
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{journal, owner, seed, stranger};
    use crate::domain::decision::NewDecision;
    use crate::domain::foundation::Timestamp;
    use crate::domain::outcome::{NewOutcome, OutcomeResult};

    #[tokio::test]
    async fn history_is_ordered_by_check_in() {
        let store = journal();
        let decision = seed(&store, NewDecision::titled("Move city?")).await;
        for result in [OutcomeResult::Worse, OutcomeResult::AsExpected, OutcomeResult::Better] {
            let outcome = NewOutcome::new(result, Some(3), None, Timestamp::now()).unwrap();
            store
                .append_outcome(&owner().user_id, decision.id(), outcome)
                .await
                .unwrap();
        }
        let handler = ListOutcomesHandler::new(store.clone(), store.clone());

        let history = handler
            .handle(
                ListOutcomesQuery {
                    decision_id: *decision.id(),
                },
                owner(),
            )
            .await
            .unwrap();

        let numbers: Vec<i32> = history.iter().map(|o| o.check_in_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(history[2].result, OutcomeResult::Better);
    }

    #[tokio::test]
    async fn stranger_sees_nothing() {
        let store = journal();
        let decision = seed(&store, NewDecision::titled("Move city?")).await;
        let handler = ListOutcomesHandler::new(store.clone(), store.clone());

        let err = handler
            .handle(
                ListOutcomesQuery {
                    decision_id: *decision.id(),
                },
                stranger(),
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }
}
