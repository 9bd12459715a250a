//! GetDecisionHandler - Query handler for retrieving one decision.

use std::sync::Arc;

use tracing::debug;

use super::super::access::load_decision;
use crate::domain::decision::{Decision, DecisionError};
use crate::domain::foundation::{CommandMetadata, DecisionId};
use crate::ports::DecisionRepository;

/// Query to get a decision with its options and pros/cons.
#[derive(Debug, Clone)]
pub struct GetDecisionQuery {
    pub decision_id: DecisionId,
    /// Also return the decision while it sits in the trash.
    pub include_trashed: bool,
}

impl GetDecisionQuery {
    pub fn live(decision_id: DecisionId) -> Self {
        Self {
            decision_id,
            include_trashed: false,
        }
    }
}

/// Handler for retrieving decision details.
pub struct GetDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl GetDecisionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetDecisionQuery,
        metadata: CommandMetadata,
    ) -> Result<Decision, DecisionError> {
        let decision = load_decision(
            self.repository.as_ref(),
            &query.decision_id,
            &metadata.user_id,
            query.include_trashed,
        )
        .await?;

        debug!(user_id = %metadata.user_id, decision_id = %query.decision_id, "Decision loaded");
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{journal, owner, seed, stranger};
    use crate::domain::decision::NewDecision;
    use crate::domain::foundation::Timestamp;

    #[tokio::test]
    async fn owner_reads_decision() {
        let store = journal();
        let decision = seed(&store, NewDecision::titled("Learn piano?")).await;
        let handler = GetDecisionHandler::new(store.clone());

        let found = handler
            .handle(GetDecisionQuery::live(*decision.id()), owner())
            .await
            .unwrap();

        assert_eq!(found, decision);
    }

    #[tokio::test]
    async fn foreign_and_absent_look_the_same() {
        let store = journal();
        let decision = seed(&store, NewDecision::titled("Learn piano?")).await;
        let handler = GetDecisionHandler::new(store.clone());

        let foreign = handler
            .handle(GetDecisionQuery::live(*decision.id()), stranger())
            .await
            .unwrap_err();
        let absent = handler
            .handle(GetDecisionQuery::live(DecisionId::new()), owner())
            .await
            .unwrap_err();

        assert_eq!(foreign, absent);
        assert_eq!(foreign, DecisionError::not_found());
    }

    #[tokio::test]
    async fn trashed_decision_needs_include_trashed() {
        let store = journal();
        let decision = seed(&store, NewDecision::titled("Learn piano?")).await;
        store
            .soft_delete(&owner().user_id, decision.id(), Timestamp::now())
            .await
            .unwrap();
        let handler = GetDecisionHandler::new(store.clone());

        let hidden = handler
            .handle(GetDecisionQuery::live(*decision.id()), owner())
            .await;
        let shown = handler
            .handle(
                GetDecisionQuery {
                    decision_id: *decision.id(),
                    include_trashed: true,
                },
                owner(),
            )
            .await
            .unwrap();

        assert!(hidden.unwrap_err().is_not_found());
        assert!(shown.is_deleted());
    }
}
