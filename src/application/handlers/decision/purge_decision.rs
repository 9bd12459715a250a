//! PurgeDecisionHandler - Command handler for permanently deleting a decision.

use std::sync::Arc;

use tracing::info;

use super::super::access::load_decision;
use crate::domain::decision::{DecisionError, PurgeReceipt};
use crate::domain::foundation::{CommandMetadata, DecisionId};
use crate::ports::DecisionRepository;

/// Command to remove a decision and every descendant. Irreversible.
#[derive(Debug, Clone, Copy)]
pub struct PurgeDecisionCommand {
    pub decision_id: DecisionId,
}

/// Handler for purging decisions, live or trashed.
pub struct PurgeDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl PurgeDecisionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: PurgeDecisionCommand,
        metadata: CommandMetadata,
    ) -> Result<PurgeReceipt, DecisionError> {
        // 1. Authorize
        load_decision(
            self.repository.as_ref(),
            &cmd.decision_id,
            &metadata.user_id,
            true,
        )
        .await?;

        // 2. Remove pros/cons, options, outcomes and the decision in one unit
        let receipt = self
            .repository
            .purge(&metadata.user_id, &cmd.decision_id)
            .await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %cmd.decision_id,
            options_removed = receipt.options_removed,
            outcomes_removed = receipt.outcomes_removed,
            "Decision purged"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{journal, owner, seed_with_options, stranger};

    #[tokio::test]
    async fn purge_leaves_nothing_behind() {
        let store = journal();
        let decision = seed_with_options(&store).await;
        let handler = PurgeDecisionHandler::new(store.clone());

        let receipt = handler
            .handle(
                PurgeDecisionCommand {
                    decision_id: *decision.id(),
                },
                owner(),
            )
            .await
            .unwrap();

        assert_eq!(receipt.options_removed, 2);
        assert_eq!(receipt.pros_cons_removed, 2);
        assert_eq!(store.decision_count().await, 0);
        assert_eq!(store.option_count().await, 0);
        assert_eq!(store.pro_con_count().await, 0);
    }

    #[tokio::test]
    async fn purged_decision_is_gone_for_good() {
        let store = journal();
        let decision = seed_with_options(&store).await;
        let handler = PurgeDecisionHandler::new(store.clone());
        let cmd = PurgeDecisionCommand {
            decision_id: *decision.id(),
        };

        handler.handle(cmd, owner()).await.unwrap();
        let err = handler.handle(cmd, owner()).await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn stranger_purge_changes_nothing() {
        let store = journal();
        let decision = seed_with_options(&store).await;
        let handler = PurgeDecisionHandler::new(store.clone());

        let err = handler
            .handle(
                PurgeDecisionCommand {
                    decision_id: *decision.id(),
                },
                stranger(),
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.decision_count().await, 1);
        assert_eq!(store.pro_con_count().await, 2);
    }
}
