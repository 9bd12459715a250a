//! SoftDeleteDecisionHandler - Command handler for moving a decision to the trash.

use std::sync::Arc;

use tracing::info;

use super::super::access::load_decision;
use crate::domain::decision::{DecisionError, SoftDeleteReceipt};
use crate::domain::foundation::{CommandMetadata, DecisionId, Timestamp};
use crate::ports::DecisionRepository;

/// Command to move a decision to the trash. Idempotent.
#[derive(Debug, Clone, Copy)]
pub struct SoftDeleteDecisionCommand {
    pub decision_id: DecisionId,
}

/// Handler for soft-deleting decisions.
pub struct SoftDeleteDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl SoftDeleteDecisionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: SoftDeleteDecisionCommand,
        metadata: CommandMetadata,
    ) -> Result<SoftDeleteReceipt, DecisionError> {
        // 1. Authorize; a decision already in the trash is still addressable
        load_decision(
            self.repository.as_ref(),
            &cmd.decision_id,
            &metadata.user_id,
            true,
        )
        .await?;

        // 2. Set deleted_at, leaving every other field alone
        let receipt = self
            .repository
            .soft_delete(&metadata.user_id, &cmd.decision_id, Timestamp::now())
            .await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %cmd.decision_id,
            already_deleted = receipt.already_deleted,
            "Decision moved to trash"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{journal, owner, seed_with_options, stranger};

    #[tokio::test]
    async fn trashes_without_touching_children() {
        let store = journal();
        let decision = seed_with_options(&store).await;
        let handler = SoftDeleteDecisionHandler::new(store.clone());

        let receipt = handler
            .handle(
                SoftDeleteDecisionCommand {
                    decision_id: *decision.id(),
                },
                owner(),
            )
            .await
            .unwrap();

        assert!(!receipt.already_deleted);
        let stored = store.find_by_id(decision.id()).await.unwrap().unwrap();
        assert_eq!(stored.deleted_at(), Some(&receipt.deleted_at));
        assert_eq!(stored.updated_at(), decision.updated_at());
        assert_eq!(stored.options(), decision.options());
        assert_eq!(store.pro_con_count().await, 2);
    }

    #[tokio::test]
    async fn second_delete_reports_already_deleted() {
        let store = journal();
        let decision = seed_with_options(&store).await;
        let handler = SoftDeleteDecisionHandler::new(store.clone());
        let cmd = SoftDeleteDecisionCommand {
            decision_id: *decision.id(),
        };

        let first = handler.handle(cmd, owner()).await.unwrap();
        let second = handler.handle(cmd, owner()).await.unwrap();

        assert!(second.already_deleted);
        assert_eq!(first.deleted_at, second.deleted_at);
    }

    #[tokio::test]
    async fn stranger_gets_not_found() {
        let store = journal();
        let decision = seed_with_options(&store).await;
        let handler = SoftDeleteDecisionHandler::new(store.clone());

        let err = handler
            .handle(
                SoftDeleteDecisionCommand {
                    decision_id: *decision.id(),
                },
                stranger(),
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        let stored = store.find_by_id(decision.id()).await.unwrap().unwrap();
        assert!(!stored.is_deleted());
    }
}
