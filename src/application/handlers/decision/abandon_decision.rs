//! AbandonDecisionHandler - Command handler for giving up on a decision.

use std::sync::Arc;

use tracing::info;

use super::super::access::load_decision;
use crate::domain::decision::{AbandonReason, Decision, DecisionError};
use crate::domain::foundation::{CommandMetadata, DecisionId, Timestamp};
use crate::ports::DecisionRepository;

/// Command to abandon a draft or deliberating decision.
#[derive(Debug, Clone)]
pub struct AbandonDecisionCommand {
    pub decision_id: DecisionId,
    pub reason: AbandonReason,
    pub note: Option<String>,
}

/// Handler for abandoning decisions.
pub struct AbandonDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl AbandonDecisionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: AbandonDecisionCommand,
        metadata: CommandMetadata,
    ) -> Result<Decision, DecisionError> {
        // 1. Load and authorize
        let mut decision = load_decision(
            self.repository.as_ref(),
            &cmd.decision_id,
            &metadata.user_id,
            false,
        )
        .await?;
        let loaded_at = *decision.updated_at();

        // 2. Transition
        decision.abandon(cmd.reason, cmd.note, Timestamp::now())?;

        // 3. Persist
        self.repository.update(&decision, &loaded_at).await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %decision.id(),
            reason = %cmd.reason,
            "Decision abandoned"
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{journal, owner, seed};
    use crate::domain::decision::NewDecision;
    use crate::domain::foundation::DecisionStatus;

    #[tokio::test]
    async fn abandons_draft_with_reason_and_note() {
        let store = journal();
        let decision = seed(&store, NewDecision::titled("Run a marathon?")).await;
        let handler = AbandonDecisionHandler::new(store.clone());

        let abandoned = handler
            .handle(
                AbandonDecisionCommand {
                    decision_id: *decision.id(),
                    reason: AbandonReason::NoLongerRelevant,
                    note: Some("Knee injury".to_string()),
                },
                owner(),
            )
            .await
            .unwrap();

        assert_eq!(abandoned.status(), DecisionStatus::Abandoned);
        assert_eq!(abandoned.abandon_reason(), Some(AbandonReason::NoLongerRelevant));
        assert_eq!(abandoned.abandon_note(), Some("Knee injury"));
    }

    #[tokio::test]
    async fn decided_decision_cannot_be_abandoned() {
        let store = journal();
        let decision = seed(
            &store,
            NewDecision::titled("Run a marathon?").with_status(DecisionStatus::Decided),
        )
        .await;
        let handler = AbandonDecisionHandler::new(store.clone());

        let err = handler
            .handle(
                AbandonDecisionCommand {
                    decision_id: *decision.id(),
                    reason: AbandonReason::Other,
                    note: None,
                },
                owner(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("status"));
    }
}
