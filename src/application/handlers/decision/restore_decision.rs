//! RestoreDecisionHandler - Command handler for taking a decision out of the trash.

use std::sync::Arc;

use tracing::info;

use super::super::access::load_decision;
use crate::domain::decision::{Decision, DecisionError};
use crate::domain::foundation::{CommandMetadata, DecisionId};
use crate::ports::DecisionRepository;

/// Command to restore a trashed decision. Restoring a live one is a no-op.
#[derive(Debug, Clone, Copy)]
pub struct RestoreDecisionCommand {
    pub decision_id: DecisionId,
}

/// Handler for restoring decisions.
pub struct RestoreDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl RestoreDecisionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RestoreDecisionCommand,
        metadata: CommandMetadata,
    ) -> Result<Decision, DecisionError> {
        // 1. Authorize against the possibly trashed row
        let current = load_decision(
            self.repository.as_ref(),
            &cmd.decision_id,
            &metadata.user_id,
            true,
        )
        .await?;

        // 2. Clear deleted_at
        let restored = self
            .repository
            .restore(&metadata.user_id, &cmd.decision_id)
            .await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %cmd.decision_id,
            was_deleted = current.is_deleted(),
            "Decision restored"
        );
        Ok(restored)
    }
}
