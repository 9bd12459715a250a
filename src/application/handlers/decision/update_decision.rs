//! UpdateDecisionHandler - Command handler for patching a decision.

use std::sync::Arc;

use tracing::info;

use super::super::access::{ensure_category_visible, load_decision};
use crate::domain::decision::{Decision, DecisionError, DecisionPatch};
use crate::domain::foundation::{CommandMetadata, DecisionId, Timestamp};
use crate::ports::{CategoryRepository, DecisionRepository};

/// Command to apply a partial update to a decision.
#[derive(Debug, Clone)]
pub struct UpdateDecisionCommand {
    pub decision_id: DecisionId,
    pub patch: DecisionPatch,
    /// `updated_at` the caller last saw; a mismatch is a conflict.
    pub expected_updated_at: Option<Timestamp>,
}

/// Handler for updating decisions.
pub struct UpdateDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl UpdateDecisionHandler {
    pub fn new(
        repository: Arc<dyn DecisionRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            repository,
            categories,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateDecisionCommand,
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

        // 2. Optimistic concurrency check against what the caller saw
        let loaded_at = *decision.updated_at();
        if cmd.expected_updated_at.is_some_and(|seen| seen != loaded_at) {
            return Err(DecisionError::conflict(
                "Decision was modified since it was read",
            ));
        }

        // 3. A newly assigned category must be visible to the caller
        if let Some(category_id) = cmd.patch.assigned_category() {
            ensure_category_visible(self.categories.as_ref(), category_id, &metadata.user_id)
                .await?;
        }

        // 4. Validate and apply; nothing is written if this fails
        let previous_status = decision.status();
        decision.apply_patch(cmd.patch, Timestamp::now())?;

        // 5. Persist with compare-and-swap on updated_at
        self.repository.update(&decision, &loaded_at).await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %decision.id(),
            from_status = %previous_status,
            to_status = %decision.status(),
            "Decision updated"
        );
        Ok(decision)
    }
}
