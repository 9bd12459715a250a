//! ReorderOptionsHandler - Command handler for rearranging options.

use std::sync::Arc;

use tracing::info;

use super::super::access::load_decision;
use crate::domain::decision::{Decision, DecisionError};
use crate::domain::foundation::{CommandMetadata, DecisionId, OptionId, Timestamp};
use crate::ports::DecisionRepository;

/// Command to set the option order. `ordered_ids` must list every option of
/// the decision exactly once.
#[derive(Debug, Clone)]
pub struct ReorderOptionsCommand {
    pub decision_id: DecisionId,
    pub ordered_ids: Vec<OptionId>,
}

/// Handler for reordering options.
pub struct ReorderOptionsHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl ReorderOptionsHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ReorderOptionsCommand,
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

        // 2. Reassign display order 0..n-1
        decision.reorder_options(&cmd.ordered_ids, Timestamp::now())?;

        // 3. Persist
        self.repository.update(&decision, &loaded_at).await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %decision.id(),
            option_count = cmd.ordered_ids.len(),
            "Options reordered"
        );
        Ok(decision)
    }
}
