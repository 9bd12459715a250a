//! UpdateOptionHandler - Command handler for editing an option.

use std::sync::Arc;

use tracing::info;

use super::super::access::load_by_option;
use crate::domain::decision::{Decision, DecisionError, OptionPatch};
use crate::domain::foundation::{CommandMetadata, OptionId, Timestamp};
use crate::ports::DecisionRepository;

/// Command to change an option's title or description.
#[derive(Debug, Clone)]
pub struct UpdateOptionCommand {
    pub option_id: OptionId,
    pub patch: OptionPatch,
}

/// Handler for updating options.
pub struct UpdateOptionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl UpdateOptionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateOptionCommand,
        metadata: CommandMetadata,
    ) -> Result<Decision, DecisionError> {
        // 1. Resolve the owning decision
        let mut decision =
            load_by_option(self.repository.as_ref(), &cmd.option_id, &metadata.user_id).await?;
        let loaded_at = *decision.updated_at();

        // 2. Apply
        decision.update_option(&cmd.option_id, cmd.patch, Timestamp::now())?;

        // 3. Persist
        self.repository.update(&decision, &loaded_at).await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %decision.id(),
            option_id = %cmd.option_id,
            "Option updated"
        );
        Ok(decision)
    }
}
