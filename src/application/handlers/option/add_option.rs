//! AddOptionHandler - Command handler for appending an option to a decision.

use std::sync::Arc;

use tracing::info;

use super::super::access::load_decision;
use crate::domain::decision::{Decision, DecisionError, NewOption};
use crate::domain::foundation::{CommandMetadata, DecisionId, OptionId, Timestamp};
use crate::ports::DecisionRepository;

/// Command to add an option, optionally with inline pros/cons.
#[derive(Debug, Clone)]
pub struct AddOptionCommand {
    pub decision_id: DecisionId,
    pub fields: NewOption,
}

/// Result of adding an option.
#[derive(Debug, Clone)]
pub struct AddOptionResult {
    pub decision: Decision,
    pub option_id: OptionId,
}

/// Handler for adding options.
pub struct AddOptionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl AddOptionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: AddOptionCommand,
        metadata: CommandMetadata,
    ) -> Result<AddOptionResult, DecisionError> {
        // 1. Load and authorize
        let mut decision = load_decision(
            self.repository.as_ref(),
            &cmd.decision_id,
            &metadata.user_id,
            false,
        )
        .await?;
        let loaded_at = *decision.updated_at();

        // 2. Append after the current last option
        let option_id = decision.add_option(cmd.fields, Timestamp::now())?;

        // 3. Persist
        self.repository.update(&decision, &loaded_at).await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %decision.id(),
            option_id = %option_id,
            "Option added"
        );
        Ok(AddOptionResult {
            decision,
            option_id,
        })
    }
}
