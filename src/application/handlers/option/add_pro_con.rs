//! AddProConHandler - Command handler for arguing for or against an option.

use std::sync::Arc;

use tracing::info;

use super::super::access::load_by_option;
use crate::domain::decision::{Decision, DecisionError, NewProCon};
use crate::domain::foundation::{CommandMetadata, OptionId, ProConId, Timestamp};
use crate::ports::DecisionRepository;

/// Command to append a pro or con to an option.
#[derive(Debug, Clone)]
pub struct AddProConCommand {
    pub option_id: OptionId,
    pub fields: NewProCon,
}

/// Result of adding a pro/con.
#[derive(Debug, Clone)]
pub struct AddProConResult {
    pub decision: Decision,
    pub pro_con_id: ProConId,
}

/// Handler for adding pros/cons.
pub struct AddProConHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl AddProConHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: AddProConCommand,
        metadata: CommandMetadata,
    ) -> Result<AddProConResult, DecisionError> {
        // 1. Resolve the owning decision
        let mut decision =
            load_by_option(self.repository.as_ref(), &cmd.option_id, &metadata.user_id).await?;
        let loaded_at = *decision.updated_at();

        // 2. Append within the option
        let kind = cmd.fields.kind;
        let pro_con_id = decision.add_pro_con(&cmd.option_id, cmd.fields, Timestamp::now())?;

        // 3. Persist
        self.repository.update(&decision, &loaded_at).await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %decision.id(),
            option_id = %cmd.option_id,
            kind = %kind,
            "Pro/con added"
        );
        Ok(AddProConResult {
            decision,
            pro_con_id,
        })
    }
}
