//! UpdateProConHandler - Command handler for editing or moving a pro/con.

use std::sync::Arc;

use tracing::info;

use super::super::access::load_by_pro_con;
use crate::domain::decision::{Decision, DecisionError, ProConPatch};
use crate::domain::foundation::{CommandMetadata, ProConId, Timestamp};
use crate::ports::DecisionRepository;

/// Command to change a pro/con's kind or content, or move it to another
/// option of the same decision.
#[derive(Debug, Clone)]
pub struct UpdateProConCommand {
    pub pro_con_id: ProConId,
    pub patch: ProConPatch,
}

/// Handler for updating pros/cons.
pub struct UpdateProConHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl UpdateProConHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProConCommand,
        metadata: CommandMetadata,
    ) -> Result<Decision, DecisionError> {
        // 1. Resolve the owning decision
        let mut decision =
            load_by_pro_con(self.repository.as_ref(), &cmd.pro_con_id, &metadata.user_id)
                .await?;
        let loaded_at = *decision.updated_at();

        // 2. Apply; a move target must belong to the same decision
        decision.update_pro_con(&cmd.pro_con_id, cmd.patch, Timestamp::now())?;

        // 3. Persist
        self.repository.update(&decision, &loaded_at).await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %decision.id(),
            pro_con_id = %cmd.pro_con_id,
            "Pro/con updated"
        );
        Ok(decision)
    }
}
