//! RemoveProConHandler - Command handler for deleting a pro/con.

use std::sync::Arc;

use tracing::info;

use super::super::access::load_by_pro_con;
use crate::domain::decision::{Decision, DecisionError};
use crate::domain::foundation::{CommandMetadata, ProConId, Timestamp};
use crate::ports::DecisionRepository;

/// Command to delete a single pro/con.
#[derive(Debug, Clone, Copy)]
pub struct RemoveProConCommand {
    pub pro_con_id: ProConId,
}

/// Handler for removing pros/cons.
pub struct RemoveProConHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl RemoveProConHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RemoveProConCommand,
        metadata: CommandMetadata,
    ) -> Result<Decision, DecisionError> {
        let mut decision =
            load_by_pro_con(self.repository.as_ref(), &cmd.pro_con_id, &metadata.user_id)
                .await?;
        let loaded_at = *decision.updated_at();

        decision.remove_pro_con(&cmd.pro_con_id, Timestamp::now())?;
        self.repository.update(&decision, &loaded_at).await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %decision.id(),
            pro_con_id = %cmd.pro_con_id,
            "Pro/con removed"
        );
        Ok(decision)
    }
}
