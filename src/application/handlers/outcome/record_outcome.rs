//! RecordOutcomeHandler - Command handler for appending an outcome check-in.

use std::sync::Arc;

use tracing::info;

use super::super::access::load_decision;
use crate::domain::decision::DecisionError;
use crate::domain::foundation::{CommandMetadata, DecisionId, Timestamp};
use crate::domain::outcome::{NewOutcome, OutcomeResult, RecordedOutcome};
use crate::ports::DecisionRepository;

/// Command to record how a decision turned out.
#[derive(Debug, Clone)]
pub struct RecordOutcomeCommand {
    pub decision_id: DecisionId,
    pub result: OutcomeResult,
    /// 1-5 when given.
    pub satisfaction: Option<i32>,
    pub notes: Option<String>,
}

/// Handler for recording outcomes.
pub struct RecordOutcomeHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl RecordOutcomeHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RecordOutcomeCommand,
        metadata: CommandMetadata,
    ) -> Result<RecordedOutcome, DecisionError> {
        // 1. Validate input before touching storage
        let outcome = NewOutcome::new(cmd.result, cmd.satisfaction, cmd.notes, Timestamp::now())?;

        // 2. Authorize
        load_decision(
            self.repository.as_ref(),
            &cmd.decision_id,
            &metadata.user_id,
            false,
        )
        .await?;

        // 3. Append with the next check-in number; decided becomes reviewed
        let recorded = self
            .repository
            .append_outcome(&metadata.user_id, &cmd.decision_id, outcome)
            .await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %cmd.decision_id,
            check_in_number = recorded.outcome.check_in_number,
            result = %recorded.outcome.result,
            status = %recorded.decision_status,
            "Outcome recorded"
        );
        Ok(recorded)
    }
}
