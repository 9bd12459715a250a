//! ComputeStatsHandler - Query handler for outcome statistics.

use std::sync::Arc;

use tracing::debug;

use crate::domain::decision::DecisionError;
use crate::domain::foundation::CommandMetadata;
use crate::domain::outcome::DecisionStats;
use crate::ports::DecisionReader;

/// Handler computing statistics over the caller's live decisions.
pub struct ComputeStatsHandler {
    reader: Arc<dyn DecisionReader>,
}

impl ComputeStatsHandler {
    pub fn new(reader: Arc<dyn DecisionReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, metadata: CommandMetadata) -> Result<DecisionStats, DecisionError> {
        let facts = self.reader.outcome_facts(&metadata.user_id).await?;
        let stats = DecisionStats::compute(&facts);

        debug!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            total = stats.overall.total,
            with_outcomes = stats.overall.with_outcomes,
            "Computed outcome stats"
        );
        Ok(stats)
    }
}
