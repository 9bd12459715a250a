//! ExportDecisionsHandler - Query handler for a full export of live decisions.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::decision::{Decision, DecisionError};
use crate::domain::foundation::{CommandMetadata, Timestamp};
use crate::ports::{CategoryRepository, DecisionRepository};

/// One exported decision with its options, pros/cons and category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedDecision {
    #[serde(flatten)]
    pub decision: Decision,
    pub category_name: Option<String>,
}

/// Everything the caller has recorded outside the trash, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionExport {
    pub export_date: Timestamp,
    pub total: u64,
    pub decisions: Vec<ExportedDecision>,
}

impl DecisionExport {
    /// Pretty-printed JSON document for download.
    pub fn to_json(&self) -> Result<String, DecisionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DecisionError::infrastructure(format!("Failed to encode export: {}", e)))
    }
}

/// Handler exporting the caller's live decisions.
pub struct ExportDecisionsHandler {
    decisions: Arc<dyn DecisionRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ExportDecisionsHandler {
    pub fn new(
        decisions: Arc<dyn DecisionRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            decisions,
            categories,
        }
    }

    pub async fn handle(&self, metadata: CommandMetadata) -> Result<DecisionExport, DecisionError> {
        // 1. Load live aggregates
        let live = self.decisions.list_live(&metadata.user_id).await?;

        // 2. Resolve category names
        let names: HashMap<_, _> = self
            .categories
            .list_visible(&metadata.user_id)
            .await?
            .into_iter()
            .map(|c| (*c.id(), c.name().to_string()))
            .collect();

        // 3. Assemble
        let decisions: Vec<ExportedDecision> = live
            .into_iter()
            .map(|decision| ExportedDecision {
                category_name: decision.category_id().and_then(|id| names.get(id).cloned()),
                decision,
            })
            .collect();

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            total = decisions.len(),
            "Exported decisions"
        );

        Ok(DecisionExport {
            export_date: Timestamp::now(),
            total: decisions.len() as u64,
            decisions,
        })
    }
}
