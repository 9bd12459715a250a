//! Bulk trash operations.
//!
//! Each id is processed independently through the single-decision handler,
//! so one failure never rolls back the others.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use super::purge_decision::{PurgeDecisionCommand, PurgeDecisionHandler};
use super::restore_decision::{RestoreDecisionCommand, RestoreDecisionHandler};
use super::soft_delete_decision::{SoftDeleteDecisionCommand, SoftDeleteDecisionHandler};
use crate::domain::decision::{
    BulkFailure, BulkResult, DecisionError, PurgeReceipt, SoftDeleteReceipt,
};
use crate::domain::foundation::{CommandMetadata, DecisionId};
use crate::ports::DecisionRepository;

/// Largest number of ids accepted by one bulk request.
pub const MAX_BULK_IDS: usize = 100;

/// Command carrying the ids a bulk operation should touch.
#[derive(Debug, Clone, Default)]
pub struct BulkDecisionCommand {
    pub decision_ids: Vec<DecisionId>,
}

/// Rejects empty or oversized requests and drops repeated ids, keeping the
/// first occurrence.
fn validated_ids(ids: Vec<DecisionId>) -> Result<Vec<DecisionId>, DecisionError> {
    if ids.is_empty() {
        return Err(DecisionError::validation(
            "decision_ids",
            "At least one decision id is required",
        ));
    }
    if ids.len() > MAX_BULK_IDS {
        return Err(DecisionError::validation(
            "decision_ids",
            format!("At most {} decision ids per request", MAX_BULK_IDS),
        ));
    }
    let mut seen = HashSet::with_capacity(ids.len());
    Ok(ids.into_iter().filter(|id| seen.insert(*id)).collect())
}

fn failure(decision_id: DecisionId, err: &DecisionError) -> BulkFailure {
    BulkFailure {
        decision_id,
        code: err.code(),
        message: err.to_string(),
    }
}

/// Handler for trashing many decisions at once.
pub struct BulkSoftDeleteHandler {
    inner: SoftDeleteDecisionHandler,
}

impl BulkSoftDeleteHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self {
            inner: SoftDeleteDecisionHandler::new(repository),
        }
    }

    pub async fn handle(
        &self,
        cmd: BulkDecisionCommand,
        metadata: CommandMetadata,
    ) -> Result<BulkResult<SoftDeleteReceipt>, DecisionError> {
        let ids = validated_ids(cmd.decision_ids)?;
        let mut result = BulkResult::new();

        for decision_id in ids {
            match self
                .inner
                .handle(SoftDeleteDecisionCommand { decision_id }, metadata.clone())
                .await
            {
                Ok(receipt) => result.succeeded.push(receipt),
                Err(err) => result.failed.push(failure(decision_id, &err)),
            }
        }

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            succeeded = result.succeeded.len(),
            failed = result.failed.len(),
            "Bulk soft delete finished"
        );
        Ok(result)
    }
}

/// Handler for restoring many decisions at once.
pub struct BulkRestoreHandler {
    inner: RestoreDecisionHandler,
}

impl BulkRestoreHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self {
            inner: RestoreDecisionHandler::new(repository),
        }
    }

    pub async fn handle(
        &self,
        cmd: BulkDecisionCommand,
        metadata: CommandMetadata,
    ) -> Result<BulkResult<DecisionId>, DecisionError> {
        let ids = validated_ids(cmd.decision_ids)?;
        let mut result = BulkResult::new();

        for decision_id in ids {
            match self
                .inner
                .handle(RestoreDecisionCommand { decision_id }, metadata.clone())
                .await
            {
                Ok(_) => result.succeeded.push(decision_id),
                Err(err) => result.failed.push(failure(decision_id, &err)),
            }
        }

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            succeeded = result.succeeded.len(),
            failed = result.failed.len(),
            "Bulk restore finished"
        );
        Ok(result)
    }
}

/// Handler for purging many decisions at once.
pub struct BulkPurgeHandler {
    inner: PurgeDecisionHandler,
}

impl BulkPurgeHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self {
            inner: PurgeDecisionHandler::new(repository),
        }
    }

    pub async fn handle(
        &self,
        cmd: BulkDecisionCommand,
        metadata: CommandMetadata,
    ) -> Result<BulkResult<PurgeReceipt>, DecisionError> {
        let ids = validated_ids(cmd.decision_ids)?;
        let mut result = BulkResult::new();

        for decision_id in ids {
            match self
                .inner
                .handle(PurgeDecisionCommand { decision_id }, metadata.clone())
                .await
            {
                Ok(receipt) => result.succeeded.push(receipt),
                Err(err) => result.failed.push(failure(decision_id, &err)),
            }
        }

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            succeeded = result.succeeded.len(),
            failed = result.failed.len(),
            "Bulk purge finished"
        );
        Ok(result)
    }
}
