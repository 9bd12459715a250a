//! Decision command and query handlers.

mod abandon_decision;
mod bulk;
mod create_decision;
mod export_decisions;
mod get_decision;
mod list_decisions;
mod list_trash;
mod purge_decision;
mod restore_decision;
mod soft_delete_decision;
mod update_decision;

pub use abandon_decision::{AbandonDecisionCommand, AbandonDecisionHandler};
pub use bulk::{
    BulkDecisionCommand, BulkPurgeHandler, BulkRestoreHandler, BulkSoftDeleteHandler,
    MAX_BULK_IDS,
};
pub use create_decision::{CreateDecisionCommand, CreateDecisionHandler};
pub use export_decisions::{DecisionExport, ExportDecisionsHandler, ExportedDecision};
pub use get_decision::{GetDecisionHandler, GetDecisionQuery};
pub use list_decisions::{ListDecisionsHandler, ListDecisionsQuery};
pub use list_trash::{ListTrashHandler, ListTrashQuery};
pub use purge_decision::{PurgeDecisionCommand, PurgeDecisionHandler};
pub use restore_decision::{RestoreDecisionCommand, RestoreDecisionHandler};
pub use soft_delete_decision::{SoftDeleteDecisionCommand, SoftDeleteDecisionHandler};
pub use update_decision::{UpdateDecisionCommand, UpdateDecisionHandler};
