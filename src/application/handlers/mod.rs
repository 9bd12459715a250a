//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! handler authorizes the caller explicitly before touching storage.

mod access;
mod paging;
#[cfg(test)]
pub(crate) mod test_support;

pub mod category;
pub mod decision;
pub mod option;
pub mod outcome;

pub use category::{
    CreateCategoryCommand, CreateCategoryHandler, DeleteCategoryCommand, DeleteCategoryHandler,
    ListCategoriesHandler, UpdateCategoryCommand, UpdateCategoryHandler,
};
pub use decision::{
    AbandonDecisionCommand, AbandonDecisionHandler, BulkDecisionCommand, BulkPurgeHandler,
    BulkRestoreHandler, BulkSoftDeleteHandler, CreateDecisionCommand, CreateDecisionHandler,
    DecisionExport, ExportDecisionsHandler, ExportedDecision, GetDecisionHandler, GetDecisionQuery, ListDecisionsHandler, ListDecisionsQuery,
    ListTrashHandler, ListTrashQuery, PurgeDecisionCommand, PurgeDecisionHandler,
    RestoreDecisionCommand, RestoreDecisionHandler, SoftDeleteDecisionCommand,
    SoftDeleteDecisionHandler, UpdateDecisionCommand, UpdateDecisionHandler, MAX_BULK_IDS,
};
pub use option::{
    AddOptionCommand, AddOptionHandler, AddOptionResult, AddProConCommand, AddProConHandler,
    AddProConResult, RemoveOptionCommand, RemoveOptionHandler, RemoveProConCommand,
    RemoveProConHandler, ReorderOptionsCommand, ReorderOptionsHandler, UpdateOptionCommand,
    UpdateOptionHandler, UpdateProConCommand, UpdateProConHandler,
};
pub use outcome::{
    ComputeStatsHandler, ListOutcomesHandler, ListOutcomesQuery, RecordOutcomeCommand,
    RecordOutcomeHandler,
};
pub use paging::PageLimits;
