//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, command handlers write through `DecisionRepository` and
//! `CategoryRepository` while query handlers read through `DecisionReader`.

pub mod handlers;
mod journal;

pub use journal::JournalHandlers;

pub use handlers::{
    // Decision handlers
    AbandonDecisionCommand, AbandonDecisionHandler,
    BulkDecisionCommand, BulkPurgeHandler, BulkRestoreHandler, BulkSoftDeleteHandler,
    CreateDecisionCommand, CreateDecisionHandler,
    DecisionExport, ExportDecisionsHandler, ExportedDecision,
    GetDecisionHandler, GetDecisionQuery,
    ListDecisionsHandler, ListDecisionsQuery,
    ListTrashHandler, ListTrashQuery,
    PurgeDecisionCommand, PurgeDecisionHandler,
    RestoreDecisionCommand, RestoreDecisionHandler,
    SoftDeleteDecisionCommand, SoftDeleteDecisionHandler,
    UpdateDecisionCommand, UpdateDecisionHandler,
    // Option and pro/con handlers
    AddOptionCommand, AddOptionHandler, AddOptionResult,
    AddProConCommand, AddProConHandler, AddProConResult,
    RemoveOptionCommand, RemoveOptionHandler,
    RemoveProConCommand, RemoveProConHandler,
    ReorderOptionsCommand, ReorderOptionsHandler,
    UpdateOptionCommand, UpdateOptionHandler,
    UpdateProConCommand, UpdateProConHandler,
    // Outcome handlers
    ComputeStatsHandler, ListOutcomesHandler, ListOutcomesQuery,
    RecordOutcomeCommand, RecordOutcomeHandler,
    // Category handlers
    CreateCategoryCommand, CreateCategoryHandler,
    DeleteCategoryCommand, DeleteCategoryHandler,
    ListCategoriesHandler,
    UpdateCategoryCommand, UpdateCategoryHandler,
    // Paging
    PageLimits,
};
