//! Handler set wired against one storage backend.

use std::sync::Arc;

use super::handlers::*;
use crate::ports::{CategoryRepository, DecisionReader, DecisionRepository};

/// Every decision journal handler, sharing the same ports.
///
/// Cheap to clone; hand one to each caller that needs to run commands.
#[derive(Clone)]
pub struct JournalHandlers {
    // Decisions
    pub create_decision: Arc<CreateDecisionHandler>,
    pub get_decision: Arc<GetDecisionHandler>,
    pub list_decisions: Arc<ListDecisionsHandler>,
    pub update_decision: Arc<UpdateDecisionHandler>,
    pub abandon_decision: Arc<AbandonDecisionHandler>,
    pub soft_delete_decision: Arc<SoftDeleteDecisionHandler>,
    pub restore_decision: Arc<RestoreDecisionHandler>,
    pub purge_decision: Arc<PurgeDecisionHandler>,
    pub list_trash: Arc<ListTrashHandler>,
    pub bulk_soft_delete: Arc<BulkSoftDeleteHandler>,
    pub bulk_restore: Arc<BulkRestoreHandler>,
    pub bulk_purge: Arc<BulkPurgeHandler>,
    pub export_decisions: Arc<ExportDecisionsHandler>,

    // Options and pros/cons
    pub add_option: Arc<AddOptionHandler>,
    pub update_option: Arc<UpdateOptionHandler>,
    pub remove_option: Arc<RemoveOptionHandler>,
    pub reorder_options: Arc<ReorderOptionsHandler>,
    pub add_pro_con: Arc<AddProConHandler>,
    pub update_pro_con: Arc<UpdateProConHandler>,
    pub remove_pro_con: Arc<RemoveProConHandler>,

    // Outcomes
    pub record_outcome: Arc<RecordOutcomeHandler>,
    pub list_outcomes: Arc<ListOutcomesHandler>,
    pub compute_stats: Arc<ComputeStatsHandler>,

    // Categories
    pub list_categories: Arc<ListCategoriesHandler>,
    pub create_category: Arc<CreateCategoryHandler>,
    pub update_category: Arc<UpdateCategoryHandler>,
    pub delete_category: Arc<DeleteCategoryHandler>,
}

impl JournalHandlers {
    pub fn new(
        decisions: Arc<dyn DecisionRepository>,
        reader: Arc<dyn DecisionReader>,
        categories: Arc<dyn CategoryRepository>,
        limits: PageLimits,
    ) -> Self {
        Self {
            create_decision: Arc::new(CreateDecisionHandler::new(
                decisions.clone(),
                categories.clone(),
            )),
            get_decision: Arc::new(GetDecisionHandler::new(decisions.clone())),
            list_decisions: Arc::new(ListDecisionsHandler::new(reader.clone(), limits)),
            update_decision: Arc::new(UpdateDecisionHandler::new(
                decisions.clone(),
                categories.clone(),
            )),
            abandon_decision: Arc::new(AbandonDecisionHandler::new(decisions.clone())),
            soft_delete_decision: Arc::new(SoftDeleteDecisionHandler::new(decisions.clone())),
            restore_decision: Arc::new(RestoreDecisionHandler::new(decisions.clone())),
            purge_decision: Arc::new(PurgeDecisionHandler::new(decisions.clone())),
            list_trash: Arc::new(ListTrashHandler::new(reader.clone(), limits)),
            bulk_soft_delete: Arc::new(BulkSoftDeleteHandler::new(decisions.clone())),
            bulk_restore: Arc::new(BulkRestoreHandler::new(decisions.clone())),
            bulk_purge: Arc::new(BulkPurgeHandler::new(decisions.clone())),
            export_decisions: Arc::new(ExportDecisionsHandler::new(
                decisions.clone(),
                categories.clone(),
            )),

            add_option: Arc::new(AddOptionHandler::new(decisions.clone())),
            update_option: Arc::new(UpdateOptionHandler::new(decisions.clone())),
            remove_option: Arc::new(RemoveOptionHandler::new(decisions.clone())),
            reorder_options: Arc::new(ReorderOptionsHandler::new(decisions.clone())),
            add_pro_con: Arc::new(AddProConHandler::new(decisions.clone())),
            update_pro_con: Arc::new(UpdateProConHandler::new(decisions.clone())),
            remove_pro_con: Arc::new(RemoveProConHandler::new(decisions.clone())),

            record_outcome: Arc::new(RecordOutcomeHandler::new(decisions.clone())),
            list_outcomes: Arc::new(ListOutcomesHandler::new(decisions, reader.clone())),
            compute_stats: Arc::new(ComputeStatsHandler::new(reader)),

            list_categories: Arc::new(ListCategoriesHandler::new(categories.clone())),
            create_category: Arc::new(CreateCategoryHandler::new(categories.clone())),
            update_category: Arc::new(UpdateCategoryHandler::new(categories.clone())),
            delete_category: Arc::new(DeleteCategoryHandler::new(categories)),
        }
    }
}
