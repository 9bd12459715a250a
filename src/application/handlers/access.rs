//! Ownership-checked loading shared by the decision, option and outcome
//! handlers.
//!
//! Every lookup resolves the owning decision first and reports foreign rows
//! exactly like missing ones.

use tracing::warn;

use crate::domain::decision::{Decision, DecisionError};
use crate::domain::foundation::{CategoryId, DecisionId, OptionId, ProConId, UserId, VisibleTo};
use crate::ports::{CategoryRepository, DecisionRepository};

/// Loads a decision the caller owns. Trashed decisions are only returned
/// when `include_trashed` is set.
pub(super) async fn load_decision(
    repo: &dyn DecisionRepository,
    id: &DecisionId,
    user: &UserId,
    include_trashed: bool,
) -> Result<Decision, DecisionError> {
    let decision = repo
        .find_by_id(id)
        .await?
        .ok_or_else(DecisionError::not_found)?;
    authorize(decision, user, include_trashed)
}

/// Loads the live decision owning `option_id`.
pub(super) async fn load_by_option(
    repo: &dyn DecisionRepository,
    option_id: &OptionId,
    user: &UserId,
) -> Result<Decision, DecisionError> {
    let decision = repo
        .find_by_option(option_id)
        .await?
        .ok_or_else(DecisionError::option_not_found)?;
    authorize(decision, user, false).map_err(|_| DecisionError::option_not_found())
}

/// Loads the live decision owning `pro_con_id`.
pub(super) async fn load_by_pro_con(
    repo: &dyn DecisionRepository,
    pro_con_id: &ProConId,
    user: &UserId,
) -> Result<Decision, DecisionError> {
    let decision = repo
        .find_by_pro_con(pro_con_id)
        .await?
        .ok_or_else(DecisionError::pro_con_not_found)?;
    authorize(decision, user, false).map_err(|_| DecisionError::pro_con_not_found())
}

/// A decision may only point at a category its owner can see.
pub(super) async fn ensure_category_visible(
    categories: &dyn CategoryRepository,
    id: &CategoryId,
    user: &UserId,
) -> Result<(), DecisionError> {
    let visible = categories
        .find_by_id(id)
        .await?
        .is_some_and(|c| c.is_visible_to(user));
    if !visible {
        return Err(DecisionError::validation("category_id", "Category not found"));
    }
    Ok(())
}

fn authorize(
    decision: Decision,
    user: &UserId,
    include_trashed: bool,
) -> Result<Decision, DecisionError> {
    if decision.user_id() != user {
        warn!(
            user_id = %user,
            decision_id = %decision.id(),
            "Rejected access to another user's decision"
        );
    }
    decision.check_access(user, include_trashed)?;
    Ok(decision)
}
