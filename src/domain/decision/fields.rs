//! Input shapes for creating and patching decisions.

use serde::{Deserialize, Serialize};

use super::{AbandonReason, EmotionalState, NewOption};
use crate::domain::foundation::{CategoryId, DecisionStatus, OptionId};

/// Fields for a new decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDecision {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to `draft`.
    #[serde(default)]
    pub status: Option<DecisionStatus>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub emotional_state: Option<EmotionalState>,
    /// Options created together with the decision, in display order.
    #[serde(default)]
    pub options: Vec<NewOption>,
}

impl NewDecision {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: DecisionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_option(mut self, option: NewOption) -> Self {
        self.options.push(option);
        self
    }
}

/// Partial update for a decision.
///
/// Outer `None` leaves a field unchanged; for nullable fields `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub category_id: Option<Option<CategoryId>>,
    pub emotional_state: Option<Option<EmotionalState>>,
    pub status: Option<DecisionStatus>,
    pub chosen_option_id: Option<Option<OptionId>>,
    pub abandon_reason: Option<AbandonReason>,
    pub abandon_note: Option<Option<String>>,
}

impl DecisionPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.emotional_state.is_none()
            && self.status.is_none()
            && self.chosen_option_id.is_none()
            && self.abandon_reason.is_none()
            && self.abandon_note.is_none()
    }

    /// Patch that marks the decision decided with the given choice.
    pub fn decide(option_id: OptionId) -> Self {
        Self {
            status: Some(DecisionStatus::Decided),
            chosen_option_id: Some(Some(option_id)),
            ..Self::default()
        }
    }

    /// The category the patch assigns, if it assigns one.
    pub fn assigned_category(&self) -> Option<&CategoryId> {
        match &self.category_id {
            Some(Some(id)) => Some(id),
            _ => None,
        }
    }
}
