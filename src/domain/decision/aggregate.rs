//! Decision aggregate entity.
//!
//! A decision is the aggregate root of the journal. It exclusively owns its
//! options, and each option exclusively owns its pros/cons. Outcomes are
//! appended alongside the decision but are not held in memory with it.
//!
//! # Deletion
//!
//! Soft-deleting only stamps `deleted_at`; the children stay untouched so
//! a restore brings back the identical record. Only a purge removes the
//! children, and that happens in the storage adapter.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::option::normalize_optional;
use super::{
    AbandonReason, DecisionOption, DecisionPatch, EmotionalState, NewDecision, NewOption,
    NewProCon, OptionPatch, ProCon, ProConPatch,
};
use crate::domain::foundation::{
    bounded_text, CategoryId, DecisionId, DecisionStatus, DomainError, ErrorCode, OptionId,
    OwnedByUser, ProConId, StateMachine, Timestamp, UserId, ValidationError,
};

/// Maximum length for a decision title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for the note attached to an abandonment.
pub const MAX_ABANDON_NOTE_LENGTH: usize = 500;

/// Decision aggregate - one journaled decision with its options.
///
/// # Invariants
///
/// - `title` is 1-200 characters after trimming
/// - `chosen_option_id`, when set, names one of `options` and the status is
///   `decided` or `reviewed`; exactly that option has `is_chosen`
/// - `abandon_reason`/`abandon_note` are set only while `abandoned`
/// - `decided_at` is written once
/// - `updated_at` strictly increases with every content mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    id: DecisionId,
    user_id: UserId,
    title: String,
    description: Option<String>,
    status: DecisionStatus,
    category_id: Option<CategoryId>,
    chosen_option_id: Option<OptionId>,
    emotional_state: Option<EmotionalState>,
    abandon_reason: Option<AbandonReason>,
    abandon_note: Option<String>,
    options: Vec<DecisionOption>,
    created_at: Timestamp,
    updated_at: Timestamp,
    decided_at: Option<Timestamp>,
    deleted_at: Option<Timestamp>,
}

impl Decision {
    /// Create a new decision, optionally with options and pros/cons.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if any field is invalid or the initial status is
    ///   not one of draft, deliberating or decided
    pub fn create(
        id: DecisionId,
        user_id: UserId,
        fields: NewDecision,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        let title = validate_title(&fields.title)?;
        let status = fields.status.unwrap_or_default();
        if !status.is_valid_initial() {
            return Err(DomainError::validation(
                "status",
                format!("A decision cannot start as {}", status),
            ));
        }

        let options = fields
            .options
            .into_iter()
            .enumerate()
            .map(|(order, option)| option.build(order as i32, now))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            user_id,
            title,
            description: normalize_optional(fields.description),
            status,
            category_id: fields.category_id,
            chosen_option_id: None,
            emotional_state: fields.emotional_state,
            abandon_reason: None,
            abandon_note: None,
            options,
            created_at: now,
            updated_at: now,
            decided_at: (status == DecisionStatus::Decided).then_some(now),
            deleted_at: None,
        })
    }

    /// Reconstitute a decision from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: DecisionId,
        user_id: UserId,
        title: String,
        description: Option<String>,
        status: DecisionStatus,
        category_id: Option<CategoryId>,
        chosen_option_id: Option<OptionId>,
        emotional_state: Option<EmotionalState>,
        abandon_reason: Option<AbandonReason>,
        abandon_note: Option<String>,
        mut options: Vec<DecisionOption>,
        created_at: Timestamp,
        updated_at: Timestamp,
        decided_at: Option<Timestamp>,
        deleted_at: Option<Timestamp>,
    ) -> Self {
        options.sort_by_key(|o| o.display_order);
        Self {
            id,
            user_id,
            title,
            description,
            status,
            category_id,
            chosen_option_id,
            emotional_state,
            abandon_reason,
            abandon_note,
            options,
            created_at,
            updated_at,
            decided_at,
            deleted_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &DecisionId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> DecisionStatus {
        self.status
    }

    pub fn category_id(&self) -> Option<&CategoryId> {
        self.category_id.as_ref()
    }

    pub fn chosen_option_id(&self) -> Option<&OptionId> {
        self.chosen_option_id.as_ref()
    }

    pub fn emotional_state(&self) -> Option<EmotionalState> {
        self.emotional_state
    }

    pub fn abandon_reason(&self) -> Option<AbandonReason> {
        self.abandon_reason
    }

    pub fn abandon_note(&self) -> Option<&str> {
        self.abandon_note.as_deref()
    }

    /// Options in display order.
    pub fn options(&self) -> &[DecisionOption] {
        &self.options
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn decided_at(&self) -> Option<&Timestamp> {
        self.decided_at.as_ref()
    }

    pub fn deleted_at(&self) -> Option<&Timestamp> {
        self.deleted_at.as_ref()
    }

    /// Returns true while the decision sits in the trash.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn option(&self, id: &OptionId) -> Option<&DecisionOption> {
        self.options.iter().find(|o| &o.id == id)
    }

    pub fn has_option(&self, id: &OptionId) -> bool {
        self.option(id).is_some()
    }

    pub fn pro_con(&self, id: &ProConId) -> Option<&ProCon> {
        self.options
            .iter()
            .flat_map(|o| o.pros_cons.iter())
            .find(|pc| &pc.id == id)
    }

    /// Total number of pros/cons across all options.
    pub fn pro_con_count(&self) -> usize {
        self.options.iter().map(|o| o.pros_cons.len()).sum()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates that `user_id` may see this decision.
    ///
    /// Foreign decisions, and trashed ones unless `include_trashed`, are
    /// reported as `DecisionNotFound`.
    pub fn check_access(&self, user_id: &UserId, include_trashed: bool) -> Result<(), DomainError> {
        self.check_ownership(user_id)?;
        if self.is_deleted() && !include_trashed {
            return Err(DomainError::new(
                ErrorCode::DecisionNotFound,
                "Record not found",
            ));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Decision mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a partial update.
    ///
    /// Every field is validated against the current state before anything
    /// is written, so a rejected patch leaves the decision untouched.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for an empty patch, invalid field, disallowed
    ///   status transition, a chosen option outside this decision, a chosen
    ///   option on an undecided decision, or abandon details on a decision
    ///   that is not abandoned
    pub fn apply_patch(&mut self, patch: DecisionPatch, now: Timestamp) -> Result<(), DomainError> {
        if patch.is_empty() {
            return Err(DomainError::validation("patch", "No fields to update"));
        }

        // 1. Validate
        let title = patch.title.as_deref().map(validate_title).transpose()?;
        let status = match patch.status {
            Some(target) => self.status.transition_to(target)?,
            None => self.status,
        };

        let chosen = patch.chosen_option_id.unwrap_or(self.chosen_option_id);
        if let Some(option_id) = &chosen {
            if !self.has_option(option_id) {
                return Err(DomainError::validation(
                    "chosen_option_id",
                    "Chosen option does not belong to this decision",
                ));
            }
            if !status.has_choice() {
                return Err(DomainError::validation(
                    "chosen_option_id",
                    "An option can only be chosen once the decision is decided",
                ));
            }
        }

        let (abandon_reason, abandon_note) = if status == DecisionStatus::Abandoned {
            let reason = patch
                .abandon_reason
                .or(self.abandon_reason)
                .ok_or_else(|| {
                    DomainError::validation(
                        "abandon_reason",
                        "A reason is required to abandon a decision",
                    )
                })?;
            let note = match patch.abandon_note {
                Some(note) => validate_abandon_note(note)?,
                None => self.abandon_note.clone(),
            };
            (Some(reason), note)
        } else {
            if patch.abandon_reason.is_some() || matches!(patch.abandon_note, Some(Some(_))) {
                return Err(DomainError::validation(
                    "abandon_reason",
                    "Only abandoned decisions carry an abandon reason",
                ));
            }
            (None, None)
        };

        // 2. Apply
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = normalize_optional(description);
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(emotional_state) = patch.emotional_state {
            self.emotional_state = emotional_state;
        }
        if status == DecisionStatus::Decided && self.decided_at.is_none() {
            self.decided_at = Some(now);
        }
        self.status = status;
        self.abandon_reason = abandon_reason;
        self.abandon_note = abandon_note;
        self.set_chosen(chosen);
        self.touch(now);
        Ok(())
    }

    /// Abandon the decision, recording why.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the decision is draft or deliberating
    /// - `ValidationFailed` if the note is too long
    pub fn abandon(
        &mut self,
        reason: AbandonReason,
        note: Option<String>,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&DecisionStatus::Abandoned) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot abandon a {} decision", self.status),
            )
            .with_detail("field", "status"));
        }
        let note = validate_abandon_note(note)?;

        self.status = DecisionStatus::Abandoned;
        self.abandon_reason = Some(reason);
        self.abandon_note = note;
        self.touch(now);
        Ok(())
    }

    /// Moves the decision to the trash. Returns true if it already was there.
    ///
    /// Only `deleted_at` changes.
    pub fn soft_delete(&mut self, now: Timestamp) -> bool {
        if self.is_deleted() {
            return true;
        }
        self.deleted_at = Some(now);
        false
    }

    /// Takes the decision out of the trash. Returns true if it was there.
    pub fn restore(&mut self) -> bool {
        self.deleted_at.take().is_some()
    }

    /// Applies the status effect of a new outcome check-in and returns the
    /// resulting status.
    pub fn note_outcome_recorded(&mut self, now: Timestamp) -> DecisionStatus {
        self.status = self.status.after_outcome();
        self.touch(now);
        self.status
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Option mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends an option after the current last one.
    pub fn add_option(&mut self, fields: NewOption, now: Timestamp) -> Result<OptionId, DomainError> {
        let order = self
            .options
            .iter()
            .map(|o| o.display_order)
            .max()
            .map_or(0, |max| max + 1);
        let option = fields.build(order, now)?;
        let id = option.id;

        self.options.push(option);
        self.touch(now);
        Ok(id)
    }

    /// Changes an option's title or description.
    pub fn update_option(
        &mut self,
        option_id: &OptionId,
        patch: OptionPatch,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        if patch.is_empty() {
            return Err(DomainError::validation("patch", "No fields to update"));
        }
        let title = patch
            .title
            .as_deref()
            .map(|t| bounded_text("title", t, super::MAX_OPTION_TITLE_LENGTH))
            .transpose()?;
        let option = self
            .options
            .iter_mut()
            .find(|o| &o.id == option_id)
            .ok_or_else(option_not_found)?;

        if let Some(title) = title {
            option.title = title;
        }
        if let Some(description) = patch.description {
            option.description = normalize_optional(description);
        }
        self.touch(now);
        Ok(())
    }

    /// Removes an option together with its pros/cons.
    ///
    /// # Errors
    ///
    /// - `OptionNotFound` if the option is not part of this decision
    /// - `ValidationFailed` if it is the chosen option
    pub fn remove_option(
        &mut self,
        option_id: &OptionId,
        now: Timestamp,
    ) -> Result<DecisionOption, DomainError> {
        let index = self
            .options
            .iter()
            .position(|o| &o.id == option_id)
            .ok_or_else(option_not_found)?;
        if self.chosen_option_id.as_ref() == Some(option_id) {
            return Err(DomainError::validation(
                "option_id",
                "Cannot remove the chosen option",
            ));
        }

        let removed = self.options.remove(index);
        self.touch(now);
        Ok(removed)
    }

    /// Reassigns display order 0..n-1 following `ordered`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` unless `ordered` lists every option exactly once
    pub fn reorder_options(&mut self, ordered: &[OptionId], now: Timestamp) -> Result<(), DomainError> {
        let given: HashSet<&OptionId> = ordered.iter().collect();
        if given.len() != ordered.len() {
            return Err(DomainError::validation(
                "option_ids",
                "Option ids must not repeat",
            ));
        }
        let current: HashSet<&OptionId> = self.options.iter().map(|o| &o.id).collect();
        if given != current {
            return Err(DomainError::validation(
                "option_ids",
                "Option ids must match the decision's options exactly",
            ));
        }

        for (position, id) in ordered.iter().enumerate() {
            if let Some(option) = self.options.iter_mut().find(|o| &o.id == id) {
                option.display_order = position as i32;
            }
        }
        self.options.sort_by_key(|o| o.display_order);
        self.touch(now);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pro/con mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends a pro/con to an option.
    pub fn add_pro_con(
        &mut self,
        option_id: &OptionId,
        fields: NewProCon,
        now: Timestamp,
    ) -> Result<ProConId, DomainError> {
        let option = self
            .options
            .iter_mut()
            .find(|o| &o.id == option_id)
            .ok_or_else(option_not_found)?;
        let pro_con = fields.build(option.id, option.next_pro_con_order(), now)?;
        let id = pro_con.id;

        option.pros_cons.push(pro_con);
        self.touch(now);
        Ok(id)
    }

    /// Changes a pro/con, optionally moving it to another option of this
    /// decision (appended after that option's last entry).
    pub fn update_pro_con(
        &mut self,
        pro_con_id: &ProConId,
        patch: ProConPatch,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        if patch.is_empty() {
            return Err(DomainError::validation("patch", "No fields to update"));
        }
        let (source, index) = self.locate_pro_con(pro_con_id)?;
        let content = patch
            .content
            .as_deref()
            .map(|c| bounded_text("content", c, super::MAX_PRO_CON_LENGTH))
            .transpose()?;
        let target = match patch.option_id {
            Some(target_id) if target_id != self.options[source].id => Some(
                self.options
                    .iter()
                    .position(|o| o.id == target_id)
                    .ok_or_else(|| {
                        DomainError::validation(
                            "option_id",
                            "Target option does not belong to this decision",
                        )
                    })?,
            ),
            _ => None,
        };

        let mut pro_con = self.options[source].pros_cons.remove(index);
        if let Some(kind) = patch.kind {
            pro_con.kind = kind;
        }
        if let Some(content) = content {
            pro_con.content = content;
        }
        match target {
            Some(target) => {
                let option = &mut self.options[target];
                pro_con.option_id = option.id;
                pro_con.display_order = option.next_pro_con_order();
                option.pros_cons.push(pro_con);
            }
            None => self.options[source].pros_cons.insert(index, pro_con),
        }
        self.touch(now);
        Ok(())
    }

    /// Removes a single pro/con.
    pub fn remove_pro_con(
        &mut self,
        pro_con_id: &ProConId,
        now: Timestamp,
    ) -> Result<ProCon, DomainError> {
        let (option, index) = self.locate_pro_con(pro_con_id)?;
        let removed = self.options[option].pros_cons.remove(index);
        self.touch(now);
        Ok(removed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn locate_pro_con(&self, pro_con_id: &ProConId) -> Result<(usize, usize), DomainError> {
        self.options
            .iter()
            .enumerate()
            .find_map(|(oi, option)| {
                option
                    .pros_cons
                    .iter()
                    .position(|pc| &pc.id == pro_con_id)
                    .map(|pi| (oi, pi))
            })
            .ok_or_else(|| DomainError::new(ErrorCode::ProConNotFound, "Record not found"))
    }

    fn set_chosen(&mut self, chosen: Option<OptionId>) {
        self.chosen_option_id = chosen;
        for option in &mut self.options {
            option.is_chosen = Some(option.id) == chosen;
        }
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = now.advanced_past(&self.updated_at);
    }
}

impl OwnedByUser for Decision {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }

    fn not_found_code() -> ErrorCode {
        ErrorCode::DecisionNotFound
    }
}

fn validate_title(title: &str) -> Result<String, ValidationError> {
    bounded_text("title", title, MAX_TITLE_LENGTH)
}

fn validate_abandon_note(note: Option<String>) -> Result<Option<String>, ValidationError> {
    match normalize_optional(note) {
        Some(note) => {
            let len = note.chars().count();
            if len > MAX_ABANDON_NOTE_LENGTH {
                return Err(ValidationError::too_long(
                    "abandon_note",
                    MAX_ABANDON_NOTE_LENGTH,
                    len,
                ));
            }
            Ok(Some(note))
        }
        None => Ok(None),
    }
}

fn option_not_found() -> DomainError {
    DomainError::new(ErrorCode::OptionNotFound, "Record not found")
}
