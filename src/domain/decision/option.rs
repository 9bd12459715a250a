//! Options and their pros/cons, owned by a decision.
//!
//! These entities have no lifecycle of their own: they are created, changed
//! and removed only through the owning [`Decision`](super::Decision).

use serde::{Deserialize, Serialize};

use super::ProConKind;
use crate::domain::foundation::{bounded_text, OptionId, ProConId, Timestamp, ValidationError};

/// Maximum length for an option title.
pub const MAX_OPTION_TITLE_LENGTH: usize = 200;

/// Maximum length for a pro/con entry.
pub const MAX_PRO_CON_LENGTH: usize = 500;

/// One alternative under consideration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionOption {
    pub(super) id: OptionId,
    pub(super) title: String,
    pub(super) description: Option<String>,
    pub(super) display_order: i32,
    pub(super) is_chosen: bool,
    pub(super) pros_cons: Vec<ProCon>,
    pub(super) created_at: Timestamp,
}

impl DecisionOption {
    /// Reconstitute an option from persistence (no validation).
    pub fn reconstitute(
        id: OptionId,
        title: String,
        description: Option<String>,
        display_order: i32,
        is_chosen: bool,
        mut pros_cons: Vec<ProCon>,
        created_at: Timestamp,
    ) -> Self {
        pros_cons.sort_by_key(|pc| pc.display_order);
        Self {
            id,
            title,
            description,
            display_order,
            is_chosen,
            pros_cons,
            created_at,
        }
    }

    pub fn id(&self) -> &OptionId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn display_order(&self) -> i32 {
        self.display_order
    }

    pub fn is_chosen(&self) -> bool {
        self.is_chosen
    }

    /// Pros and cons in display order.
    pub fn pros_cons(&self) -> &[ProCon] {
        &self.pros_cons
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub(super) fn next_pro_con_order(&self) -> i32 {
        self.pros_cons
            .iter()
            .map(|pc| pc.display_order)
            .max()
            .map_or(0, |max| max + 1)
    }
}

/// An argument for or against an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProCon {
    pub(super) id: ProConId,
    pub(super) option_id: OptionId,
    pub(super) kind: ProConKind,
    pub(super) content: String,
    pub(super) display_order: i32,
    pub(super) created_at: Timestamp,
}

impl ProCon {
    /// Reconstitute a pro/con from persistence (no validation).
    pub fn reconstitute(
        id: ProConId,
        option_id: OptionId,
        kind: ProConKind,
        content: String,
        display_order: i32,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            option_id,
            kind,
            content,
            display_order,
            created_at,
        }
    }

    pub fn id(&self) -> &ProConId {
        &self.id
    }

    pub fn option_id(&self) -> &OptionId {
        &self.option_id
    }

    pub fn kind(&self) -> ProConKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn display_order(&self) -> i32 {
        self.display_order
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

/// Fields for a new option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOption {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pros_cons: Vec<NewProCon>,
}

impl NewOption {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_pro(mut self, content: impl Into<String>) -> Self {
        self.pros_cons.push(NewProCon::pro(content));
        self
    }

    pub fn with_con(mut self, content: impl Into<String>) -> Self {
        self.pros_cons.push(NewProCon::con(content));
        self
    }

    /// Validates every field and builds the option with its pros/cons.
    pub(super) fn build(
        self,
        display_order: i32,
        now: Timestamp,
    ) -> Result<DecisionOption, ValidationError> {
        let id = OptionId::new();
        let title = bounded_text("title", &self.title, MAX_OPTION_TITLE_LENGTH)?;
        let pros_cons = self
            .pros_cons
            .into_iter()
            .enumerate()
            .map(|(order, pc)| pc.build(id, order as i32, now))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DecisionOption {
            id,
            title,
            description: normalize_optional(self.description),
            display_order,
            is_chosen: false,
            pros_cons,
            created_at: now,
        })
    }
}

/// Fields for a new pro/con.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProCon {
    #[serde(rename = "type")]
    pub kind: ProConKind,
    pub content: String,
}

impl NewProCon {
    pub fn pro(content: impl Into<String>) -> Self {
        Self {
            kind: ProConKind::Pro,
            content: content.into(),
        }
    }

    pub fn con(content: impl Into<String>) -> Self {
        Self {
            kind: ProConKind::Con,
            content: content.into(),
        }
    }

    pub(super) fn build(
        self,
        option_id: OptionId,
        display_order: i32,
        now: Timestamp,
    ) -> Result<ProCon, ValidationError> {
        Ok(ProCon {
            id: ProConId::new(),
            option_id,
            kind: self.kind,
            content: bounded_text("content", &self.content, MAX_PRO_CON_LENGTH)?,
            display_order,
            created_at: now,
        })
    }
}

/// Partial update for an option. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionPatch {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
}

impl OptionPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// Partial update for a pro/con. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProConPatch {
    #[serde(rename = "type")]
    pub kind: Option<ProConKind>,
    pub content: Option<String>,
    /// Moves the entry to another option of the same decision.
    pub option_id: Option<OptionId>,
}

impl ProConPatch {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.content.is_none() && self.option_id.is_none()
    }
}

/// Trims optional free text, mapping blank input to `None`.
pub(super) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_numbers_pros_cons_in_input_order() {
        let option = NewOption::titled("Move to Berlin")
            .with_pro("Better salary")
            .with_con("Far from family")
            .build(0, Timestamp::now())
            .unwrap();

        assert_eq!(option.pros_cons().len(), 2);
        assert_eq!(option.pros_cons()[0].display_order(), 0);
        assert_eq!(option.pros_cons()[1].kind(), ProConKind::Con);
        assert!(option
            .pros_cons()
            .iter()
            .all(|pc| pc.option_id() == option.id()));
    }

    #[test]
    fn build_rejects_overlong_pro_con() {
        let result = NewOption::titled("A")
            .with_pro("x".repeat(MAX_PRO_CON_LENGTH + 1))
            .build(0, Timestamp::now());
        assert_eq!(result.unwrap_err().field(), "content");
    }

    #[test]
    fn build_rejects_blank_title() {
        let result = NewOption::titled("  ").build(0, Timestamp::now());
        assert_eq!(result.unwrap_err().field(), "title");
    }

    #[test]
    fn blank_description_becomes_none() {
        assert_eq!(normalize_optional(Some("   ".to_string())), None);
        assert_eq!(
            normalize_optional(Some(" notes ".to_string())),
            Some("notes".to_string())
        );
    }

    #[test]
    fn next_pro_con_order_starts_at_zero() {
        let option = NewOption::titled("A").build(0, Timestamp::now()).unwrap();
        assert_eq!(option.next_pro_con_order(), 0);
    }
}
