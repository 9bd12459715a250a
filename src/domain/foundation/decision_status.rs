//! DecisionStatus enum for tracking the lifecycle of a decision record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Lifecycle status of a decision.
///
/// ```text
/// draft ──► deliberating ──► decided ──► reviewed
///   │            │
///   │            └──► abandoned
///   ├──► decided
///   └──► abandoned
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    #[default]
    Draft,
    #[serde(alias = "in_progress")]
    Deliberating,
    Decided,
    Abandoned,
    Reviewed,
}

impl DecisionStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [DecisionStatus; 5] = [
        DecisionStatus::Draft,
        DecisionStatus::Deliberating,
        DecisionStatus::Decided,
        DecisionStatus::Abandoned,
        DecisionStatus::Reviewed,
    ];

    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Draft => "draft",
            DecisionStatus::Deliberating => "deliberating",
            DecisionStatus::Decided => "decided",
            DecisionStatus::Abandoned => "abandoned",
            DecisionStatus::Reviewed => "reviewed",
        }
    }

    /// Every spelling storage may hold for this status, canonical first.
    ///
    /// Rows written before the rename still carry `in_progress`.
    pub fn stored_values(&self) -> &'static [&'static str] {
        match self {
            DecisionStatus::Draft => &["draft"],
            DecisionStatus::Deliberating => &["deliberating", "in_progress"],
            DecisionStatus::Decided => &["decided"],
            DecisionStatus::Abandoned => &["abandoned"],
            DecisionStatus::Reviewed => &["reviewed"],
        }
    }

    /// Statuses a new decision may start in.
    pub fn is_valid_initial(&self) -> bool {
        matches!(
            self,
            DecisionStatus::Draft | DecisionStatus::Deliberating | DecisionStatus::Decided
        )
    }

    /// True once an option may be (or has been) committed to.
    pub fn has_choice(&self) -> bool {
        matches!(self, DecisionStatus::Decided | DecisionStatus::Reviewed)
    }

    /// Status after an outcome check-in is recorded.
    ///
    /// A decided decision becomes reviewed; every other status is kept.
    pub fn after_outcome(&self) -> Self {
        match self {
            DecisionStatus::Decided => DecisionStatus::Reviewed,
            other => *other,
        }
    }
}

impl StateMachine for DecisionStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use DecisionStatus::*;
        match self {
            Draft => vec![Deliberating, Decided, Abandoned],
            Deliberating => vec![Decided, Abandoned],
            Decided => vec![Reviewed],
            Abandoned => vec![],
            Reviewed => vec![],
        }
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DecisionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(DecisionStatus::Draft),
            "deliberating" | "in_progress" => Ok(DecisionStatus::Deliberating),
            "decided" => Ok(DecisionStatus::Decided),
            "abandoned" => Ok(DecisionStatus::Abandoned),
            "reviewed" => Ok(DecisionStatus::Reviewed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values_parse_back_to_the_status() {
        for status in DecisionStatus::ALL {
            let values = status.stored_values();
            assert_eq!(values[0], status.as_str());
            assert!(values.iter().all(|v| v.parse::<DecisionStatus>().unwrap() == status));
        }
        assert!(DecisionStatus::Deliberating
            .stored_values()
            .contains(&"in_progress"));
    }

    #[test]
    fn default_is_draft() {
        assert_eq!(DecisionStatus::default(), DecisionStatus::Draft);
    }

    #[test]
    fn forward_path_is_allowed() {
        use DecisionStatus::*;
        assert!(Draft.can_transition_to(&Deliberating));
        assert!(Deliberating.can_transition_to(&Decided));
        assert!(Decided.can_transition_to(&Reviewed));
    }

    #[test]
    fn abandon_only_before_deciding() {
        use DecisionStatus::*;
        assert!(Draft.can_transition_to(&Abandoned));
        assert!(Deliberating.can_transition_to(&Abandoned));
        assert!(!Decided.can_transition_to(&Abandoned));
        assert!(!Reviewed.can_transition_to(&Abandoned));
    }

    #[test]
    fn no_going_backwards() {
        use DecisionStatus::*;
        assert!(Decided.transition_to(Draft).is_err());
        assert!(Abandoned.transition_to(Deliberating).is_err());
        assert!(Draft.transition_to(Reviewed).is_err());
    }

    #[test]
    fn abandoned_and_reviewed_are_terminal() {
        assert!(DecisionStatus::Abandoned.is_terminal());
        assert!(DecisionStatus::Reviewed.is_terminal());
        assert!(!DecisionStatus::Decided.is_terminal());
    }

    #[test]
    fn outcome_moves_only_decided_to_reviewed() {
        use DecisionStatus::*;
        assert_eq!(Decided.after_outcome(), Reviewed);
        assert_eq!(Reviewed.after_outcome(), Reviewed);
        assert_eq!(Draft.after_outcome(), Draft);
        assert_eq!(Abandoned.after_outcome(), Abandoned);
    }

    #[test]
    fn parses_storage_strings_and_legacy_alias() {
        for status in DecisionStatus::ALL {
            assert_eq!(status.as_str().parse::<DecisionStatus>().unwrap(), status);
        }
        assert_eq!(
            "in_progress".parse::<DecisionStatus>().unwrap(),
            DecisionStatus::Deliberating
        );
        assert!("archived".parse::<DecisionStatus>().is_err());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&DecisionStatus::Deliberating).unwrap(),
            "\"deliberating\""
        );
        let status: DecisionStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(status, DecisionStatus::Deliberating);
    }
}
