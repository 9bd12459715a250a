//! Outcome check-ins appended to a decision.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    DecisionId, DecisionStatus, OutcomeId, Satisfaction, Timestamp, ValidationError,
};

/// Maximum length for outcome notes.
pub const MAX_NOTES_LENGTH: usize = 2000;

/// How a decision turned out compared with expectations.
///
/// Older clients sent `positive`/`success`, `neutral`/`mixed` and
/// `negative`/`failure`; those spellings are still accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeResult {
    #[serde(alias = "positive", alias = "success")]
    Better,
    #[serde(alias = "neutral", alias = "mixed")]
    AsExpected,
    #[serde(alias = "negative", alias = "failure")]
    Worse,
}

impl OutcomeResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeResult::Better => "better",
            OutcomeResult::AsExpected => "as_expected",
            OutcomeResult::Worse => "worse",
        }
    }

    /// Every spelling storage may hold for this result, canonical first.
    pub fn stored_values(&self) -> &'static [&'static str] {
        match self {
            OutcomeResult::Better => &["better", "positive", "success"],
            OutcomeResult::AsExpected => &["as_expected", "neutral", "mixed"],
            OutcomeResult::Worse => &["worse", "negative", "failure"],
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, OutcomeResult::Better)
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, OutcomeResult::Worse)
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self, OutcomeResult::AsExpected)
    }
}

impl fmt::Display for OutcomeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutcomeResult {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "better" | "positive" | "success" => Ok(OutcomeResult::Better),
            "as_expected" | "neutral" | "mixed" => Ok(OutcomeResult::AsExpected),
            "worse" | "negative" | "failure" => Ok(OutcomeResult::Worse),
            other => Err(ValidationError::invalid_format(
                "result",
                format!("unknown outcome '{}'", other),
            )),
        }
    }
}

/// Validated input for a new check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOutcome {
    pub result: OutcomeResult,
    pub satisfaction: Option<Satisfaction>,
    pub notes: Option<String>,
    pub recorded_at: Timestamp,
}

impl NewOutcome {
    /// Validates raw input. Satisfaction, when present, must be 1-5.
    pub fn new(
        result: OutcomeResult,
        satisfaction: Option<i32>,
        notes: Option<String>,
        recorded_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let satisfaction = satisfaction.map(Satisfaction::try_from_i32).transpose()?;
        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if let Some(notes) = &notes {
            let len = notes.chars().count();
            if len > MAX_NOTES_LENGTH {
                return Err(ValidationError::too_long("notes", MAX_NOTES_LENGTH, len));
            }
        }
        Ok(Self {
            result,
            satisfaction,
            notes,
            recorded_at,
        })
    }

    /// Builds the stored record following the previous highest check-in.
    pub fn into_record(
        self,
        id: OutcomeId,
        decision_id: DecisionId,
        previous_check_in: Option<i32>,
    ) -> OutcomeRecord {
        OutcomeRecord {
            id,
            decision_id,
            result: self.result,
            satisfaction: self.satisfaction,
            notes: self.notes,
            recorded_at: self.recorded_at,
            check_in_number: previous_check_in.map_or(1, |n| n + 1),
        }
    }
}

/// One appended outcome check-in. Never overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub id: OutcomeId,
    pub decision_id: DecisionId,
    pub result: OutcomeResult,
    pub satisfaction: Option<Satisfaction>,
    pub notes: Option<String>,
    pub recorded_at: Timestamp,
    /// 1 for the first check-in on a decision, then increasing by one.
    pub check_in_number: i32,
}

/// A stored check-in together with the decision's resulting status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedOutcome {
    pub outcome: OutcomeRecord,
    pub decision_status: DecisionStatus,
}
