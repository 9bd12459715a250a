//! Outcome domain module.
//!
//! Append-only check-ins recorded against a decision, and the statistics
//! computed from each decision's latest check-in.

mod record;
mod stats;

pub use record::{NewOutcome, OutcomeRecord, OutcomeResult, RecordedOutcome, MAX_NOTES_LENGTH};
pub use stats::{
    CategoryStats, DecisionStats, EmotionStats, OutcomeFacts, PositionBias, Tally,
    MIN_CHOSEN_FOR_POSITION_BIAS, MIN_DECISIONS_FOR_POSITION_BIAS, MIN_OUTCOMES_FOR_BEST_EMOTION,
    MIN_POSITION_BIAS_PERCENT, UNCATEGORIZED,
};
