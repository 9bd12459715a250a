//! Outcome command and query handlers.

mod compute_stats;
mod list_outcomes;
mod record_outcome;

pub use compute_stats::ComputeStatsHandler;
pub use list_outcomes::{ListOutcomesHandler, ListOutcomesQuery};
pub use record_outcome::{RecordOutcomeCommand, RecordOutcomeHandler};
