//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the decision journal.

mod command;
mod decision_status;
mod errors;
mod ids;
mod ownership;
mod percentage;
mod satisfaction;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use decision_status::DecisionStatus;
pub use errors::{bounded_text, DomainError, ErrorCode, ValidationError};
pub use ids::{CategoryId, DecisionId, OptionId, OutcomeId, ProConId, UserId};
pub use ownership::{OwnedByUser, VisibleTo};
pub use percentage::Percentage;
pub use satisfaction::Satisfaction;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
