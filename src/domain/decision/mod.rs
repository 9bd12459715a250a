//! Decision domain module.
//!
//! The decision aggregate with its owned options and pros/cons, the input
//! shapes used to create and patch it, and the receipts returned by the
//! trash and purge operations.

mod aggregate;
mod errors;
mod fields;
mod option;
mod receipts;
mod values;

pub use aggregate::{Decision, MAX_ABANDON_NOTE_LENGTH, MAX_TITLE_LENGTH};
pub use errors::{DecisionError, RecordKind};
pub use fields::{DecisionPatch, NewDecision};
pub use option::{
    DecisionOption, NewOption, NewProCon, OptionPatch, ProCon, ProConPatch,
    MAX_OPTION_TITLE_LENGTH, MAX_PRO_CON_LENGTH,
};
pub use receipts::{BulkFailure, BulkResult, PurgeReceipt, SoftDeleteReceipt};
pub use values::{AbandonReason, EmotionalState, ProConKind};
