//! In-memory adapters.
//!
//! A single store implements every persistence port so that handlers built
//! over it share one consistent view of the journal.

mod category_repository;
mod decision_reader;
mod decision_repository;
mod store;

pub use store::InMemoryJournalStore;
