//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to storage:
//! - `memory` - In-process journal store (tests, embedding)
//! - `postgres` - PostgreSQL repositories and readers

pub mod memory;
pub mod postgres;

pub use memory::InMemoryJournalStore;
pub use postgres::{PostgresCategoryRepository, PostgresDecisionReader, PostgresDecisionRepository};
