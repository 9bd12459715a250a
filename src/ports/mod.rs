//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Decision Ports
//!
//! - `DecisionRepository` - Aggregate persistence, trash, purge, outcome append
//! - `DecisionReader` - Listing, trash browsing, outcome history, stats facts
//!
//! ## Category Ports
//!
//! - `CategoryRepository` - System and per-user custom categories

mod category_repository;
mod decision_reader;
mod decision_repository;

pub use category_repository::CategoryRepository;
pub use decision_reader::{
    title_matches, DecisionFilter, DecisionPage, DecisionReader, DecisionSummary, PageCursor,
    PageRequest, TrashFilter,
};
pub use decision_repository::DecisionRepository;
