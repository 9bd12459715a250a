//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresDecisionRepository` - Decision aggregates, trash, purge, outcome append
//! - `PostgresDecisionReader` - Read-optimized listings and statistics facts
//! - `PostgresCategoryRepository` - System and custom categories
//!
//! Every call is bounded by the configured operation timeout.

mod category_repository;
mod decision_reader;
mod decision_repository;
mod support;

pub use category_repository::PostgresCategoryRepository;
pub use decision_reader::PostgresDecisionReader;
pub use decision_repository::PostgresDecisionRepository;
