//! Decision Journal - lifecycle core for recorded personal decisions.
//!
//! Decisions own their options and pros/cons, move through a small status
//! machine, can be trashed, restored or purged, and collect append-only
//! outcome check-ins that feed per-user statistics. Categories are shared
//! system rows plus per-user custom rows.
//!
//! Layout follows hexagonal architecture: `domain` holds the aggregates,
//! `ports` the storage traits, `adapters` the in-memory and PostgreSQL
//! implementations, and `application` one handler per operation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
