//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `decision` - Decision aggregate with its options and pros/cons
//! - `outcome` - Outcome check-ins and statistics
//! - `category` - System and per-user categories

pub mod category;
pub mod decision;
pub mod foundation;
pub mod outcome;
