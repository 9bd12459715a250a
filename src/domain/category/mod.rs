//! Category domain module.
//!
//! System categories shared by all users plus per-user custom categories.

mod aggregate;
mod errors;

pub use aggregate::{
    derive_slug, Category, CategoryPatch, NewCategory, DEFAULT_COLOR, MAX_ICON_LENGTH,
    MAX_NAME_LENGTH, MAX_SLUG_LENGTH, SYSTEM_CATEGORIES,
};
pub use errors::CategoryError;
