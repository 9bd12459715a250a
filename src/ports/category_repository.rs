//! Category repository port.
//!
//! System categories are stored with no owner and are never written through
//! this port after seeding.

use crate::domain::category::Category;
use crate::domain::foundation::{CategoryId, DomainError, UserId};
use async_trait::async_trait;

/// Repository port for system and custom categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// System categories plus the owner's own, ordered by display order,
    /// then name.
    async fn list_visible(&self, owner: &UserId) -> Result<Vec<Category>, DomainError>;

    /// Find a category by ID regardless of owner.
    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError>;

    /// Display order for the owner's next custom category (max + 1, or 0).
    async fn next_display_order(&self, owner: &UserId) -> Result<i32, DomainError>;

    /// Save a new custom category.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the owner already has the slug or name (case-insensitive)
    async fn insert(&self, category: &Category) -> Result<(), DomainError>;

    /// Update a custom category.
    ///
    /// # Errors
    ///
    /// - `CategoryNotFound` if it no longer exists
    /// - `Conflict` if the new slug or name is taken by another of the
    ///   owner's categories
    async fn update(&self, category: &Category) -> Result<(), DomainError>;

    /// Delete one of the owner's custom categories.
    ///
    /// # Errors
    ///
    /// - `CategoryNotFound` for system rows, foreign rows and absent rows
    /// - `ValidationFailed` while any decision, live or trashed, uses it
    async fn delete(&self, owner: &UserId, id: &CategoryId) -> Result<(), DomainError>;
}
