//! PostgreSQL implementation of CategoryRepository.
//!
//! Uniqueness per owner is enforced by the `(user_id, slug)` and
//! `(user_id, lower(name))` indexes; violations surface as `Conflict`.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::support::{bounded, column, db_error};
use crate::domain::category::Category;
use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, UserId};
use crate::ports::CategoryRepository;

/// PostgreSQL implementation of CategoryRepository.
#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresCategoryRepository {
    /// Creates a repository whose calls each finish within `timeout`.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

const CATEGORY_COLUMNS: &str =
    "id, user_id, name, slug, icon, color, display_order, is_system";

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list_visible(&self, owner: &UserId) -> Result<Vec<Category>, DomainError> {
        bounded(self.timeout, "list categories", async {
            let sql = format!(
                "SELECT {} FROM categories WHERE user_id IS NULL OR user_id = $1 \
                 ORDER BY display_order, name",
                CATEGORY_COLUMNS
            );
            let rows = sqlx::query(&sql)
                .bind(owner.as_str())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("Failed to list categories", e))?;

            rows.iter().map(row_to_category).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        bounded(self.timeout, "find category", async {
            let sql = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);
            let row = sqlx::query(&sql)
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to fetch category", e))?;

            row.as_ref().map(row_to_category).transpose()
        })
        .await
    }

    async fn next_display_order(&self, owner: &UserId) -> Result<i32, DomainError> {
        bounded(self.timeout, "next category order", async {
            sqlx::query_scalar(
                "SELECT COALESCE(MAX(display_order) + 1, 0) FROM categories WHERE user_id = $1",
            )
            .bind(owner.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to read category order", e))
        })
        .await
    }

    async fn insert(&self, category: &Category) -> Result<(), DomainError> {
        bounded(self.timeout, "insert category", async {
            sqlx::query(
                r#"
                INSERT INTO categories (
                    id, user_id, name, slug, icon, color, display_order, is_system
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(category.id().as_uuid())
            .bind(category.user_id().map(UserId::as_str))
            .bind(category.name())
            .bind(category.slug())
            .bind(category.icon())
            .bind(category.color())
            .bind(category.display_order())
            .bind(category.is_system())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to insert category", e))?;

            Ok(())
        })
        .await
    }

    async fn update(&self, category: &Category) -> Result<(), DomainError> {
        bounded(self.timeout, "update category", async {
            let result = sqlx::query(
                r#"
                UPDATE categories SET
                    name = $2,
                    slug = $3,
                    icon = $4,
                    color = $5
                WHERE id = $1 AND user_id IS NOT NULL
                "#,
            )
            .bind(category.id().as_uuid())
            .bind(category.name())
            .bind(category.slug())
            .bind(category.icon())
            .bind(category.color())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update category", e))?;

            if result.rows_affected() == 0 {
                return Err(category_not_found(category.id()));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, owner: &UserId, id: &CategoryId) -> Result<(), DomainError> {
        bounded(self.timeout, "delete category", async {
            let mut tx = self
                .pool
                .begin()
                .await
                .map_err(|e| db_error("Failed to begin transaction", e))?;

            let owned: Option<Uuid> = sqlx::query_scalar(
                "SELECT id FROM categories WHERE id = $1 AND user_id = $2 FOR UPDATE",
            )
            .bind(id.as_uuid())
            .bind(owner.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to fetch category", e))?;

            if owned.is_none() {
                return Err(category_not_found(id));
            }

            let in_use: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM decisions WHERE category_id = $1)")
                    .bind(id.as_uuid())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| db_error("Failed to check category usage", e))?;

            if in_use {
                return Err(DomainError::validation(
                    "category_id",
                    "Category is still used by decisions",
                ));
            }

            sqlx::query("DELETE FROM categories WHERE id = $1")
                .bind(id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to delete category", e))?;

            tx.commit()
                .await
                .map_err(|e| db_error("Failed to commit transaction", e))?;
            Ok(())
        })
        .await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn category_not_found(id: &CategoryId) -> DomainError {
    DomainError::new(
        ErrorCode::CategoryNotFound,
        format!("Category not found: {}", id),
    )
}

fn row_to_category(row: &PgRow) -> Result<Category, DomainError> {
    let owner = column::<Option<String>>(row, "user_id")?
        .map(UserId::new)
        .transpose()
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        })?;

    Ok(Category::reconstitute(
        CategoryId::from_uuid(column(row, "id")?),
        owner,
        column(row, "name")?,
        column(row, "slug")?,
        column(row, "icon")?,
        column(row, "color")?,
        column(row, "display_order")?,
        column(row, "is_system")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_error_uses_category_code() {
        let err = category_not_found(&CategoryId::new());
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
    }
}
