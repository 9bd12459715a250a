//! CreateCategoryHandler - Command handler for adding a custom category.

use std::sync::Arc;

use tracing::info;

use crate::domain::category::{Category, CategoryError, NewCategory};
use crate::domain::foundation::{CategoryId, CommandMetadata};
use crate::ports::CategoryRepository;

/// Command to create a category owned by the caller.
#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub fields: NewCategory,
    /// Defaults to one past the caller's highest display order.
    pub display_order: Option<i32>,
}

/// Handler for creating categories.
pub struct CreateCategoryHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl CreateCategoryHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateCategoryCommand,
        metadata: CommandMetadata,
    ) -> Result<Category, CategoryError> {
        // 1. Pick the display order
        let display_order = match cmd.display_order {
            Some(order) => order,
            None => self.repository.next_display_order(&metadata.user_id).await?,
        };

        // 2. Validate and derive the slug
        let category = Category::create(
            CategoryId::new(),
            metadata.user_id.clone(),
            cmd.fields,
            display_order,
        )?;

        // 3. Persist; a duplicate name or slug for this owner conflicts
        self.repository.insert(&category).await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            category_id = %category.id(),
            slug = category.slug(),
            "Category created"
        );
        Ok(category)
    }
}
