//! UpdateCategoryHandler - Command handler for editing a custom category.

use std::sync::Arc;

use tracing::info;

use crate::domain::category::{Category, CategoryError, CategoryPatch};
use crate::domain::foundation::{CategoryId, CommandMetadata, VisibleTo};
use crate::ports::CategoryRepository;

/// Command to rename or restyle one of the caller's categories.
#[derive(Debug, Clone)]
pub struct UpdateCategoryCommand {
    pub category_id: CategoryId,
    pub patch: CategoryPatch,
}

/// Handler for updating categories.
pub struct UpdateCategoryHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl UpdateCategoryHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateCategoryCommand,
        metadata: CommandMetadata,
    ) -> Result<Category, CategoryError> {
        // 1. Load; system and foreign rows read as missing
        let mut category = self
            .repository
            .find_by_id(&cmd.category_id)
            .await?
            .filter(|c| c.is_editable_by(&metadata.user_id))
            .ok_or(CategoryError::NotFound)?;

        // 2. Apply
        category.apply_patch(cmd.patch)?;

        // 3. Persist
        self.repository.update(&category).await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            category_id = %category.id(),
            "Category updated"
        );
        Ok(category)
    }
}
