//! DeleteCategoryHandler - Command handler for removing a custom category.

use std::sync::Arc;

use tracing::info;

use crate::domain::category::CategoryError;
use crate::domain::foundation::{CategoryId, CommandMetadata};
use crate::ports::CategoryRepository;

/// Command to delete one of the caller's categories.
#[derive(Debug, Clone, Copy)]
pub struct DeleteCategoryCommand {
    pub category_id: CategoryId,
}

/// Handler for deleting categories.
pub struct DeleteCategoryHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl DeleteCategoryHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// Fails with `ValidationFailed` while any of the caller's decisions,
    /// trashed ones included, still reference the category.
    pub async fn handle(
        &self,
        cmd: DeleteCategoryCommand,
        metadata: CommandMetadata,
    ) -> Result<(), CategoryError> {
        self.repository
            .delete(&metadata.user_id, &cmd.category_id)
            .await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            category_id = %cmd.category_id,
            "Category deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryJournalStore;
    use crate::application::handlers::test_support::{journal, owner, seed, stranger};
    use crate::domain::category::{Category, NewCategory};
    use crate::domain::decision::NewDecision;
    use crate::domain::foundation::Timestamp;
    use crate::ports::DecisionRepository;

    async fn custom(store: &InMemoryJournalStore) -> Category {
        let category = Category::create(
            CategoryId::new(),
            owner().user_id,
            NewCategory::named("Travel"),
            10,
        )
        .unwrap();
        CategoryRepository::insert(store, &category).await.unwrap();
        category
    }

    #[tokio::test]
    async fn unused_category_is_removed() {
        let store = journal();
        let category = custom(&store).await;

        DeleteCategoryHandler::new(store.clone())
            .handle(
                DeleteCategoryCommand {
                    category_id: *category.id(),
                },
                owner(),
            )
            .await
            .unwrap();

        let found = CategoryRepository::find_by_id(store.as_ref(), category.id())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn category_in_use_by_trashed_decision_is_kept() {
        let store = journal();
        let category = custom(&store).await;
        let decision = seed(
            &store,
            NewDecision::titled("Trip?").with_category(*category.id()),
        )
        .await;
        store
            .soft_delete(&owner().user_id, decision.id(), Timestamp::now())
            .await
            .unwrap();

        let err = DeleteCategoryHandler::new(store.clone())
            .handle(
                DeleteCategoryCommand {
                    category_id: *category.id(),
                },
                owner(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("category_id"));
    }

    #[tokio::test]
    async fn foreign_and_system_rows_are_not_found() {
        let store = journal();
        let category = custom(&store).await;
        let system = store.list_visible(&owner().user_id).await.unwrap()[0].clone();
        let handler = DeleteCategoryHandler::new(store.clone());

        let foreign = handler
            .handle(
                DeleteCategoryCommand {
                    category_id: *category.id(),
                },
                stranger(),
            )
            .await
            .unwrap_err();
        let on_system = handler
            .handle(
                DeleteCategoryCommand {
                    category_id: *system.id(),
                },
                owner(),
            )
            .await
            .unwrap_err();

        assert_eq!(foreign, CategoryError::NotFound);
        assert_eq!(on_system, CategoryError::NotFound);
    }
}
