//! ListCategoriesHandler - Query handler for the categories a user can pick.

use std::sync::Arc;

use tracing::debug;

use crate::domain::category::{Category, CategoryError};
use crate::domain::foundation::CommandMetadata;
use crate::ports::CategoryRepository;

/// Handler listing system categories plus the caller's own.
pub struct ListCategoriesHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl ListCategoriesHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, metadata: CommandMetadata) -> Result<Vec<Category>, CategoryError> {
        let categories = self.repository.list_visible(&metadata.user_id).await?;
        debug!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            count = categories.len(),
            "Listed categories"
        );
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{journal, owner, stranger};
    use crate::domain::category::{NewCategory, SYSTEM_CATEGORIES};
    use crate::domain::foundation::CategoryId;

    #[tokio::test]
    async fn system_rows_come_first_then_own_rows() {
        let store = journal();
        let mine = Category::create(
            CategoryId::new(),
            owner().user_id,
            NewCategory::named("Hobbies"),
            SYSTEM_CATEGORIES.len() as i32,
        )
        .unwrap();
        let theirs = Category::create(
            CategoryId::new(),
            stranger().user_id,
            NewCategory::named("Secret"),
            SYSTEM_CATEGORIES.len() as i32,
        )
        .unwrap();
        store.insert(&mine).await.unwrap();
        store.insert(&theirs).await.unwrap();

        let listed = ListCategoriesHandler::new(store.clone())
            .handle(owner())
            .await
            .unwrap();

        assert_eq!(listed.len(), SYSTEM_CATEGORIES.len() + 1);
        assert_eq!(listed[0].name(), "Career");
        assert_eq!(listed.last().unwrap(), &mine);
        assert!(listed.iter().all(|c| c.name() != "Secret"));
    }
}
