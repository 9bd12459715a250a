//! `CategoryRepository` for the in-memory store.

use async_trait::async_trait;

use super::store::{record_not_found, InMemoryJournalStore};
use crate::domain::category::Category;
use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, UserId, VisibleTo};
use crate::ports::CategoryRepository;

fn name_taken() -> DomainError {
    DomainError::new(
        ErrorCode::Conflict,
        "A category with this name or slug already exists",
    )
}

#[async_trait]
impl CategoryRepository for InMemoryJournalStore {
    async fn list_visible(&self, owner: &UserId) -> Result<Vec<Category>, DomainError> {
        let state = self.state.read().await;
        let mut visible: Vec<Category> = state
            .categories
            .values()
            .filter(|c| c.is_visible_to(owner))
            .cloned()
            .collect();
        visible.sort_by(|a, b| {
            a.display_order()
                .cmp(&b.display_order())
                .then_with(|| a.name().cmp(b.name()))
        });
        Ok(visible)
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        Ok(self.state.read().await.categories.get(id).cloned())
    }

    async fn next_display_order(&self, owner: &UserId) -> Result<i32, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .values()
            .filter(|c| c.user_id() == Some(owner))
            .map(Category::display_order)
            .max()
            .map_or(0, |max| max + 1))
    }

    async fn insert(&self, category: &Category) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.categories.values().any(|c| c.collides_with(category)) {
            return Err(name_taken());
        }
        state.categories.insert(*category.id(), category.clone());
        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.categories.contains_key(category.id()) {
            return Err(record_not_found(ErrorCode::CategoryNotFound));
        }
        if state.categories.values().any(|c| c.collides_with(category)) {
            return Err(name_taken());
        }
        state.categories.insert(*category.id(), category.clone());
        Ok(())
    }

    async fn delete(&self, owner: &UserId, id: &CategoryId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state
            .categories
            .get(id)
            .is_some_and(|c| c.is_editable_by(owner))
        {
            return Err(record_not_found(ErrorCode::CategoryNotFound));
        }
        if state.decisions.values().any(|d| d.category_id() == Some(id)) {
            return Err(DomainError::validation(
                "category_id",
                "Category is still used by decisions",
            ));
        }
        state.categories.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::{NewCategory, SYSTEM_CATEGORIES};
    use crate::domain::decision::{Decision, NewDecision};
    use crate::domain::foundation::{DecisionId, Timestamp};
    use crate::ports::DecisionRepository;

    fn owner() -> UserId {
        UserId::new("owner").unwrap()
    }

    async fn custom(store: &InMemoryJournalStore, user: &UserId, name: &str) -> Category {
        let order = store.next_display_order(user).await.unwrap();
        let category =
            Category::create(CategoryId::new(), user.clone(), NewCategory::named(name), order)
                .unwrap();
        CategoryRepository::insert(store, &category).await.unwrap();
        category
    }

    #[tokio::test]
    async fn visible_set_is_system_plus_own() {
        let store = InMemoryJournalStore::with_system_categories();
        custom(&store, &owner(), "Hobbies").await;
        custom(&store, &UserId::new("other").unwrap(), "Secret").await;

        let visible = store.list_visible(&owner()).await.unwrap();

        assert_eq!(visible.len(), SYSTEM_CATEGORIES.len() + 1);
        assert!(visible.iter().any(|c| c.name() == "Hobbies"));
        assert!(visible.iter().all(|c| c.name() != "Secret"));
    }

    #[tokio::test]
    async fn duplicate_name_for_same_owner_conflicts() {
        let store = InMemoryJournalStore::new();
        custom(&store, &owner(), "Hobbies").await;
        let twin = Category::create(
            CategoryId::new(),
            owner(),
            NewCategory::named("hobbies"),
            5,
        )
        .unwrap();

        let err = CategoryRepository::insert(&store, &twin).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);

        // Another owner may reuse the name.
        custom(&store, &UserId::new("other").unwrap(), "Hobbies").await;
    }

    #[tokio::test]
    async fn display_order_counts_up_per_owner() {
        let store = InMemoryJournalStore::new();
        assert_eq!(store.next_display_order(&owner()).await.unwrap(), 0);
        custom(&store, &owner(), "One").await;
        assert_eq!(store.next_display_order(&owner()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn system_category_cannot_be_deleted() {
        let store = InMemoryJournalStore::with_system_categories();
        let system = store.list_visible(&owner()).await.unwrap()[0].clone();

        let err = store.delete(&owner(), system.id()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
    }

    #[tokio::test]
    async fn category_in_use_cannot_be_deleted() {
        let store = InMemoryJournalStore::new();
        let category = custom(&store, &owner(), "Hobbies").await;
        let decision = Decision::create(
            DecisionId::new(),
            owner(),
            NewDecision::titled("Take up pottery?").with_category(*category.id()),
            Timestamp::now(),
        )
        .unwrap();
        DecisionRepository::insert(&store, &decision).await.unwrap();

        let err = CategoryRepository::delete(&store, &owner(), category.id())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field(), Some("category_id"));
    }
}
