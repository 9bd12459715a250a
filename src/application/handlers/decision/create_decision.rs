//! CreateDecisionHandler - Command handler for recording a new decision.

use std::sync::Arc;

use tracing::info;

use super::super::access::ensure_category_visible;
use crate::domain::decision::{Decision, DecisionError, NewDecision};
use crate::domain::foundation::{CommandMetadata, DecisionId, Timestamp};
use crate::ports::{CategoryRepository, DecisionRepository};

/// Command to create a decision, optionally with options and pros/cons.
#[derive(Debug, Clone)]
pub struct CreateDecisionCommand {
    pub fields: NewDecision,
}

/// Handler for creating decisions.
pub struct CreateDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl CreateDecisionHandler {
    pub fn new(
        repository: Arc<dyn DecisionRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            repository,
            categories,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateDecisionCommand,
        metadata: CommandMetadata,
    ) -> Result<Decision, DecisionError> {
        // 1. The category, if any, must be visible to the caller
        if let Some(category_id) = &cmd.fields.category_id {
            ensure_category_visible(self.categories.as_ref(), category_id, &metadata.user_id)
                .await?;
        }

        // 2. Build and validate the aggregate
        let decision = Decision::create(
            DecisionId::new(),
            metadata.user_id.clone(),
            cmd.fields,
            Timestamp::now(),
        )?;

        // 3. Persist decision, options and pros/cons together
        self.repository.insert(&decision).await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %decision.id(),
            options = decision.options().len(),
            "Decision created"
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryJournalStore;
    use crate::application::handlers::test_support::{journal, owner, stranger};
    use crate::domain::category::{Category, NewCategory};
    use crate::domain::decision::NewOption;
    use crate::domain::foundation::{CategoryId, DecisionStatus};

    fn handler(store: &Arc<InMemoryJournalStore>) -> CreateDecisionHandler {
        CreateDecisionHandler::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn creates_draft_with_defaults() {
        let store = journal();

        let decision = handler(&store)
            .handle(
                CreateDecisionCommand {
                    fields: NewDecision::titled("  Buy a house?  "),
                },
                owner(),
            )
            .await
            .unwrap();

        assert_eq!(decision.title(), "Buy a house?");
        assert_eq!(decision.status(), DecisionStatus::Draft);
        assert_eq!(decision.created_at(), decision.updated_at());
        assert!(decision.deleted_at().is_none());
        assert_eq!(store.decision_count().await, 1);
    }

    #[tokio::test]
    async fn creates_inline_options_and_pros_cons() {
        let store = journal();
        let fields = NewDecision::titled("Which laptop?")
            .with_option(NewOption::titled("Light").with_pro("Portable"))
            .with_option(NewOption::titled("Fast").with_con("Heavy"));

        let decision = handler(&store)
            .handle(CreateDecisionCommand { fields }, owner())
            .await
            .unwrap();

        assert_eq!(decision.options().len(), 2);
        assert_eq!(decision.options()[1].display_order(), 1);
        assert_eq!(store.pro_con_count().await, 2);
    }

    #[tokio::test]
    async fn rejects_overlong_title_without_writing() {
        let store = journal();

        let err = handler(&store)
            .handle(
                CreateDecisionCommand {
                    fields: NewDecision::titled("x".repeat(201)),
                },
                owner(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("title"));
        assert_eq!(store.decision_count().await, 0);
    }

    #[tokio::test]
    async fn accepts_system_category() {
        let store = journal();
        let visible = CategoryRepository::list_visible(store.as_ref(), &owner().user_id)
            .await
            .unwrap();
        let category_id = *visible[0].id();
        assert!(visible[0].is_system());

        let decision = handler(&store)
            .handle(
                CreateDecisionCommand {
                    fields: NewDecision::titled("New role?").with_category(category_id),
                },
                owner(),
            )
            .await
            .unwrap();

        assert_eq!(decision.category_id(), Some(&category_id));
    }

    #[tokio::test]
    async fn rejects_another_users_category() {
        let store = journal();
        let foreign = Category::create(
            CategoryId::new(),
            stranger().user_id,
            NewCategory::named("Private"),
            0,
        )
        .unwrap();
        CategoryRepository::insert(store.as_ref(), &foreign)
            .await
            .unwrap();

        let err = handler(&store)
            .handle(
                CreateDecisionCommand {
                    fields: NewDecision::titled("Sneaky").with_category(*foreign.id()),
                },
                owner(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("category_id"));
        assert_eq!(store.decision_count().await, 0);
    }

    #[tokio::test]
    async fn rejects_terminal_initial_status() {
        let store = journal();

        let err = handler(&store)
            .handle(
                CreateDecisionCommand {
                    fields: NewDecision::titled("Done already")
                        .with_status(DecisionStatus::Reviewed),
                },
                owner(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DecisionError::ValidationFailed { .. }));
    }
}
