//! RemoveOptionHandler - Command handler for deleting an option.

use std::sync::Arc;

use tracing::info;

use super::super::access::load_by_option;
use crate::domain::decision::{Decision, DecisionError};
use crate::domain::foundation::{CommandMetadata, OptionId, Timestamp};
use crate::ports::DecisionRepository;

/// Command to delete an option together with its pros/cons.
#[derive(Debug, Clone, Copy)]
pub struct RemoveOptionCommand {
    pub option_id: OptionId,
}

/// Handler for removing options.
pub struct RemoveOptionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl RemoveOptionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RemoveOptionCommand,
        metadata: CommandMetadata,
    ) -> Result<Decision, DecisionError> {
        // 1. Resolve the owning decision
        let mut decision =
            load_by_option(self.repository.as_ref(), &cmd.option_id, &metadata.user_id).await?;
        let loaded_at = *decision.updated_at();

        // 2. Remove; the chosen option stays put
        let removed = decision.remove_option(&cmd.option_id, Timestamp::now())?;

        // 3. Persist option and pros/cons removal in one write
        self.repository.update(&decision, &loaded_at).await?;

        info!(
            user_id = %metadata.user_id,
            request_id = metadata.request_id(),
            decision_id = %decision.id(),
            option_id = %cmd.option_id,
            pros_cons_removed = removed.pros_cons().len(),
            "Option removed"
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{journal, owner, seed_with_options};
    use crate::domain::decision::DecisionPatch;

    #[tokio::test]
    async fn removes_option_with_its_pros_cons() {
        let store = journal();
        let decision = seed_with_options(&store).await;
        let handler = RemoveOptionHandler::new(store.clone());

        let updated = handler
            .handle(
                RemoveOptionCommand {
                    option_id: *decision.options()[0].id(),
                },
                owner(),
            )
            .await
            .unwrap();

        assert_eq!(updated.options().len(), 1);
        assert_eq!(store.option_count().await, 1);
        assert_eq!(store.pro_con_count().await, 0);
    }

    #[tokio::test]
    async fn chosen_option_cannot_be_removed() {
        let store = journal();
        let mut decision = seed_with_options(&store).await;
        let chosen = *decision.options()[0].id();
        let loaded_at = *decision.updated_at();
        decision
            .apply_patch(DecisionPatch::decide(chosen), Timestamp::now())
            .unwrap();
        store.update(&decision, &loaded_at).await.unwrap();
        let handler = RemoveOptionHandler::new(store.clone());

        let err = handler
            .handle(RemoveOptionCommand { option_id: chosen }, owner())
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("option_id"));
        assert_eq!(store.option_count().await, 2);
    }

    #[tokio::test]
    async fn option_of_trashed_decision_is_not_found() {
        let store = journal();
        let decision = seed_with_options(&store).await;
        store
            .soft_delete(&owner().user_id, decision.id(), Timestamp::now())
            .await
            .unwrap();
        let handler = RemoveOptionHandler::new(store.clone());

        let err = handler
            .handle(
                RemoveOptionCommand {
                    option_id: *decision.options()[1].id(),
                },
                owner(),
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.option_count().await, 2);
    }
}
