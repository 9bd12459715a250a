//! ListTrashHandler - Query handler for the caller's soft-deleted decisions.

use std::sync::Arc;

use tracing::debug;

use super::super::paging::PageLimits;
use crate::domain::decision::DecisionError;
use crate::domain::foundation::CommandMetadata;
use crate::ports::{DecisionPage, DecisionReader, TrashFilter};

/// Query for one page of the trash, most recently deleted first.
#[derive(Debug, Clone, Default)]
pub struct ListTrashQuery {
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Handler for browsing the trash.
pub struct ListTrashHandler {
    reader: Arc<dyn DecisionReader>,
    limits: PageLimits,
}

impl ListTrashHandler {
    pub fn new(reader: Arc<dyn DecisionReader>, limits: PageLimits) -> Self {
        Self { reader, limits }
    }

    pub async fn handle(
        &self,
        query: ListTrashQuery,
        metadata: CommandMetadata,
    ) -> Result<DecisionPage, DecisionError> {
        let filter = TrashFilter {
            search: query.search,
            limit: self.limits.resolve(query.limit)?,
            offset: query.offset,
        };

        let page = self.reader.list_trash(&metadata.user_id, &filter).await?;

        debug!(user_id = %metadata.user_id, total = page.total, "Listed trash");
        Ok(page)
    }
}
