//! Decision reader port (read side / CQRS queries).
//!
//! Listing, trash browsing and the flat facts the statistics are computed
//! from. All queries are scoped to one owner.

use crate::domain::decision::{Decision, EmotionalState};
use crate::domain::foundation::{
    CategoryId, DecisionId, DecisionStatus, DomainError, OptionId, Timestamp, UserId,
};
use crate::domain::outcome::{OutcomeFacts, OutcomeRecord, OutcomeResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reader port for decision queries.
#[async_trait]
pub trait DecisionReader: Send + Sync {
    /// List live decisions, newest first.
    async fn list(
        &self,
        owner: &UserId,
        filter: &DecisionFilter,
    ) -> Result<DecisionPage, DomainError>;

    /// List trashed decisions, most recently deleted first.
    async fn list_trash(
        &self,
        owner: &UserId,
        filter: &TrashFilter,
    ) -> Result<DecisionPage, DomainError>;

    /// Outcome check-ins of one decision, by check-in number.
    async fn list_outcomes(
        &self,
        owner: &UserId,
        decision_id: &DecisionId,
    ) -> Result<Vec<OutcomeRecord>, DomainError>;

    /// One row per live decision with its latest outcome result.
    async fn outcome_facts(&self, owner: &UserId) -> Result<Vec<OutcomeFacts>, DomainError>;
}

/// Position in the newest-first listing order.
///
/// Listings sort by `(created_at, id)` descending, so the cursor carries
/// both; rows sharing a `created_at` are still split exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub created_at: Timestamp,
    pub id: DecisionId,
}

impl PageCursor {
    pub fn of(summary: &DecisionSummary) -> Self {
        Self {
            created_at: summary.created_at,
            id: summary.id,
        }
    }

    /// True if a row at `(created_at, id)` comes after the cursor.
    pub fn precedes(&self, created_at: &Timestamp, id: &DecisionId) -> bool {
        (*created_at, *id) < (self.created_at, self.id)
    }
}

/// Page window. With a cursor, rows after the cursor in listing order are
/// returned and `offset` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
    pub cursor: Option<PageCursor>,
}

impl PageRequest {
    pub fn first(limit: u32) -> Self {
        Self {
            limit,
            offset: 0,
            cursor: None,
        }
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn after_cursor(mut self, cursor: PageCursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Rows to skip; zero when paging by cursor.
    pub fn effective_offset(&self) -> u32 {
        if self.cursor.is_some() {
            0
        } else {
            self.offset
        }
    }
}

/// Filter for live decision listings. Every set field must match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionFilter {
    pub status: Option<DecisionStatus>,
    pub category_id: Option<CategoryId>,
    pub emotional_state: Option<EmotionalState>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    /// Inclusive lower bound on `created_at`.
    pub created_from: Option<Timestamp>,
    /// Inclusive upper bound on `created_at`.
    pub created_to: Option<Timestamp>,
    /// Result of the latest check-in; decisions without one never match.
    pub outcome: Option<OutcomeResult>,
    pub page: PageRequest,
}

impl DecisionFilter {
    /// Unfiltered first page.
    pub fn page(page: PageRequest) -> Self {
        Self {
            status: None,
            category_id: None,
            emotional_state: None,
            search: None,
            created_from: None,
            created_to: None,
            outcome: None,
            page,
        }
    }

    /// True if `decision`, whose latest check-in was `latest`, satisfies
    /// every criterion except paging and the trash flag.
    pub fn matches(&self, decision: &Decision, latest: Option<OutcomeResult>) -> bool {
        self.status.map_or(true, |s| decision.status() == s)
            && self
                .category_id
                .map_or(true, |c| decision.category_id() == Some(&c))
            && self
                .emotional_state
                .map_or(true, |e| decision.emotional_state() == Some(e))
            && title_matches(self.search.as_deref(), decision.title())
            && self
                .created_from
                .map_or(true, |from| !decision.created_at().is_before(&from))
            && self
                .created_to
                .map_or(true, |to| !decision.created_at().is_after(&to))
            && self.outcome.map_or(true, |o| latest == Some(o))
    }
}

/// Filter for the trash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashFilter {
    pub search: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl TrashFilter {
    pub fn matches(&self, decision: &Decision) -> bool {
        decision.is_deleted() && title_matches(self.search.as_deref(), decision.title())
    }
}

/// Case-insensitive substring match; a blank needle matches everything.
pub fn title_matches(needle: Option<&str>, title: &str) -> bool {
    match needle.map(str::trim).filter(|n| !n.is_empty()) {
        Some(needle) => title.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

/// One page of decision summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionPage {
    pub items: Vec<DecisionSummary>,

    /// Total number of rows matching the filter, across all pages.
    pub total: u64,

    /// Whether more rows follow this page.
    pub has_more: bool,

    /// Position of the last item when `has_more`, for cursor paging.
    pub next_cursor: Option<PageCursor>,
}

impl DecisionPage {
    /// Builds a page from up to `limit + 1` fetched rows.
    pub fn from_fetched(mut rows: Vec<DecisionSummary>, limit: u32, total: u64) -> Self {
        let has_more = rows.len() > limit as usize;
        rows.truncate(limit as usize);
        let next_cursor = if has_more {
            rows.last().map(PageCursor::of)
        } else {
            None
        };
        Self {
            items: rows,
            total,
            has_more,
            next_cursor,
        }
    }
}

/// Summary view of a decision for lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub id: DecisionId,
    pub title: String,
    pub status: DecisionStatus,
    pub category_id: Option<CategoryId>,
    pub emotional_state: Option<EmotionalState>,
    pub chosen_option_id: Option<OptionId>,
    pub option_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub decided_at: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
}

impl From<&Decision> for DecisionSummary {
    fn from(decision: &Decision) -> Self {
        Self {
            id: *decision.id(),
            title: decision.title().to_string(),
            status: decision.status(),
            category_id: decision.category_id().copied(),
            emotional_state: decision.emotional_state(),
            chosen_option_id: decision.chosen_option_id().copied(),
            option_count: decision.options().len() as u32,
            created_at: *decision.created_at(),
            updated_at: *decision.updated_at(),
            decided_at: decision.decided_at().copied(),
            deleted_at: decision.deleted_at().copied(),
        }
    }
}
