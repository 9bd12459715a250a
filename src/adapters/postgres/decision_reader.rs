//! PostgreSQL implementation of DecisionReader.
//!
//! Provides read-optimized queries for decision listings, the trash,
//! outcome history and the facts behind the statistics.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use super::support::{
    bounded, column, db_error, optional_timestamp_column, parse_emotional_state, parse_stored,
    search_pattern, timestamp_column,
};
use crate::domain::foundation::{
    CategoryId, DecisionId, DomainError, ErrorCode, OptionId, OutcomeId, Satisfaction, UserId,
};
use crate::domain::outcome::{OutcomeFacts, OutcomeRecord, OutcomeResult};
use crate::ports::{DecisionFilter, DecisionPage, DecisionReader, DecisionSummary, TrashFilter};

/// PostgreSQL implementation of DecisionReader.
#[derive(Clone)]
pub struct PostgresDecisionReader {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresDecisionReader {
    /// Creates a reader whose queries each finish within `timeout`.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

const SUMMARY_COLUMNS: &str = r#"
    d.id, d.title, d.status, d.category_id, d.detected_emotional_state,
    d.chosen_option_id, d.created_at, d.updated_at, d.decided_at, d.deleted_at,
    (SELECT COUNT(*) FROM options o WHERE o.decision_id = d.id) AS option_count
"#;

/// Live-row filter shared by the page query and its count. Binds $1..$8.
///
/// Status and outcome bind every stored spelling so legacy rows match.
const LIVE_FILTER: &str = r#"
    d.user_id = $1
    AND d.deleted_at IS NULL
    AND ($2::text[] IS NULL OR d.status = ANY($2))
    AND ($3::uuid IS NULL OR d.category_id = $3)
    AND ($4::text IS NULL OR d.detected_emotional_state = $4)
    AND ($5::text IS NULL OR d.title ILIKE $5)
    AND ($6::timestamptz IS NULL OR d.created_at >= $6)
    AND ($7::timestamptz IS NULL OR d.created_at <= $7)
    AND ($8::text[] IS NULL OR COALESCE(
        (SELECT o.result FROM outcomes o
         WHERE o.decision_id = d.id
         ORDER BY o.check_in_number DESC
         LIMIT 1),
        d.outcome) = ANY($8))
"#;

#[async_trait]
impl DecisionReader for PostgresDecisionReader {
    async fn list(
        &self,
        owner: &UserId,
        filter: &DecisionFilter,
    ) -> Result<DecisionPage, DomainError> {
        bounded(self.timeout, "list decisions", async {
            let pattern = search_pattern(filter.search.as_deref());
            let statuses = status_values(filter);
            let outcomes = outcome_values(filter);
            let page = &filter.page;

            let sql = format!(
                r#"
                SELECT {}
                FROM decisions d
                WHERE {}
                  AND ($9::timestamptz IS NULL OR (d.created_at, d.id) < ($9, $10))
                ORDER BY d.created_at DESC, d.id DESC
                LIMIT $11 OFFSET $12
                "#,
                SUMMARY_COLUMNS, LIVE_FILTER
            );
            let rows = sqlx::query(&sql)
                .bind(owner.as_str())
                .bind(statuses.as_deref())
                .bind(filter.category_id.map(|c| *c.as_uuid()))
                .bind(filter.emotional_state.map(|e| e.as_str()))
                .bind(pattern.as_deref())
                .bind(filter.created_from.map(|t| *t.as_datetime()))
                .bind(filter.created_to.map(|t| *t.as_datetime()))
                .bind(outcomes.as_deref())
                .bind(page.cursor.map(|c| *c.created_at.as_datetime()))
                .bind(page.cursor.map(|c| *c.id.as_uuid()))
                .bind(i64::from(page.limit) + 1)
                .bind(i64::from(page.effective_offset()))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("Failed to list decisions", e))?;

            let count_sql = format!("SELECT COUNT(*) FROM decisions d WHERE {}", LIVE_FILTER);
            let total: i64 = sqlx::query_scalar(&count_sql)
                .bind(owner.as_str())
                .bind(statuses.as_deref())
                .bind(filter.category_id.map(|c| *c.as_uuid()))
                .bind(filter.emotional_state.map(|e| e.as_str()))
                .bind(pattern.as_deref())
                .bind(filter.created_from.map(|t| *t.as_datetime()))
                .bind(filter.created_to.map(|t| *t.as_datetime()))
                .bind(outcomes.as_deref())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to count decisions", e))?;

            let items = rows
                .iter()
                .map(row_to_summary)
                .collect::<Result<Vec<_>, DomainError>>()?;
            Ok(DecisionPage::from_fetched(items, page.limit, total as u64))
        })
        .await
    }

    async fn list_trash(
        &self,
        owner: &UserId,
        filter: &TrashFilter,
    ) -> Result<DecisionPage, DomainError> {
        bounded(self.timeout, "list trash", async {
            let pattern = search_pattern(filter.search.as_deref());

            let sql = format!(
                r#"
                SELECT {}
                FROM decisions d
                WHERE d.user_id = $1
                  AND d.deleted_at IS NOT NULL
                  AND ($2::text IS NULL OR d.title ILIKE $2)
                ORDER BY d.deleted_at DESC, d.id DESC
                LIMIT $3 OFFSET $4
                "#,
                SUMMARY_COLUMNS
            );
            let rows = sqlx::query(&sql)
                .bind(owner.as_str())
                .bind(pattern.as_deref())
                .bind(i64::from(filter.limit) + 1)
                .bind(i64::from(filter.offset))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("Failed to list trash", e))?;

            let total: i64 = sqlx::query_scalar(
                r#"
                SELECT COUNT(*) FROM decisions d
                WHERE d.user_id = $1
                  AND d.deleted_at IS NOT NULL
                  AND ($2::text IS NULL OR d.title ILIKE $2)
                "#,
            )
            .bind(owner.as_str())
            .bind(pattern.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count trash", e))?;

            let items = rows
                .iter()
                .map(row_to_summary)
                .collect::<Result<Vec<_>, DomainError>>()?;
            let mut page = DecisionPage::from_fetched(items, filter.limit, total as u64);
            page.next_cursor = None;
            Ok(page)
        })
        .await
    }

    async fn list_outcomes(
        &self,
        owner: &UserId,
        decision_id: &DecisionId,
    ) -> Result<Vec<OutcomeRecord>, DomainError> {
        bounded(self.timeout, "list outcomes", async {
            let owned: Option<Uuid> =
                sqlx::query_scalar("SELECT id FROM decisions WHERE id = $1 AND user_id = $2")
                    .bind(decision_id.as_uuid())
                    .bind(owner.as_str())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| db_error("Failed to fetch decision", e))?;

            if owned.is_none() {
                return Err(DomainError::new(
                    ErrorCode::DecisionNotFound,
                    format!("Decision not found: {}", decision_id),
                ));
            }

            let rows = sqlx::query(
                r#"
                SELECT id, decision_id, result, satisfaction, notes, recorded_at, check_in_number
                FROM outcomes
                WHERE decision_id = $1
                ORDER BY check_in_number
                "#,
            )
            .bind(decision_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list outcomes", e))?;

            rows.iter().map(row_to_outcome).collect()
        })
        .await
    }

    async fn outcome_facts(&self, owner: &UserId) -> Result<Vec<OutcomeFacts>, DomainError> {
        bounded(self.timeout, "outcome facts", async {
            // Decisions recorded before the outcomes table existed only carry
            // the inline column.
            let rows = sqlx::query(
                r#"
                SELECT d.id, d.category_id, c.name AS category_name,
                       d.detected_emotional_state,
                       COALESCE(latest.result, d.outcome) AS latest_result,
                       (SELECT COUNT(*) FROM options o WHERE o.decision_id = d.id)
                           AS option_count,
                       (SELECT COUNT(*) FROM options o
                        JOIN options chosen ON chosen.id = d.chosen_option_id
                        WHERE o.decision_id = d.id
                          AND (o.display_order, o.id) <= (chosen.display_order, chosen.id)
                       ) AS chosen_position
                FROM decisions d
                LEFT JOIN categories c ON c.id = d.category_id
                LEFT JOIN LATERAL (
                    SELECT o.result FROM outcomes o
                    WHERE o.decision_id = d.id
                    ORDER BY o.check_in_number DESC
                    LIMIT 1
                ) latest ON TRUE
                WHERE d.user_id = $1 AND d.deleted_at IS NULL
                "#,
            )
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load outcome facts", e))?;

            rows.iter().map(row_to_facts).collect()
        })
        .await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn status_values(filter: &DecisionFilter) -> Option<Vec<String>> {
    filter
        .status
        .map(|s| s.stored_values().iter().map(|v| v.to_string()).collect())
}

fn outcome_values(filter: &DecisionFilter) -> Option<Vec<String>> {
    filter
        .outcome
        .map(|o| o.stored_values().iter().map(|v| v.to_string()).collect())
}

fn row_to_summary(row: &PgRow) -> Result<DecisionSummary, DomainError> {
    let status: String = column(row, "status")?;
    let option_count: i64 = column(row, "option_count")?;

    Ok(DecisionSummary {
        id: DecisionId::from_uuid(column(row, "id")?),
        title: column(row, "title")?,
        status: parse_stored("status", &status)?,
        category_id: column::<Option<Uuid>>(row, "category_id")?.map(CategoryId::from_uuid),
        emotional_state: parse_emotional_state(column(row, "detected_emotional_state")?),
        chosen_option_id: column::<Option<Uuid>>(row, "chosen_option_id")?
            .map(OptionId::from_uuid),
        option_count: option_count as u32,
        created_at: timestamp_column(row, "created_at")?,
        updated_at: timestamp_column(row, "updated_at")?,
        decided_at: optional_timestamp_column(row, "decided_at")?,
        deleted_at: optional_timestamp_column(row, "deleted_at")?,
    })
}

fn row_to_outcome(row: &PgRow) -> Result<OutcomeRecord, DomainError> {
    let result: String = column(row, "result")?;
    let satisfaction = column::<Option<i32>>(row, "satisfaction")?
        .map(Satisfaction::try_from_i32)
        .transpose()
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid satisfaction in storage: {}", e),
            )
        })?;

    Ok(OutcomeRecord {
        id: OutcomeId::from_uuid(column(row, "id")?),
        decision_id: DecisionId::from_uuid(column(row, "decision_id")?),
        result: parse_stored("result", &result)?,
        satisfaction,
        notes: column(row, "notes")?,
        recorded_at: timestamp_column(row, "recorded_at")?,
        check_in_number: column(row, "check_in_number")?,
    })
}

fn row_to_facts(row: &PgRow) -> Result<OutcomeFacts, DomainError> {
    let latest: Option<String> = column(row, "latest_result")?;
    let latest_result = latest.and_then(|value| match value.parse::<OutcomeResult>() {
        Ok(result) => Some(result),
        Err(_) => {
            warn!(value = %value, "Ignoring unknown stored outcome");
            None
        }
    });
    let option_count: i64 = column(row, "option_count")?;
    // Zero when nothing is chosen or the chosen option is gone.
    let chosen_position: i64 = column(row, "chosen_position")?;

    Ok(OutcomeFacts {
        decision_id: DecisionId::from_uuid(column(row, "id")?),
        category_id: column::<Option<Uuid>>(row, "category_id")?.map(CategoryId::from_uuid),
        category_name: column(row, "category_name")?,
        emotional_state: parse_emotional_state(column(row, "detected_emotional_state")?),
        latest_result,
        option_count: option_count as u32,
        chosen_position: (chosen_position > 0).then_some(chosen_position as u32),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DecisionStatus;
    use crate::ports::PageRequest;

    #[test]
    fn live_filter_excludes_trash() {
        assert!(LIVE_FILTER.contains("d.deleted_at IS NULL"));
    }

    #[test]
    fn summary_columns_count_options() {
        assert!(SUMMARY_COLUMNS.contains("AS option_count"));
    }

    #[test]
    fn live_filter_matches_any_stored_spelling() {
        assert!(LIVE_FILTER.contains("d.status = ANY($2)"));
        assert!(LIVE_FILTER.contains("d.outcome) = ANY($8)"));
    }

    #[test]
    fn deliberating_filter_includes_legacy_in_progress_rows() {
        let mut filter = DecisionFilter::page(PageRequest::first(10));
        filter.status = Some(DecisionStatus::Deliberating);

        let values = status_values(&filter).unwrap();

        assert_eq!(values, vec!["deliberating", "in_progress"]);
    }

    #[test]
    fn outcome_filter_binds_legacy_spellings() {
        let mut filter = DecisionFilter::page(PageRequest::first(10));
        assert!(outcome_values(&filter).is_none());

        filter.outcome = Some(OutcomeResult::Worse);

        assert_eq!(
            outcome_values(&filter).unwrap(),
            vec!["worse", "negative", "failure"]
        );
    }
}
