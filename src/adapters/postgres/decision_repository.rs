//! PostgreSQL implementation of DecisionRepository.
//!
//! A decision is stored across `decisions`, `options` and `pros_cons`. Every
//! write runs in one transaction. Updates compare-and-swap on `updated_at`
//! and then sync the child tables to the aggregate.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use super::support::{
    bounded, column, db_error, optional_timestamp_column, parse_emotional_state, parse_stored,
    timestamp_column, user_column,
};
use crate::domain::decision::{Decision, DecisionOption, ProCon, PurgeReceipt, SoftDeleteReceipt};
use crate::domain::foundation::{
    CategoryId, DecisionId, DomainError, ErrorCode, OptionId, OutcomeId, ProConId, Timestamp,
    UserId,
};
use crate::domain::outcome::{NewOutcome, RecordedOutcome};
use crate::ports::DecisionRepository;

/// PostgreSQL implementation of DecisionRepository.
#[derive(Clone)]
pub struct PostgresDecisionRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresDecisionRepository {
    /// Creates a repository whose calls each finish within `timeout`.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))
    }

    async fn find_by_parent_lookup(
        &self,
        operation: &'static str,
        sql: &'static str,
        child_id: Uuid,
    ) -> Result<Option<Decision>, DomainError> {
        bounded(self.timeout, operation, async {
            let mut conn = self
                .pool
                .acquire()
                .await
                .map_err(|e| db_error("Failed to acquire connection", e))?;

            let parent: Option<Uuid> = sqlx::query_scalar(sql)
                .bind(child_id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(|e| db_error("Failed to look up parent decision", e))?;

            match parent {
                Some(id) => load_aggregate(&mut conn, id, false).await,
                None => Ok(None),
            }
        })
        .await
    }
}

#[async_trait]
impl DecisionRepository for PostgresDecisionRepository {
    async fn insert(&self, decision: &Decision) -> Result<(), DomainError> {
        bounded(self.timeout, "insert decision", async {
            let mut tx = self.begin().await?;

            sqlx::query(
                r#"
                INSERT INTO decisions (
                    id, user_id, title, description, status, category_id,
                    chosen_option_id, detected_emotional_state, abandon_reason,
                    abandon_note, created_at, updated_at, decided_at, deleted_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                "#,
            )
            .bind(decision.id().as_uuid())
            .bind(decision.user_id().as_str())
            .bind(decision.title())
            .bind(decision.description())
            .bind(decision.status().as_str())
            .bind(decision.category_id().map(|id| *id.as_uuid()))
            .bind(decision.chosen_option_id().map(|id| *id.as_uuid()))
            .bind(decision.emotional_state().map(|e| e.as_str()))
            .bind(decision.abandon_reason().map(|r| r.as_str()))
            .bind(decision.abandon_note())
            .bind(decision.created_at().as_datetime())
            .bind(decision.updated_at().as_datetime())
            .bind(decision.decided_at().map(|t| *t.as_datetime()))
            .bind(decision.deleted_at().map(|t| *t.as_datetime()))
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to insert decision", e))?;

            sync_children(&mut tx, decision).await?;

            tx.commit()
                .await
                .map_err(|e| db_error("Failed to commit transaction", e))?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>, DomainError> {
        bounded(self.timeout, "find decision", async {
            let mut conn = self
                .pool
                .acquire()
                .await
                .map_err(|e| db_error("Failed to acquire connection", e))?;
            load_aggregate(&mut conn, *id.as_uuid(), false).await
        })
        .await
    }

    async fn list_live(&self, owner: &UserId) -> Result<Vec<Decision>, DomainError> {
        bounded(self.timeout, "list live decisions", async {
            let mut conn = self
                .pool
                .acquire()
                .await
                .map_err(|e| db_error("Failed to acquire connection", e))?;

            let ids: Vec<Uuid> = sqlx::query_scalar(
                r#"
                SELECT id FROM decisions
                WHERE user_id = $1 AND deleted_at IS NULL
                ORDER BY created_at DESC, id DESC
                "#,
            )
            .bind(owner.as_str())
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| db_error("Failed to list live decisions", e))?;

            let mut decisions = Vec::with_capacity(ids.len());
            for id in ids {
                // Purged between the two queries.
                if let Some(decision) = load_aggregate(&mut conn, id, false).await? {
                    decisions.push(decision);
                }
            }
            Ok(decisions)
        })
        .await
    }

    async fn find_by_option(&self, id: &OptionId) -> Result<Option<Decision>, DomainError> {
        self.find_by_parent_lookup(
            "find decision by option",
            "SELECT decision_id FROM options WHERE id = $1",
            *id.as_uuid(),
        )
        .await
    }

    async fn find_by_pro_con(&self, id: &ProConId) -> Result<Option<Decision>, DomainError> {
        self.find_by_parent_lookup(
            "find decision by pro/con",
            r#"
            SELECT o.decision_id
            FROM pros_cons pc
            JOIN options o ON o.id = pc.option_id
            WHERE pc.id = $1
            "#,
            *id.as_uuid(),
        )
        .await
    }

    async fn update(
        &self,
        decision: &Decision,
        expected_updated_at: &Timestamp,
    ) -> Result<(), DomainError> {
        bounded(self.timeout, "update decision", async {
            let mut tx = self.begin().await?;

            let result = sqlx::query(
                r#"
                UPDATE decisions SET
                    title = $3,
                    description = $4,
                    status = $5,
                    category_id = $6,
                    chosen_option_id = $7,
                    detected_emotional_state = $8,
                    abandon_reason = $9,
                    abandon_note = $10,
                    updated_at = $11,
                    decided_at = $12
                WHERE id = $1 AND updated_at = $2 AND deleted_at IS NULL
                "#,
            )
            .bind(decision.id().as_uuid())
            .bind(expected_updated_at.as_datetime())
            .bind(decision.title())
            .bind(decision.description())
            .bind(decision.status().as_str())
            .bind(decision.category_id().map(|id| *id.as_uuid()))
            .bind(decision.chosen_option_id().map(|id| *id.as_uuid()))
            .bind(decision.emotional_state().map(|e| e.as_str()))
            .bind(decision.abandon_reason().map(|r| r.as_str()))
            .bind(decision.abandon_note())
            .bind(decision.updated_at().as_datetime())
            .bind(decision.decided_at().map(|t| *t.as_datetime()))
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to update decision", e))?;

            if result.rows_affected() == 0 {
                let current: Option<Option<chrono::DateTime<chrono::Utc>>> =
                    sqlx::query_scalar("SELECT deleted_at FROM decisions WHERE id = $1")
                        .bind(decision.id().as_uuid())
                        .fetch_optional(&mut *tx)
                        .await
                        .map_err(|e| db_error("Failed to fetch decision", e))?;

                return Err(match current {
                    Some(None) => DomainError::new(
                        ErrorCode::ConcurrentModification,
                        "Decision was modified by another request",
                    ),
                    _ => DomainError::new(
                        ErrorCode::DecisionNotFound,
                        format!("Decision not found: {}", decision.id()),
                    ),
                });
            }

            sync_children(&mut tx, decision).await?;

            tx.commit()
                .await
                .map_err(|e| db_error("Failed to commit transaction", e))?;
            Ok(())
        })
        .await
    }

    async fn soft_delete(
        &self,
        owner: &UserId,
        id: &DecisionId,
        at: Timestamp,
    ) -> Result<SoftDeleteReceipt, DomainError> {
        bounded(self.timeout, "soft delete decision", async {
            let mut tx = self.begin().await?;

            let current: Option<Option<chrono::DateTime<chrono::Utc>>> = sqlx::query_scalar(
                "SELECT deleted_at FROM decisions WHERE id = $1 AND user_id = $2 FOR UPDATE",
            )
            .bind(id.as_uuid())
            .bind(owner.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to fetch decision", e))?;

            let receipt = match current {
                None => return Err(decision_not_found(id)),
                Some(Some(existing)) => SoftDeleteReceipt {
                    decision_id: *id,
                    deleted_at: Timestamp::from_datetime(existing),
                    already_deleted: true,
                },
                Some(None) => {
                    sqlx::query("UPDATE decisions SET deleted_at = $2 WHERE id = $1")
                        .bind(id.as_uuid())
                        .bind(at.as_datetime())
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| db_error("Failed to soft delete decision", e))?;
                    SoftDeleteReceipt {
                        decision_id: *id,
                        deleted_at: at,
                        already_deleted: false,
                    }
                }
            };

            tx.commit()
                .await
                .map_err(|e| db_error("Failed to commit transaction", e))?;
            Ok(receipt)
        })
        .await
    }

    async fn restore(&self, owner: &UserId, id: &DecisionId) -> Result<Decision, DomainError> {
        bounded(self.timeout, "restore decision", async {
            let mut tx = self.begin().await?;

            let result =
                sqlx::query("UPDATE decisions SET deleted_at = NULL WHERE id = $1 AND user_id = $2")
                    .bind(id.as_uuid())
                    .bind(owner.as_str())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| db_error("Failed to restore decision", e))?;

            if result.rows_affected() == 0 {
                return Err(decision_not_found(id));
            }

            let decision = load_aggregate(&mut tx, *id.as_uuid(), false)
                .await?
                .ok_or_else(|| decision_not_found(id))?;

            tx.commit()
                .await
                .map_err(|e| db_error("Failed to commit transaction", e))?;
            Ok(decision)
        })
        .await
    }

    async fn purge(&self, owner: &UserId, id: &DecisionId) -> Result<PurgeReceipt, DomainError> {
        bounded(self.timeout, "purge decision", async {
            let mut tx = self.begin().await?;

            let owned: Option<Uuid> = sqlx::query_scalar(
                "SELECT id FROM decisions WHERE id = $1 AND user_id = $2 FOR UPDATE",
            )
            .bind(id.as_uuid())
            .bind(owner.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to fetch decision", e))?;

            if owned.is_none() {
                return Err(decision_not_found(id));
            }

            // Children first, then the decision itself.
            let pros_cons_removed = sqlx::query(
                "DELETE FROM pros_cons WHERE option_id IN (SELECT id FROM options WHERE decision_id = $1)",
            )
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete pros/cons", e))?
            .rows_affected();

            let options_removed = sqlx::query("DELETE FROM options WHERE decision_id = $1")
                .bind(id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to delete options", e))?
                .rows_affected();

            let outcomes_removed = sqlx::query("DELETE FROM outcomes WHERE decision_id = $1")
                .bind(id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to delete outcomes", e))?
                .rows_affected();

            sqlx::query("DELETE FROM decisions WHERE id = $1")
                .bind(id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to delete decision", e))?;

            tx.commit()
                .await
                .map_err(|e| db_error("Failed to commit transaction", e))?;

            info!(
                decision_id = %id,
                options_removed,
                pros_cons_removed,
                outcomes_removed,
                "Purged decision rows"
            );
            Ok(PurgeReceipt {
                decision_id: *id,
                options_removed,
                pros_cons_removed,
                outcomes_removed,
            })
        })
        .await
    }

    async fn append_outcome(
        &self,
        owner: &UserId,
        id: &DecisionId,
        outcome: NewOutcome,
    ) -> Result<RecordedOutcome, DomainError> {
        bounded(self.timeout, "append outcome", async {
            let mut tx = self.begin().await?;

            let mut decision = load_aggregate(&mut tx, *id.as_uuid(), true)
                .await?
                .filter(|d| d.user_id() == owner && !d.is_deleted())
                .ok_or_else(|| decision_not_found(id))?;

            let previous: Option<i32> =
                sqlx::query_scalar("SELECT MAX(check_in_number) FROM outcomes WHERE decision_id = $1")
                    .bind(id.as_uuid())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| db_error("Failed to read check-in number", e))?;

            let record = outcome.into_record(OutcomeId::new(), *id, previous);
            let decision_status = decision.note_outcome_recorded(record.recorded_at);

            sqlx::query(
                r#"
                INSERT INTO outcomes (
                    id, decision_id, result, satisfaction, notes, recorded_at, check_in_number
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(record.id.as_uuid())
            .bind(id.as_uuid())
            .bind(record.result.as_str())
            .bind(record.satisfaction.map(|s| s.value()))
            .bind(record.notes.as_deref())
            .bind(record.recorded_at.as_datetime())
            .bind(record.check_in_number)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to insert outcome", e))?;

            // The inline outcome columns mirror the latest check-in for
            // readers that predate the outcomes table.
            sqlx::query(
                r#"
                UPDATE decisions SET
                    status = $2,
                    updated_at = $3,
                    outcome = $4,
                    outcome_notes = $5,
                    outcome_recorded_at = $6
                WHERE id = $1
                "#,
            )
            .bind(id.as_uuid())
            .bind(decision_status.as_str())
            .bind(decision.updated_at().as_datetime())
            .bind(record.result.as_str())
            .bind(record.notes.as_deref())
            .bind(record.recorded_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to update decision status", e))?;

            tx.commit()
                .await
                .map_err(|e| db_error("Failed to commit transaction", e))?;

            debug!(decision_id = %id, check_in = record.check_in_number, "Appended outcome");
            Ok(RecordedOutcome {
                outcome: record,
                decision_status,
            })
        })
        .await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn decision_not_found(id: &DecisionId) -> DomainError {
    DomainError::new(
        ErrorCode::DecisionNotFound,
        format!("Decision not found: {}", id),
    )
}

/// Makes the child tables match the aggregate: removes vanished rows, then
/// upserts options before their pros/cons.
async fn sync_children(conn: &mut PgConnection, decision: &Decision) -> Result<(), DomainError> {
    let option_ids: Vec<Uuid> = decision
        .options()
        .iter()
        .map(|o| *o.id().as_uuid())
        .collect();
    let pro_con_ids: Vec<Uuid> = decision
        .options()
        .iter()
        .flat_map(|o| o.pros_cons())
        .map(|pc| *pc.id().as_uuid())
        .collect();

    sqlx::query(
        r#"
        DELETE FROM pros_cons
        WHERE option_id IN (SELECT id FROM options WHERE decision_id = $1)
          AND NOT (id = ANY($2))
        "#,
    )
    .bind(decision.id().as_uuid())
    .bind(&pro_con_ids)
    .execute(&mut *conn)
    .await
    .map_err(|e| db_error("Failed to delete removed pros/cons", e))?;

    sqlx::query("DELETE FROM options WHERE decision_id = $1 AND NOT (id = ANY($2))")
        .bind(decision.id().as_uuid())
        .bind(&option_ids)
        .execute(&mut *conn)
        .await
        .map_err(|e| db_error("Failed to delete removed options", e))?;

    for option in decision.options() {
        upsert_option(conn, decision.id(), option).await?;
    }
    for pro_con in decision.options().iter().flat_map(|o| o.pros_cons()) {
        upsert_pro_con(conn, pro_con).await?;
    }
    Ok(())
}

async fn upsert_option(
    conn: &mut PgConnection,
    decision_id: &DecisionId,
    option: &DecisionOption,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO options (
            id, decision_id, title, description, display_order, is_chosen, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (id) DO UPDATE SET
            title = EXCLUDED.title,
            description = EXCLUDED.description,
            display_order = EXCLUDED.display_order,
            is_chosen = EXCLUDED.is_chosen
        "#,
    )
    .bind(option.id().as_uuid())
    .bind(decision_id.as_uuid())
    .bind(option.title())
    .bind(option.description())
    .bind(option.display_order())
    .bind(option.is_chosen())
    .bind(option.created_at().as_datetime())
    .execute(&mut *conn)
    .await
    .map_err(|e| db_error("Failed to save option", e))?;

    Ok(())
}

async fn upsert_pro_con(conn: &mut PgConnection, pro_con: &ProCon) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO pros_cons (
            id, option_id, type, content, display_order, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (id) DO UPDATE SET
            option_id = EXCLUDED.option_id,
            type = EXCLUDED.type,
            content = EXCLUDED.content,
            display_order = EXCLUDED.display_order
        "#,
    )
    .bind(pro_con.id().as_uuid())
    .bind(pro_con.option_id().as_uuid())
    .bind(pro_con.kind().as_str())
    .bind(pro_con.content())
    .bind(pro_con.display_order())
    .bind(pro_con.created_at().as_datetime())
    .execute(&mut *conn)
    .await
    .map_err(|e| db_error("Failed to save pro/con", e))?;

    Ok(())
}

const DECISION_COLUMNS: &str = "id, user_id, title, description, status, category_id, \
     chosen_option_id, detected_emotional_state, abandon_reason, abandon_note, \
     created_at, updated_at, decided_at, deleted_at";

/// Loads a decision with its options and pros/cons. `lock` takes a row lock
/// on the decision for the rest of the transaction.
async fn load_aggregate(
    conn: &mut PgConnection,
    id: Uuid,
    lock: bool,
) -> Result<Option<Decision>, DomainError> {
    let sql = format!(
        "SELECT {} FROM decisions WHERE id = $1{}",
        DECISION_COLUMNS,
        if lock { " FOR UPDATE" } else { "" }
    );
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| db_error("Failed to fetch decision", e))?;

    let row = match row {
        Some(row) => row,
        None => return Ok(None),
    };

    let pro_con_rows = sqlx::query(
        r#"
        SELECT pc.id, pc.option_id, pc.type, pc.content, pc.display_order, pc.created_at
        FROM pros_cons pc
        JOIN options o ON o.id = pc.option_id
        WHERE o.decision_id = $1
        ORDER BY pc.display_order
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| db_error("Failed to fetch pros/cons", e))?;

    let mut pros_cons: HashMap<Uuid, Vec<ProCon>> = HashMap::new();
    for pc_row in &pro_con_rows {
        let pro_con = row_to_pro_con(pc_row)?;
        pros_cons
            .entry(*pro_con.option_id().as_uuid())
            .or_default()
            .push(pro_con);
    }

    let option_rows = sqlx::query(
        r#"
        SELECT id, title, description, display_order, is_chosen, created_at
        FROM options
        WHERE decision_id = $1
        ORDER BY display_order
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| db_error("Failed to fetch options", e))?;

    let options = option_rows
        .iter()
        .map(|option_row| {
            let option_id: Uuid = column(option_row, "id")?;
            Ok(DecisionOption::reconstitute(
                OptionId::from_uuid(option_id),
                column(option_row, "title")?,
                column(option_row, "description")?,
                column(option_row, "display_order")?,
                column(option_row, "is_chosen")?,
                pros_cons.remove(&option_id).unwrap_or_default(),
                timestamp_column(option_row, "created_at")?,
            ))
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    row_to_decision(&row, options).map(Some)
}

fn row_to_decision(row: &PgRow, options: Vec<DecisionOption>) -> Result<Decision, DomainError> {
    let status: String = column(row, "status")?;
    let abandon_reason: Option<String> = column(row, "abandon_reason")?;

    Ok(Decision::reconstitute(
        DecisionId::from_uuid(column(row, "id")?),
        user_column(row, "user_id")?,
        column(row, "title")?,
        column(row, "description")?,
        parse_stored("status", &status)?,
        column::<Option<Uuid>>(row, "category_id")?.map(CategoryId::from_uuid),
        column::<Option<Uuid>>(row, "chosen_option_id")?.map(OptionId::from_uuid),
        parse_emotional_state(column(row, "detected_emotional_state")?),
        abandon_reason
            .map(|r| parse_stored("abandon_reason", &r))
            .transpose()?,
        column(row, "abandon_note")?,
        options,
        timestamp_column(row, "created_at")?,
        timestamp_column(row, "updated_at")?,
        optional_timestamp_column(row, "decided_at")?,
        optional_timestamp_column(row, "deleted_at")?,
    ))
}

fn row_to_pro_con(row: &PgRow) -> Result<ProCon, DomainError> {
    let kind: String = column(row, "type")?;
    Ok(ProCon::reconstitute(
        ProConId::from_uuid(column(row, "id")?),
        OptionId::from_uuid(column(row, "option_id")?),
        parse_stored("type", &kind)?,
        column(row, "content")?,
        column(row, "display_order")?,
        timestamp_column(row, "created_at")?,
    ))
}
