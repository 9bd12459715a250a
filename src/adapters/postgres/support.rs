//! Shared plumbing for the PostgreSQL adapters: timeouts, error mapping and
//! row decoding.

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};
use tracing::warn;

use crate::domain::decision::EmotionalState;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};

/// Runs one storage operation under the configured deadline.
pub(super) async fn bounded<T, F>(
    limit: Duration,
    operation: &'static str,
    work: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, work).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "Storage operation timed out"
            );
            Err(DomainError::new(
                ErrorCode::Timeout,
                format!("{} timed out", operation),
            ))
        }
    }
}

/// Maps a sqlx error onto the shared error codes.
///
/// Pool exhaustion and connection failures are `Unavailable`; unique
/// violations are `Conflict`; everything else is a `DatabaseError`.
pub(super) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            DomainError::new(ErrorCode::Unavailable, format!("{}: {}", context, err))
        }
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            DomainError::new(ErrorCode::Conflict, format!("{}: duplicate record", context))
        }
        _ => DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err)),
    }
}

const UNIQUE_VIOLATION: &str = "23505";

/// Escapes `%`, `_` and `\` so user text matches literally inside ILIKE.
pub(super) fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// ILIKE pattern for a search box, `None` when the needle is blank.
pub(super) fn search_pattern(needle: Option<&str>) -> Option<String> {
    needle
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| format!("%{}%", escape_like(n)))
}

pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

pub(super) fn timestamp_column(row: &PgRow, name: &str) -> Result<Timestamp, DomainError> {
    column::<chrono::DateTime<chrono::Utc>>(row, name).map(Timestamp::from_datetime)
}

pub(super) fn optional_timestamp_column(
    row: &PgRow,
    name: &str,
) -> Result<Option<Timestamp>, DomainError> {
    Ok(column::<Option<chrono::DateTime<chrono::Utc>>>(row, name)?.map(Timestamp::from_datetime))
}

pub(super) fn user_column(row: &PgRow, name: &str) -> Result<UserId, DomainError> {
    UserId::new(column::<String>(row, name)?).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid {}: {}", name, e))
    })
}

/// Parses a stored tag such as a status or kind.
pub(super) fn parse_stored<T: FromStr>(name: &str, value: &str) -> Result<T, DomainError> {
    value.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} in storage: {}", name, value),
        )
    })
}

/// Older rows may carry emotional states outside the current vocabulary;
/// those read as unset.
pub(super) fn parse_emotional_state(value: Option<String>) -> Option<EmotionalState> {
    let value = value?;
    match value.parse() {
        Ok(state) => Some(state),
        Err(_) => {
            warn!(value = %value, "Ignoring unknown stored emotional state");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn search_pattern_wraps_trimmed_needle() {
        assert_eq!(search_pattern(Some("  job ")), Some("%job%".to_string()));
        assert_eq!(search_pattern(Some("   ")), None);
        assert_eq!(search_pattern(None), None);
    }

    #[test]
    fn pool_timeout_maps_to_unavailable() {
        let err = db_error("Failed to fetch decision", sqlx::Error::PoolTimedOut);
        assert_eq!(err.code, ErrorCode::Unavailable);
    }

    #[test]
    fn row_not_found_maps_to_database_error() {
        let err = db_error("Failed to fetch decision", sqlx::Error::RowNotFound);
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn parse_stored_rejects_unknown_tags() {
        let err = parse_stored::<crate::domain::foundation::DecisionStatus>("status", "bogus")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn unknown_emotional_state_reads_as_unset() {
        assert_eq!(parse_emotional_state(Some("happy".to_string())), None);
        assert_eq!(
            parse_emotional_state(Some("calm".to_string())),
            Some(EmotionalState::Calm)
        );
        assert_eq!(parse_emotional_state(None), None);
    }

    #[tokio::test]
    async fn bounded_reports_timeout() {
        let result: Result<(), DomainError> = bounded(
            Duration::from_millis(5),
            "slow query",
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            },
        )
        .await;

        assert_eq!(result.unwrap_err().code, ErrorCode::Timeout);
    }
}
