//! Decision journal service entry point.
//!
//! Loads configuration, installs logging, connects to PostgreSQL, applies
//! migrations when asked to and wires the handler set. Runs until Ctrl-C.
//!
//! The binary owns the database lifecycle only. The HTTP layer links the
//! library and builds its own `JournalHandlers`; here the set is used once
//! at startup to check that the category seed is in place.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use decision_journal::adapters::{
    PostgresCategoryRepository, PostgresDecisionReader, PostgresDecisionRepository,
};
use decision_journal::application::JournalHandlers;
use decision_journal::config::{AppConfig, LogFormat, RuntimeConfig};
use decision_journal::domain::category::SYSTEM_CATEGORIES;
use decision_journal::domain::foundation::{CommandMetadata, UserId};

fn init_tracing(runtime: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&runtime.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match runtime.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.runtime);

    info!(
        environment = ?config.runtime.environment,
        database = %config.database.redacted_url(),
        "Starting decision journal"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .connect(&config.database.url)
        .await?;
    info!("Connected to database");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations applied");
    }

    let timeout = config.store.operation_timeout();
    let handlers = JournalHandlers::new(
        Arc::new(PostgresDecisionRepository::new(pool.clone(), timeout)),
        Arc::new(PostgresDecisionReader::new(pool.clone(), timeout)),
        Arc::new(PostgresCategoryRepository::new(pool.clone(), timeout)),
        config.store.page_limits(),
    );

    // Every caller sees the system categories, so any identity will do.
    let startup = CommandMetadata::new(UserId::new("startup-check")?);
    let visible = handlers.list_categories.handle(startup).await?;
    if visible.len() < SYSTEM_CATEGORIES.len() {
        warn!(
            found = visible.len(),
            expected = SYSTEM_CATEGORIES.len(),
            "System categories missing; run migrations"
        );
    }
    info!(
        operation_timeout_secs = config.store.operation_timeout_secs,
        max_page_size = config.store.max_page_size,
        "Decision journal ready"
    );

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    pool.close().await;
    Ok(())
}
