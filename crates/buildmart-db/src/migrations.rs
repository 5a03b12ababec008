//! Schema migrations, embedded from `migrations/sqlite` at compile time.
//!
//! Files are applied in sequence-number order and recorded in
//! `_sqlx_migrations`. An applied file is never edited; changes go in a new
//! `NNN_description.sql`.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies whatever has not been applied yet.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    debug!(available = MIGRATOR.migrations.len(), "Applying store migrations");
    MIGRATOR.run(pool).await?;
    info!("Override store schema up to date");
    Ok(())
}

/// `(available, applied)` migration counts.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let applied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;

    Ok((MIGRATOR.migrations.len(), applied.max(0) as usize))
}
