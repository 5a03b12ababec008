//! # Store Connection
//!
//! Opens the SQLite file that holds admin overrides.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new(path)            DbConfig::in_memory()                   │
//! │       │ file, WAL, 4 conns           │ private, 1 conn (tests)          │
//! │       └──────────────┬───────────────┘                                  │
//! │                      ▼                                                  │
//! │            Database::new(config) ── migrate ──► settings_overrides      │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │            db.settings() ──► SettingsRepository                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A single storefront process reads the overrides once and writes them on
//! an admin save, so the pool stays small.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::settings::SettingsRepository;

const MEMORY_URL: &str = "sqlite::memory:";

// =============================================================================
// DbConfig
// =============================================================================

/// Where the override store lives and how it is opened.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file; `None` for a private in-memory store.
    pub path: Option<PathBuf>,

    pub max_connections: u32,

    /// How long a write waits on a locked file before failing.
    pub busy_timeout: Duration,

    /// Apply embedded migrations when opening.
    pub migrate: bool,
}

impl DbConfig {
    /// File-backed store at `path`, created if missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            path: Some(path.into()),
            max_connections: 4,
            busy_timeout: Duration::from_secs(5),
            migrate: true,
        }
    }

    /// Private in-memory store. Lives as long as its single connection.
    pub fn in_memory() -> Self {
        DbConfig {
            path: None,
            max_connections: 1,
            busy_timeout: Duration::from_secs(1),
            migrate: true,
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    /// Opens without touching the schema.
    pub fn without_migrations(mut self) -> Self {
        self.migrate = false;
        self
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.path {
            Some(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal),
            None => SqliteConnectOptions::from_str(MEMORY_URL)
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?,
        };
        Ok(options.busy_timeout(self.busy_timeout))
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => ":memory:".to_string(),
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the override store. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the store and brings its schema up to date.
    ///
    /// ## Errors
    /// - `DbError::ConnectionFailed` if the file cannot be opened or created
    /// - `DbError::MigrationFailed` if the schema cannot be applied
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        let target = config.describe();
        info!(store = %target, "Opening override store");

        // No idle timeout: an in-memory store must keep its only connection
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .idle_timeout(None)
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Store pool ready");

        let db = Database { pool };
        if config.migrate {
            migrations::run_migrations(&db.pool).await?;
        }
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Repository for the override entries.
    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(self.pool.clone())
    }

    /// Closes every connection. Repository calls fail afterwards.
    pub async fn close(&self) {
        debug!("Closing override store");
        self.pool.close().await;
    }

    /// True if the store answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
