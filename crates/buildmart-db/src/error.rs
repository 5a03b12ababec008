//! Override store errors.
//!
//! ```text
//! sqlx::Error ─────────┐
//! MigrateError ────────┼──► DbError ──► AppError { DATABASE_ERROR, .. }
//! serde_json::Error ───┘
//! ```

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// The database file could not be opened or created.
    ///
    /// ## When This Occurs
    /// - Parent directory missing or not writable
    /// - Another process holds the file locked past the busy timeout
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A statement was rejected by SQLite.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Begin or commit of a save failed; nothing was written.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// An override list could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Used after `Database::close`.
    #[error("Override store is closed")]
    Closed,
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolClosed => DbError::Closed,
            sqlx::Error::PoolTimedOut => {
                DbError::ConnectionFailed("timed out waiting for a connection".to_string())
            }
            sqlx::Error::Database(e) => DbError::QueryFailed(e.message().to_string()),
            other => DbError::QueryFailed(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;
