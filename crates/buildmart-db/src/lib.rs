//! # buildmart-db: Override Store for BuildMart
//!
//! Persists admin changes to prices, vehicle rates and contact details in a
//! local SQLite file, using sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BuildMart Data Flow                              │
//! │                                                                         │
//! │  Startup / admin command                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  buildmart-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────────┐  ┌─────────────┐  │   │
//! │  │   │   Database    │    │    Repository     │  │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│   (settings.rs)   │  │ (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │ SettingsRepository│  │ 001_...sql  │  │   │
//! │  │   └───────────────┘    └───────────────────┘  └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (platform data dir)/buildmart.db                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use buildmart_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("buildmart.db")).await?;
//! let overrides = db.settings().load_overrides().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::settings::{SettingKey, SettingsRepository, StoredOverrides};
