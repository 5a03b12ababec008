//! # State Module
//!
//! Everything a command needs, built once per invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    AppContext                                           │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────────────┐   │
//! │  │  AppConfig   │  │    Database      │  │       Settings           │   │
//! │  │              │  │                  │  │                          │   │
//! │  │  file + env  │  │  override store  │  │  catalog + contact       │   │
//! │  │  (read-only) │  │  (SQLite pool)   │  │  (config ⊕ overrides)    │   │
//! │  └──────────────┘  └──────────────────┘  └──────────────────────────┘   │
//! │                                                                         │
//! │  Admin commands edit `settings` and write the whole set back with       │
//! │  `save_settings`.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod settings;

pub use settings::{Contact, Settings};

use tracing::{debug, info};

use buildmart_db::{Database, DbConfig};
use buildmart_maps::DistanceMatrixClient;

use crate::config::AppConfig;
use crate::error::AppError;

/// Per-invocation application state.
#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub db: Database,
    pub settings: Settings,
}

impl AppContext {
    /// Opens the configured database and loads the stored overrides.
    pub async fn open(config: AppConfig) -> Result<Self, AppError> {
        let path = config.database_path()?;
        info!(?path, "Opening override store");

        let db = Database::new(DbConfig::new(path)).await?;
        Self::with_database(config, db).await
    }

    /// Builds the context around an already opened database.
    pub async fn with_database(config: AppConfig, db: Database) -> Result<Self, AppError> {
        let overrides = db.settings().load_overrides().await?;
        debug!(empty = overrides.is_empty(), "Loaded stored overrides");

        let settings = Settings::resolve(&config, overrides);
        Ok(AppContext {
            config,
            db,
            settings,
        })
    }

    /// Writes every current setting to the override store.
    pub async fn save_settings(&self) -> Result<(), AppError> {
        self.db
            .settings()
            .save_overrides(&self.settings.to_overrides())
            .await?;
        info!("Settings saved");
        Ok(())
    }

    /// Client for distance lookups.
    pub fn distance_client(&self) -> Result<DistanceMatrixClient, AppError> {
        Ok(DistanceMatrixClient::new(self.config.maps_config())?)
    }
}
