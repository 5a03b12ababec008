//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BUILDMART_WHATSAPP_NUMBER=919876543210                             │
//! │     BUILDMART_MAPS_API_KEY=...                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/buildmart/buildmart.toml (Linux)                         │
//! │     ~/Library/Application Support/com.buildmart.store/... (macOS)      │
//! │     or --config <path>                                                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values changed in the admin panel live in the override store, not here;
//! see [`crate::state::Settings`].
//!
//! ## Configuration File Format
//! ```toml
//! [business]
//! whatsapp_number = "919876543210"
//! upi_id = "business@upi"
//! payment_link = "https://rzp.io/l/your-payment-link"
//! admin_password = "admin123"
//!
//! [maps]
//! api_key = "..."
//! warehouse_lat = 28.6139
//! warehouse_lng = 77.2090
//!
//! [storage]
//! database_path = "/var/lib/buildmart/buildmart.db"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use buildmart_core::validation::{validate_payment_link, validate_whatsapp_number};
use buildmart_maps::config::{DEFAULT_ENDPOINT, DEFAULT_WAREHOUSE_LAT, DEFAULT_WAREHOUSE_LNG};
use buildmart_maps::MapsConfig;

const CONFIG_FILE_NAME: &str = "buildmart.toml";
const DATABASE_FILE_NAME: &str = "buildmart.db";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Could not determine the application data directory")]
    NoDataDir,
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Business contact and payment details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    /// Number orders are sent to, with country code, digits only.
    pub whatsapp_number: String,
    pub upi_id: String,
    /// External payment page opened after an order.
    pub payment_link: String,
    pub admin_password: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        BusinessConfig {
            whatsapp_number: "919876543210".to_string(),
            upi_id: "business@upi".to_string(),
            payment_link: "https://rzp.io/l/your-payment-link".to_string(),
            admin_password: "admin123".to_string(),
        }
    }
}

/// Distance lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapsSettings {
    pub api_key: Option<String>,
    pub warehouse_lat: f64,
    pub warehouse_lng: f64,
    pub endpoint: String,
}

impl Default for MapsSettings {
    fn default() -> Self {
        MapsSettings {
            api_key: None,
            warehouse_lat: DEFAULT_WAREHOUSE_LAT,
            warehouse_lng: DEFAULT_WAREHOUSE_LNG,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Where the override store lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Defaults to `buildmart.db` in the platform data directory.
    pub database_path: Option<PathBuf>,
}

// =============================================================================
// AppConfig
// =============================================================================

/// Complete application configuration, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub business: BusinessConfig,

    #[serde(default)]
    pub maps: MapsSettings,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform config directory)
    /// 3. `BUILDMART_*` environment variables
    ///
    /// An explicitly given file must exist; the default one is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `BUILDMART_*` overrides read through `lookup`.
    ///
    /// Unparseable numbers are logged and ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(number) = lookup("BUILDMART_WHATSAPP_NUMBER") {
            debug!("Overriding WhatsApp number from environment");
            self.business.whatsapp_number = number;
        }
        if let Some(upi) = lookup("BUILDMART_UPI_ID") {
            self.business.upi_id = upi;
        }
        if let Some(link) = lookup("BUILDMART_PAYMENT_LINK") {
            self.business.payment_link = link;
        }
        if let Some(password) = lookup("BUILDMART_ADMIN_PASSWORD") {
            self.business.admin_password = password;
        }
        if let Some(key) = lookup("BUILDMART_MAPS_API_KEY") {
            self.maps.api_key = Some(key);
        }
        if let Some(endpoint) = lookup("BUILDMART_MAPS_ENDPOINT") {
            self.maps.endpoint = endpoint;
        }
        if let Some(lat) = lookup("BUILDMART_WAREHOUSE_LAT") {
            match lat.parse() {
                Ok(value) => self.maps.warehouse_lat = value,
                Err(_) => warn!(value = %lat, "Ignoring invalid BUILDMART_WAREHOUSE_LAT"),
            }
        }
        if let Some(lng) = lookup("BUILDMART_WAREHOUSE_LNG") {
            match lng.parse() {
                Ok(value) => self.maps.warehouse_lng = value,
                Err(_) => warn!(value = %lng, "Ignoring invalid BUILDMART_WAREHOUSE_LNG"),
            }
        }
        if let Some(path) = lookup("BUILDMART_DB_PATH") {
            self.storage.database_path = Some(PathBuf::from(path));
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_whatsapp_number(&self.business.whatsapp_number)
            .map_err(|e| ConfigError::invalid("business.whatsapp_number", e.to_string()))?;

        validate_payment_link(&self.business.payment_link)
            .map_err(|e| ConfigError::invalid("business.payment_link", e.to_string()))?;

        if self.business.admin_password.is_empty() {
            return Err(ConfigError::invalid(
                "business.admin_password",
                "must not be empty",
            ));
        }

        if !(-90.0..=90.0).contains(&self.maps.warehouse_lat) {
            return Err(ConfigError::invalid(
                "maps.warehouse_lat",
                "must be between -90 and 90",
            ));
        }
        if !(-180.0..=180.0).contains(&self.maps.warehouse_lng) {
            return Err(ConfigError::invalid(
                "maps.warehouse_lng",
                "must be between -180 and 180",
            ));
        }

        Ok(())
    }

    /// Settings for the distance resolver.
    pub fn maps_config(&self) -> MapsConfig {
        MapsConfig::new(self.maps.api_key.clone())
            .with_origin(self.maps.warehouse_lat, self.maps.warehouse_lng)
            .with_endpoint(self.maps.endpoint.clone())
    }

    /// Database file to open, creating its directory if needed.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|source| ConfigError::Read {
            path: data_dir.to_path_buf(),
            source,
        })?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "buildmart", "store")
}

// =============================================================================
// Unit Tests
// =============================================================================
