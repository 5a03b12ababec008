//! # Settings Override Repository
//!
//! Key/value storage for everything the admin panel can change.
//!
//! ## Storage Layout
//! ```text
//! ┌──────────────────┬───────────────────────────────┬──────────────────────┐
//! │ key              │ value                         │ updated_at           │
//! ├──────────────────┼───────────────────────────────┼──────────────────────┤
//! │ products         │ [{"id":"cement-1",...}, ...]  │ 2026-10-16T09:12:... │
//! │ vehicles         │ [{"id":"mini-truck",...}, ...]│ 2026-10-16T09:12:... │
//! │ whatsapp_number  │ 919876543210                  │ 2026-10-16T09:12:... │
//! │ upi_id           │ business@upi                  │ 2026-10-16T09:12:... │
//! │ payment_link     │ https://rzp.io/l/...          │ 2026-10-16T09:12:... │
//! └──────────────────┴───────────────────────────────┴──────────────────────┘
//! ```
//!
//! A missing row means "not overridden". A list that no longer decodes is
//! treated the same way and logged.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use sqlx::SqlitePool;
use std::fmt;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use buildmart_core::{Product, VehicleTier};

// =============================================================================
// Keys
// =============================================================================

/// Override keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Products,
    Vehicles,
    WhatsappNumber,
    UpiId,
    PaymentLink,
}

impl SettingKey {
    pub const ALL: [SettingKey; 5] = [
        SettingKey::Products,
        SettingKey::Vehicles,
        SettingKey::WhatsappNumber,
        SettingKey::UpiId,
        SettingKey::PaymentLink,
    ];

    /// Column value used in `settings_overrides.key`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Products => "products",
            SettingKey::Vehicles => "vehicles",
            SettingKey::WhatsappNumber => "whatsapp_number",
            SettingKey::UpiId => "upi_id",
            SettingKey::PaymentLink => "payment_link",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Stored Overrides
// =============================================================================

/// Every override, decoded. `None` means the default applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredOverrides {
    pub products: Option<Vec<Product>>,
    pub vehicles: Option<Vec<VehicleTier>>,
    pub whatsapp_number: Option<String>,
    pub upi_id: Option<String>,
    pub payment_link: Option<String>,
}

impl StoredOverrides {
    /// True when nothing is overridden.
    pub fn is_empty(&self) -> bool {
        self.products.is_none()
            && self.vehicles.is_none()
            && self.whatsapp_number.is_none()
            && self.upi_id.is_none()
            && self.payment_link.is_none()
    }

    /// Encodes each override to its stored text form.
    fn encode(&self) -> DbResult<Vec<(SettingKey, Option<String>)>> {
        Ok(vec![
            (
                SettingKey::Products,
                self.products.as_ref().map(serde_json::to_string).transpose()?,
            ),
            (
                SettingKey::Vehicles,
                self.vehicles.as_ref().map(serde_json::to_string).transpose()?,
            ),
            (SettingKey::WhatsappNumber, self.whatsapp_number.clone()),
            (SettingKey::UpiId, self.upi_id.clone()),
            (SettingKey::PaymentLink, self.payment_link.clone()),
        ])
    }
}

fn decode_list<T: DeserializeOwned>(key: SettingKey, raw: Option<String>) -> Option<Vec<T>> {
    let raw = raw?;
    match serde_json::from_str(&raw) {
        Ok(list) => Some(list),
        Err(e) => {
            warn!(key = %key, error = %e, "Ignoring unreadable stored override");
            None
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the settings override table.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Reads the raw stored value for `key`.
    pub async fn get(&self, key: SettingKey) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings_overrides WHERE key = ?1")
                .bind(key.as_str())
                .fetch_optional(&self.pool)
                .await?;
        Ok(value)
    }

    /// Inserts or replaces the value for `key`.
    pub async fn set(&self, key: SettingKey, value: &str) -> DbResult<()> {
        debug!(key = %key, "Storing override");

        sqlx::query(
            r#"
            INSERT INTO settings_overrides (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key.as_str())
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes the override for `key`. Returns whether a row existed.
    pub async fn remove(&self, key: SettingKey) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM settings_overrides WHERE key = ?1")
            .bind(key.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reads and decodes every override.
    pub async fn load_overrides(&self) -> DbResult<StoredOverrides> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT key, value FROM settings_overrides")
                .fetch_all(&self.pool)
                .await?;

        let mut raw_products = None;
        let mut raw_vehicles = None;
        let mut overrides = StoredOverrides::default();

        for (key, value) in rows {
            match key.as_str() {
                "products" => raw_products = Some(value),
                "vehicles" => raw_vehicles = Some(value),
                "whatsapp_number" => overrides.whatsapp_number = Some(value),
                "upi_id" => overrides.upi_id = Some(value),
                "payment_link" => overrides.payment_link = Some(value),
                other => debug!(key = %other, "Skipping unknown override key"),
            }
        }

        overrides.products = decode_list(SettingKey::Products, raw_products);
        overrides.vehicles = decode_list(SettingKey::Vehicles, raw_vehicles);

        debug!(empty = overrides.is_empty(), "Loaded overrides");
        Ok(overrides)
    }

    /// Writes every override in one transaction.
    ///
    /// Keys set to `None` are deleted, so after a save the table holds
    /// exactly `overrides`. All rows share one `updated_at`.
    pub async fn save_overrides(&self, overrides: &StoredOverrides) -> DbResult<()> {
        let entries = overrides.encode()?;
        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        for (key, value) in entries {
            match value {
                Some(value) => {
                    sqlx::query(
                        r#"
                        INSERT INTO settings_overrides (key, value, updated_at)
                        VALUES (?1, ?2, ?3)
                        ON CONFLICT(key) DO UPDATE SET
                            value = excluded.value,
                            updated_at = excluded.updated_at
                        "#,
                    )
                    .bind(key.as_str())
                    .bind(value)
                    .bind(now)
                    .execute(&mut *tx)
                    .await?;
                }
                None => {
                    sqlx::query("DELETE FROM settings_overrides WHERE key = ?1")
                        .bind(key.as_str())
                        .execute(&mut *tx)
                        .await?;
                }
            }
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!("Saved admin overrides");
        Ok(())
    }

    /// Deletes every override. Returns the number of rows removed.
    pub async fn reset(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM settings_overrides")
            .execute(&self.pool)
            .await?;

        info!(removed = result.rows_affected(), "Reset admin overrides");
        Ok(result.rows_affected())
    }

    /// Time of the most recent write, if anything is stored.
    pub async fn last_saved_at(&self) -> DbResult<Option<DateTime<Utc>>> {
        let latest: Option<DateTime<Utc>> = sqlx::query_scalar(
            "SELECT updated_at FROM settings_overrides ORDER BY updated_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(latest)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use buildmart_core::catalog::{default_products, default_vehicles};

    async fn repo() -> SettingsRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.settings()
    }

    #[tokio::test]
    async fn test_empty_store() {
        let repo = repo().await;

        let overrides = repo.load_overrides().await.unwrap();
        assert!(overrides.is_empty());
        assert!(repo.last_saved_at().await.unwrap().is_none());
        assert!(repo.get(SettingKey::UpiId).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let repo = repo().await;

        repo.set(SettingKey::UpiId, "shop@upi").await.unwrap();
        repo.set(SettingKey::UpiId, "store@upi").await.unwrap();
        assert_eq!(
            repo.get(SettingKey::UpiId).await.unwrap().as_deref(),
            Some("store@upi")
        );

        assert!(repo.remove(SettingKey::UpiId).await.unwrap());
        assert!(!repo.remove(SettingKey::UpiId).await.unwrap());
        assert!(repo.get(SettingKey::UpiId).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_all_keys() {
        let repo = repo().await;

        let mut products = default_products();
        products[0].base_price = 400;
        let mut vehicles = default_vehicles();
        vehicles[1].per_km_rate = 20;

        let overrides = StoredOverrides {
            products: Some(products.clone()),
            vehicles: Some(vehicles.clone()),
            whatsapp_number: Some("919000000001".to_string()),
            upi_id: Some("store@upi".to_string()),
            payment_link: Some("https://rzp.io/l/store".to_string()),
        };
        repo.save_overrides(&overrides).await.unwrap();

        let loaded = repo.load_overrides().await.unwrap();
        assert_eq!(loaded, overrides);
        assert_eq!(loaded.products.unwrap()[0].base_price, 400);
        assert!(repo.last_saved_at().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_removes_cleared_keys() {
        let repo = repo().await;
        repo.set(SettingKey::PaymentLink, "https://rzp.io/l/old").await.unwrap();

        let overrides = StoredOverrides {
            upi_id: Some("store@upi".to_string()),
            ..Default::default()
        };
        repo.save_overrides(&overrides).await.unwrap();

        assert!(repo.get(SettingKey::PaymentLink).await.unwrap().is_none());
        assert_eq!(repo.load_overrides().await.unwrap(), overrides);
    }

    #[tokio::test]
    async fn test_reset() {
        let repo = repo().await;
        repo.set(SettingKey::WhatsappNumber, "919000000001").await.unwrap();
        repo.set(SettingKey::UpiId, "store@upi").await.unwrap();

        assert_eq!(repo.reset().await.unwrap(), 2);
        assert!(repo.load_overrides().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_list_is_ignored() {
        let repo = repo().await;
        repo.set(SettingKey::Products, "{not json").await.unwrap();
        repo.set(SettingKey::UpiId, "store@upi").await.unwrap();

        let loaded = repo.load_overrides().await.unwrap();
        assert!(loaded.products.is_none());
        assert_eq!(loaded.upi_id.as_deref(), Some("store@upi"));
    }

    #[test]
    fn test_key_names() {
        let names: Vec<&str> = SettingKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            ["products", "vehicles", "whatsapp_number", "upi_id", "payment_link"]
        );
    }
}
