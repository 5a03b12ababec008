//! # Effective Settings
//!
//! What the storefront actually runs with: stored admin overrides where
//! present, configuration and static defaults otherwise.
//!
//! ```text
//! ┌──────────────────┬─────────────────────┬──────────────────────────────┐
//! │ Value            │ Override key        │ Fallback                     │
//! ├──────────────────┼─────────────────────┼──────────────────────────────┤
//! │ products         │ products            │ default catalog              │
//! │ vehicle tiers    │ vehicles            │ default tiers                │
//! │ WhatsApp number  │ whatsapp_number     │ business.whatsapp_number     │
//! │ UPI id           │ upi_id              │ business.upi_id              │
//! │ payment link     │ payment_link        │ business.payment_link        │
//! └──────────────────┴─────────────────────┴──────────────────────────────┘
//! ```
//!
//! Stored values go through the same checks as an admin edit. A value that
//! fails them (a hand-edited row, an older build) is logged and the
//! fallback is used instead.

use serde::Serialize;
use tracing::warn;

use buildmart_core::catalog::{default_products, default_vehicles};
use buildmart_core::validation::{
    validate_amount, validate_payment_link, validate_required, validate_tax_rate,
    validate_whatsapp_number, ValidationResult,
};
use buildmart_core::{Catalog, CoreError, CoreResult, Product, VehicleTier};
use buildmart_db::StoredOverrides;

use crate::config::AppConfig;

/// Business contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub whatsapp_number: String,
    pub upi_id: String,
    pub payment_link: String,
}

/// Runtime settings, passed explicitly to every command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub catalog: Catalog,
    pub contact: Contact,
}

impl Settings {
    /// Settings with nothing overridden.
    pub fn defaults(config: &AppConfig) -> Self {
        Settings::resolve(config, StoredOverrides::default())
    }

    /// Merges stored overrides over the configuration.
    ///
    /// Each stored value is checked on its own; an invalid one falls back
    /// without discarding the others.
    pub fn resolve(config: &AppConfig, overrides: StoredOverrides) -> Self {
        let products = match overrides.products.map(checked_products).transpose() {
            Ok(products) => products.unwrap_or_else(default_products),
            Err(e) => {
                warn!(error = %e, "Stored product override unusable, using default catalog");
                default_products()
            }
        };
        let vehicles = match overrides.vehicles.map(checked_vehicles).transpose() {
            Ok(vehicles) => vehicles.unwrap_or_else(default_vehicles),
            Err(e) => {
                warn!(error = %e, "Stored vehicle override unusable, using default tiers");
                default_vehicles()
            }
        };
        // Both lists have passed the checks, so the tier list is non-empty
        let catalog = Catalog::new(products, vehicles).unwrap_or_default();

        let business = &config.business;
        let contact = Contact {
            whatsapp_number: stored_or(
                "whatsapp_number",
                overrides.whatsapp_number,
                validate_whatsapp_number,
                &business.whatsapp_number,
            ),
            upi_id: stored_or(
                "upi_id",
                overrides.upi_id,
                |upi| validate_required("upi_id", upi),
                &business.upi_id,
            ),
            payment_link: stored_or(
                "payment_link",
                overrides.payment_link,
                validate_payment_link,
                &business.payment_link,
            ),
        };

        Settings { catalog, contact }
    }

    /// Every value as an override, for "save all".
    pub fn to_overrides(&self) -> StoredOverrides {
        StoredOverrides {
            products: Some(self.catalog.products().to_vec()),
            vehicles: Some(self.catalog.vehicles().to_vec()),
            whatsapp_number: Some(self.contact.whatsapp_number.clone()),
            upi_id: Some(self.contact.upi_id.clone()),
            payment_link: Some(self.contact.payment_link.clone()),
        }
    }
}

fn checked_products(products: Vec<Product>) -> CoreResult<Vec<Product>> {
    for product in &products {
        validate_amount("price", product.price())?;
        validate_tax_rate(product.gst_rate())?;
    }
    Ok(products)
}

fn checked_vehicles(vehicles: Vec<VehicleTier>) -> CoreResult<Vec<VehicleTier>> {
    if vehicles.is_empty() {
        return Err(CoreError::NoVehicleTiers);
    }
    for vehicle in &vehicles {
        validate_amount("base_charge", vehicle.base_charge())?;
        validate_amount("per_km_rate", vehicle.per_km_rate())?;
    }
    Ok(vehicles)
}

/// The stored value if it passes `check`, else `fallback`.
fn stored_or<F>(key: &str, stored: Option<String>, check: F, fallback: &str) -> String
where
    F: Fn(&str) -> ValidationResult<()>,
{
    match stored {
        Some(value) => match check(&value) {
            Ok(()) => value,
            Err(e) => {
                warn!(key, error = %e, "Stored override unusable, using configured value");
                fallback.to_string()
            }
        },
        None => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildmart_db::{Database, DbConfig, SettingKey};

    #[test]
    fn test_defaults_follow_config() {
        let mut config = AppConfig::default();
        config.business.upi_id = "store@okaxis".to_string();

        let settings = Settings::defaults(&config);
        assert_eq!(settings.catalog, Catalog::default());
        assert_eq!(settings.contact.upi_id, "store@okaxis");
        assert_eq!(settings.contact.whatsapp_number, "919876543210");
    }

    #[test]
    fn test_overrides_win() {
        let mut products = default_products();
        products[0].base_price = 410;

        let overrides = StoredOverrides {
            products: Some(products),
            payment_link: Some("https://rzp.io/l/store".to_string()),
            ..Default::default()
        };

        let settings = Settings::resolve(&AppConfig::default(), overrides);
        assert_eq!(
            settings.catalog.find_product("cement-1").unwrap().base_price,
            410
        );
        assert_eq!(settings.catalog.vehicles().len(), 3);
        assert_eq!(settings.contact.payment_link, "https://rzp.io/l/store");
    }

    #[test]
    fn test_empty_vehicle_override_ignored() {
        let overrides = StoredOverrides {
            vehicles: Some(Vec::new()),
            ..Default::default()
        };

        let settings = Settings::resolve(&AppConfig::default(), overrides);
        assert_eq!(settings.catalog.vehicles(), default_vehicles().as_slice());
    }

    #[test]
    fn test_invalid_product_override_ignored() {
        let mut negative = default_products();
        negative[0].base_price = -380;
        let mut over_rate = default_products();
        over_rate[3].gst_rate_bps = 12_000;

        for products in [negative, over_rate] {
            let overrides = StoredOverrides {
                products: Some(products),
                upi_id: Some("store@okaxis".to_string()),
                ..Default::default()
            };
            let settings = Settings::resolve(&AppConfig::default(), overrides);
            assert_eq!(settings.catalog.products(), default_products().as_slice());
            // Valid neighbours still apply
            assert_eq!(settings.contact.upi_id, "store@okaxis");
        }
    }

    #[test]
    fn test_invalid_vehicle_override_ignored() {
        let mut vehicles = default_vehicles();
        vehicles[1].per_km_rate = -18;

        let mut products = default_products();
        products[0].base_price = 410;

        let overrides = StoredOverrides {
            products: Some(products),
            vehicles: Some(vehicles),
            ..Default::default()
        };
        let settings = Settings::resolve(&AppConfig::default(), overrides);
        assert_eq!(settings.catalog.vehicles(), default_vehicles().as_slice());
        assert_eq!(
            settings.catalog.find_product("cement-1").unwrap().base_price,
            410
        );
    }

    #[test]
    fn test_invalid_contact_override_ignored() {
        let overrides = StoredOverrides {
            whatsapp_number: Some("+91 98765".to_string()),
            payment_link: Some("ftp://example.com".to_string()),
            upi_id: Some("  ".to_string()),
            ..Default::default()
        };
        let config = AppConfig::default();
        let settings = Settings::resolve(&config, overrides);
        assert_eq!(settings.contact, Settings::defaults(&config).contact);
    }

    #[tokio::test]
    async fn test_tampered_store_row_falls_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.settings();

        let mut products = default_products();
        products[0].base_price = -1;
        products[1].gst_rate_bps = 50_000;
        repo.set(SettingKey::Products, &serde_json::to_string(&products).unwrap())
            .await
            .unwrap();

        let mut vehicles = default_vehicles();
        vehicles[0].base_charge = i64::MAX;
        repo.set(SettingKey::Vehicles, &serde_json::to_string(&vehicles).unwrap())
            .await
            .unwrap();

        let stored = repo.load_overrides().await.unwrap();
        assert!(stored.products.is_some());
        assert!(stored.vehicles.is_some());

        let settings = Settings::resolve(&AppConfig::default(), stored);
        assert_eq!(settings.catalog, Catalog::default());
    }

    #[test]
    fn test_to_overrides_round_trip() {
        let config = AppConfig::default();
        let settings = Settings::defaults(&config);
        let again = Settings::resolve(&config, settings.to_overrides());
        assert_eq!(settings, again);
    }
}
