//! # Domain Types
//!
//! Core domain types used throughout BuildMart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Reference data (static defaults, admin may override)                   │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  VehicleTier    │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id ("cement-1")│   │  id ("lorry")   │   │  bps (u32)      │       │
//! │  │  category       │   │  max_capacity   │   │  2800 = 28%     │       │
//! │  │  base_price     │   │  base_charge    │   └─────────────────┘       │
//! │  │  gst_rate_bps   │   │  per_km_rate    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  Derived per request (never persisted)                                  │
//! │  ┌─────────────────┐   ┌────────────────────┐   ┌──────────────────┐   │
//! │  │  TaxBreakdown   │   │ TransportBreakdown │   │  DistanceResult  │   │
//! │  └─────────────────┘   └────────────────────┘   └──────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// GST rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2800 bps = 28% (cement), 500 bps = 5% (sand)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a whole percentage.
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        TaxRate(percent * 100)
    }

    /// Creates a tax rate from a fractional percentage (e.g. 2.5).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Prints `28%`, or `2.5%` for fractional rates.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}%", self.percentage())
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product category.
///
/// Serialized as its display string (`"Sand & Aggregates"`), so stored
/// catalogs and the browser front end share one spelling. Unknown strings
/// are kept verbatim in [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Cement,
    Steel,
    Bricks,
    SandAndAggregates,
    Other(String),
}

impl Category {
    /// The categories the catalog offers as filters, in display order.
    pub const KNOWN: [Category; 4] = [
        Category::Cement,
        Category::Steel,
        Category::Bricks,
        Category::SandAndAggregates,
    ];

    /// Returns the display name.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Cement => "Cement",
            Category::Steel => "Steel",
            Category::Bricks => "Bricks",
            Category::SandAndAggregates => "Sand & Aggregates",
            Category::Other(name) => name,
        }
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Cement" => Category::Cement,
            "Steel" => Category::Steel,
            "Bricks" => Category::Bricks,
            "Sand & Aggregates" => Category::SandAndAggregates,
            _ => Category::Other(name),
        }
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Category::from(name.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A construction material offered in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier used in links and overrides ("cement-1").
    pub id: String,

    /// Category; drives the shipment weight estimate.
    #[ts(type = "string")]
    pub category: Category,

    /// Display name.
    pub name: String,

    /// Price per unit in rupees, before GST.
    pub base_price: i64,

    /// Unit label ("bag (50kg)", "kg", "piece", "ton").
    pub unit: String,

    /// GST rate in basis points (2800 = 28%).
    pub gst_rate_bps: u32,

    pub description: String,

    /// Image URL shown on the product card.
    pub image: String,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_rupees(self.base_price)
    }

    /// Returns the GST rate.
    #[inline]
    pub fn gst_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.gst_rate_bps)
    }
}

// =============================================================================
// Vehicle Tier
// =============================================================================

/// A delivery vehicle pricing bracket.
///
/// Tiers are kept in ascending capacity order; the order is what tier
/// selection scans, so it is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTier {
    pub id: String,
    pub name: String,

    /// Maximum payload in kg. Advisory for the last tier.
    pub max_capacity_kg: u64,

    /// Fixed charge per trip, in rupees.
    pub base_charge: i64,

    /// Charge per km, in rupees.
    pub per_km_rate: i64,

    /// Human description ("1-5 tons").
    pub description: String,
}

impl VehicleTier {
    #[inline]
    pub fn base_charge(&self) -> Money {
        Money::from_rupees(self.base_charge)
    }

    #[inline]
    pub fn per_km_rate(&self) -> Money {
        Money::from_rupees(self.per_km_rate)
    }
}

// =============================================================================
// Distance
// =============================================================================

/// Distance used by the fallback estimate, in km.
pub const FALLBACK_DISTANCE_KM: f64 = 15.0;

/// Resolved delivery distance from the warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DistanceResult {
    /// Kilometres, one decimal place.
    pub distance_km: f64,

    /// Provider formatted distance ("12.4 km").
    pub distance_text: String,

    /// Provider formatted travel time ("28 mins").
    pub duration_text: String,

    /// True when this is the fixed estimate, not a provider answer.
    pub is_fallback: bool,
}

impl DistanceResult {
    /// Creates a resolved (non-fallback) result.
    pub fn resolved(
        distance_km: f64,
        distance_text: impl Into<String>,
        duration_text: impl Into<String>,
    ) -> Self {
        DistanceResult {
            distance_km,
            distance_text: distance_text.into(),
            duration_text: duration_text.into(),
            is_fallback: false,
        }
    }

    /// The fixed conservative estimate used whenever the lookup fails.
    pub fn fallback() -> Self {
        DistanceResult {
            distance_km: FALLBACK_DISTANCE_KM,
            distance_text: "15 km (estimated)".to_string(),
            duration_text: "30 mins (estimated)".to_string(),
            is_fallback: true,
        }
    }
}

// =============================================================================
// Breakdowns
// =============================================================================

/// GST breakdown for one product line.
///
/// `total_with_tax` is always exactly `material_cost + tax_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub material_cost: Money,
    pub tax_amount: Money,
    pub total_with_tax: Money,
    pub tax_rate: TaxRate,
}

/// Display record of how a transport charge was built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransportLine {
    pub vehicle_name: String,
    pub base_charge: Money,
    pub per_km_rate: Money,
    pub distance_km: f64,
    pub distance_charge: Money,
}

/// Transport pricing for one shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransportBreakdown {
    pub vehicle: VehicleTier,
    pub base_charge: Money,
    pub distance_charge: Money,
    pub total_transport_cost: Money,
    pub breakdown: TransportLine,
}

// =============================================================================
// Requests
// =============================================================================

/// Customer identity fields collected by the order form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub pincode: String,
}

/// One in-flight quote. Owned by a single interaction and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub product_id: String,
    pub quantity: u32,
    pub destination: String,
    /// Filled in by the distance resolver.
    pub distance: Option<DistanceResult>,
    /// Whether the customer wants a GST invoice.
    pub gst_invoice: bool,
}

impl QuoteRequest {
    /// Creates a request with no resolved distance and a GST invoice requested.
    pub fn new(product_id: impl Into<String>, quantity: u32, destination: impl Into<String>) -> Self {
        QuoteRequest {
            product_id: product_id.into(),
            quantity: quantity.max(1),
            destination: destination.into(),
            distance: None,
            gst_invoice: true,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(2800);
        assert_eq!(rate.bps(), 2800);
        assert!((rate.percentage() - 28.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(2.5).bps(), 250);
        assert_eq!(TaxRate::from_percent(18).bps(), 1800);
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::from_percent(28).to_string(), "28%");
        assert_eq!(TaxRate::from_bps(250).to_string(), "2.5%");
    }

    #[test]
    fn test_category_round_trips_through_display_string() {
        let json = serde_json::to_string(&Category::SandAndAggregates).unwrap();
        assert_eq!(json, "\"Sand & Aggregates\"");

        let parsed: Category = serde_json::from_str("\"Tiles\"").unwrap();
        assert_eq!(parsed, Category::Other("Tiles".to_string()));
        assert_eq!(parsed.to_string(), "Tiles");
    }

    #[test]
    fn test_fallback_distance() {
        let fallback = DistanceResult::fallback();
        assert_eq!(fallback.distance_km, 15.0);
        assert_eq!(fallback.distance_text, "15 km (estimated)");
        assert_eq!(fallback.duration_text, "30 mins (estimated)");
        assert!(fallback.is_fallback);
    }

    #[test]
    fn test_quote_request_clamps_quantity() {
        let request = QuoteRequest::new("cement-1", 0, "Sector 18, Noida");
        assert_eq!(request.quantity, 1);
        assert!(request.distance.is_none());
        assert!(request.gst_invoice);
    }
}
