//! # Quote Assembly
//!
//! Combines the GST breakdown and the transport breakdown into the
//! estimated total shown on the product page.
//!
//! ```text
//! Product + quantity ──► compute_tax ──────────────┐
//!        │                                         ▼
//!        └─► estimate_weight_kg ─┐          assemble_quote ──► estimated total
//!                                ▼                 ▲
//! DistanceResult ───────────► price_transport ─────┘   (only once distance known)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::tax::compute_tax;
use crate::transport::{estimate_weight_kg, price_transport};
use crate::types::{DistanceResult, Product, TaxBreakdown, TransportBreakdown, VehicleTier};

/// Estimated total: GST-inclusive material cost plus transport when priced.
pub fn assemble_quote(
    tax: &TaxBreakdown,
    transport: Option<&TransportBreakdown>,
) -> CoreResult<Money> {
    let transport_cost = transport.map_or(Money::zero(), |t| t.total_transport_cost);
    tax.total_with_tax.checked_add(transport_cost)
}

/// A fully computed quote for one product line.
///
/// Everything an order message needs is captured here, so the message can
/// be rendered without going back to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub product_id: String,
    pub product_name: String,
    pub unit: String,
    pub quantity: u32,
    pub weight_kg: u64,
    pub tax: TaxBreakdown,
    pub distance: Option<DistanceResult>,
    pub transport: Option<TransportBreakdown>,
    pub estimated_total: Money,
}

impl Quote {
    /// Computes a quote. A `quantity` of zero is treated as one.
    ///
    /// Without a distance the quote carries the GST-inclusive material cost
    /// only.
    ///
    /// ## Errors
    /// - `CoreError::NoVehicleTiers` when a distance is given but `tiers` is empty
    /// - `CoreError::AmountOverflow` when an amount leaves the `i64` range
    pub fn build(
        product: &Product,
        quantity: u32,
        distance: Option<&DistanceResult>,
        tiers: &[VehicleTier],
    ) -> CoreResult<Self> {
        let quantity = quantity.max(1);
        let weight_kg = estimate_weight_kg(&product.category, quantity);
        let tax = compute_tax(product.price(), quantity, product.gst_rate())?;

        let transport = distance
            .map(|d| price_transport(weight_kg, d.distance_km, tiers))
            .transpose()?;

        let estimated_total = assemble_quote(&tax, transport.as_ref())?;

        Ok(Quote {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            unit: product.unit.clone(),
            quantity,
            weight_kg,
            tax,
            distance: distance.cloned(),
            transport,
            estimated_total,
        })
    }

    /// True once transport has been priced.
    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use proptest::prelude::*;

    #[test]
    fn test_quote_without_distance() {
        let catalog = Catalog::default();
        let cement = catalog.find_product("cement-1").unwrap();

        let quote = Quote::build(cement, 2, None, catalog.vehicles()).unwrap();
        assert_eq!(quote.weight_kg, 100);
        assert_eq!(quote.tax.total_with_tax.rupees(), 973);
        assert!(quote.transport.is_none());
        assert_eq!(quote.estimated_total.rupees(), 973);
    }

    #[test]
    fn test_quote_with_distance() {
        let catalog = Catalog::default();
        let cement = catalog.find_product("cement-1").unwrap();
        let distance = DistanceResult::resolved(10.0, "10.0 km", "22 mins");

        // 24 bags = 1200 kg → lorry, ₹1,200 + ₹180
        let quote = Quote::build(cement, 24, Some(&distance), catalog.vehicles()).unwrap();
        let transport = quote.transport.as_ref().unwrap();
        assert_eq!(transport.vehicle.id, "lorry");
        assert_eq!(transport.total_transport_cost.rupees(), 1380);

        // 24 × ₹380 = ₹9,120; GST 28% = ₹2,553.6 → ₹2,554
        assert_eq!(quote.tax.total_with_tax.rupees(), 11_674);
        assert_eq!(quote.estimated_total.rupees(), 11_674 + 1380);
    }

    #[test]
    fn test_fallback_distance_priced_transparently() {
        let catalog = Catalog::default();
        let sand = catalog.find_product("sand-1").unwrap();

        let quote = Quote::build(sand, 20, Some(&DistanceResult::fallback()), catalog.vehicles())
            .unwrap();
        let transport = quote.transport.unwrap();
        assert_eq!(transport.vehicle.id, "tipper");
        assert_eq!(transport.breakdown.distance_km, 15.0);
        assert_eq!(transport.distance_charge.rupees(), 375);
    }

    #[test]
    fn test_zero_quantity_clamped() {
        let catalog = Catalog::default();
        let bricks = catalog.find_product("bricks-1").unwrap();
        let quote = Quote::build(bricks, 0, None, catalog.vehicles()).unwrap();
        assert_eq!(quote.quantity, 1);
        assert_eq!(quote.tax.material_cost.rupees(), 8);
    }

    #[test]
    fn test_assemble_quote_sums_parts() {
        let catalog = Catalog::default();
        let steel = catalog.find_product("steel-2").unwrap();
        let quote = Quote::build(steel, 500, Some(&DistanceResult::fallback()), catalog.vehicles())
            .unwrap();

        let transport = quote.transport.as_ref().unwrap();
        assert_eq!(
            assemble_quote(&quote.tax, Some(transport)).unwrap(),
            quote
                .tax
                .total_with_tax
                .checked_add(transport.total_transport_cost)
                .unwrap()
        );
        assert_eq!(assemble_quote(&quote.tax, None).unwrap(), quote.tax.total_with_tax);
    }

    #[test]
    fn test_unbounded_price_fails_instead_of_wrapping() {
        let catalog = Catalog::default();
        let mut cement = catalog.find_product("cement-1").unwrap().clone();
        cement.base_price = 1_000_000_000_000_000;

        let err = Quote::build(&cement, crate::MAX_ORDER_QUANTITY, None, catalog.vehicles())
            .unwrap_err();
        assert!(matches!(err, crate::CoreError::AmountOverflow));
    }

    #[test]
    fn test_largest_allowed_quote() {
        let catalog = Catalog::default();
        let mut steel = catalog.find_product("steel-2").unwrap().clone();
        steel.base_price = crate::MAX_UNIT_PRICE;

        let quote = Quote::build(
            &steel,
            crate::MAX_ORDER_QUANTITY,
            Some(&DistanceResult::fallback()),
            catalog.vehicles(),
        )
        .unwrap();
        assert!(quote.estimated_total.rupees() > 0);
    }

    proptest! {
        #[test]
        fn prop_quote_is_deterministic(
            index in 0usize..10,
            qty in 1u32..5_000,
            km in 0.0f64..300.0,
        ) {
            let catalog = Catalog::default();
            let product = &catalog.products()[index];
            let distance = DistanceResult::resolved(km, format!("{km} km"), "-");

            let a = Quote::build(product, qty, Some(&distance), catalog.vehicles()).unwrap();
            let b = Quote::build(product, qty, Some(&distance), catalog.vehicles()).unwrap();
            prop_assert_eq!(a.estimated_total, b.estimated_total);
            prop_assert_eq!(a, b);
        }
    }
}
