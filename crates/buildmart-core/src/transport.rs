//! # Transport Pricing
//!
//! Shipment weight estimation and vehicle tier selection.
//!
//! ## Tier Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  weight 1200 kg, tiers in list order                                   │
//! │                                                                         │
//! │  Mini Truck  cap  1000  ── 1200 > 1000, skip                           │
//! │  Lorry       cap  5000  ── 1200 ≤ 5000, SELECT                         │
//! │  Tipper      cap 15000                                                  │
//! │                                                                         │
//! │  weight 20000 kg: nothing fits, the last tier carries it anyway         │
//! │                                                                         │
//! │  total = base charge + round(distance km × per km rate)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Category, TransportBreakdown, TransportLine, VehicleTier};

// =============================================================================
// Weight Estimation
// =============================================================================

/// Estimates the shipment weight in kg from the category and quantity.
///
/// | Category          | kg per unit |
/// |-------------------|-------------|
/// | Cement            | 50 (bag)    |
/// | Steel             | 1           |
/// | Bricks            | 3           |
/// | Sand & Aggregates | 1000 (ton)  |
/// | anything else     | 10          |
pub fn estimate_weight_kg(category: &Category, quantity: u32) -> u64 {
    let per_unit: u64 = match category {
        Category::Cement => 50,
        Category::Steel => 1,
        Category::Bricks => 3,
        Category::SandAndAggregates => 1000,
        Category::Other(_) => 10,
    };
    per_unit * u64::from(quantity)
}

// =============================================================================
// Tier Selection
// =============================================================================

/// Picks the first tier whose capacity covers `weight_kg`, else the last tier.
///
/// ## Errors
/// `CoreError::NoVehicleTiers` if `tiers` is empty.
pub fn select_vehicle(weight_kg: u64, tiers: &[VehicleTier]) -> CoreResult<&VehicleTier> {
    tiers
        .iter()
        .find(|tier| weight_kg <= tier.max_capacity_kg)
        .or_else(|| tiers.last())
        .ok_or(CoreError::NoVehicleTiers)
}

/// Prices delivery of `weight_kg` over `distance_km`.
///
/// ## Errors
/// - `CoreError::NoVehicleTiers` if `tiers` is empty
/// - `CoreError::AmountOverflow` if the distance charge or the total leaves
///   the `i64` range
///
/// ## Example
/// ```rust
/// use buildmart_core::catalog::default_vehicles;
/// use buildmart_core::transport::price_transport;
///
/// let transport = price_transport(1200, 10.0, &default_vehicles()).unwrap();
/// assert_eq!(transport.vehicle.id, "lorry");
/// assert_eq!(transport.total_transport_cost.rupees(), 1380);
/// ```
pub fn price_transport(
    weight_kg: u64,
    distance_km: f64,
    tiers: &[VehicleTier],
) -> CoreResult<TransportBreakdown> {
    let vehicle = select_vehicle(weight_kg, tiers)?;

    let base_charge = vehicle.base_charge();
    let distance_charge = Money::round_from(distance_km * vehicle.per_km_rate as f64)?;
    // Both terms are whole rupees already
    let total_transport_cost = base_charge.checked_add(distance_charge)?;

    Ok(TransportBreakdown {
        vehicle: vehicle.clone(),
        base_charge,
        distance_charge,
        total_transport_cost,
        breakdown: TransportLine {
            vehicle_name: vehicle.name.clone(),
            base_charge,
            per_km_rate: vehicle.per_km_rate(),
            distance_km,
            distance_charge,
        },
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_vehicles;
    use proptest::prelude::*;

    #[test]
    fn test_weight_table() {
        assert_eq!(estimate_weight_kg(&Category::Cement, 2), 100);
        assert_eq!(estimate_weight_kg(&Category::Steel, 750), 750);
        assert_eq!(estimate_weight_kg(&Category::Bricks, 1000), 3000);
        assert_eq!(estimate_weight_kg(&Category::SandAndAggregates, 3), 3000);
        assert_eq!(estimate_weight_kg(&Category::from("Tiles"), 4), 40);
    }

    #[test]
    fn test_lorry_for_1200_kg() {
        let transport = price_transport(1200, 10.0, &default_vehicles()).unwrap();

        assert_eq!(transport.vehicle.id, "lorry");
        assert_eq!(transport.base_charge.rupees(), 1200);
        assert_eq!(transport.distance_charge.rupees(), 180);
        assert_eq!(transport.total_transport_cost.rupees(), 1380);

        let line = &transport.breakdown;
        assert_eq!(line.vehicle_name, "Lorry");
        assert_eq!(line.per_km_rate.rupees(), 18);
        assert_eq!(line.distance_km, 10.0);
    }

    #[test]
    fn test_overflow_uses_last_tier() {
        let transport = price_transport(20_000, 15.0, &default_vehicles()).unwrap();
        assert_eq!(transport.vehicle.id, "tipper");
        assert_eq!(transport.distance_charge.rupees(), 375);
        assert_eq!(transport.total_transport_cost.rupees(), 2875);
    }

    #[test]
    fn test_capacity_boundary_is_inclusive() {
        let tiers = default_vehicles();
        assert_eq!(select_vehicle(1000, &tiers).unwrap().id, "mini-truck");
        assert_eq!(select_vehicle(1001, &tiers).unwrap().id, "lorry");
        assert_eq!(select_vehicle(15_000, &tiers).unwrap().id, "tipper");
    }

    #[test]
    fn test_fractional_distance_rounds_charge() {
        // 12.4 km × ₹12 = ₹148.8 → ₹149
        let transport = price_transport(100, 12.4, &default_vehicles()).unwrap();
        assert_eq!(transport.distance_charge.rupees(), 149);
        assert_eq!(transport.breakdown.distance_charge.rupees(), 149);
        assert_eq!(transport.total_transport_cost.rupees(), 649);
    }

    #[test]
    fn test_oversized_rates_are_an_error() {
        let mut tiers = default_vehicles();
        tiers[0].per_km_rate = i64::MAX;
        let err = price_transport(100, 15.0, &tiers).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow));

        let mut tiers = default_vehicles();
        tiers[0].base_charge = i64::MAX;
        let err = price_transport(100, 15.0, &tiers).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow));
    }

    #[test]
    fn test_empty_tiers() {
        let err = price_transport(10, 1.0, &[]).unwrap_err();
        assert!(matches!(err, CoreError::NoVehicleTiers));
    }

    proptest! {
        #[test]
        fn prop_selects_smallest_adequate_tier(weight in 0u64..=15_000) {
            let tiers = default_vehicles();
            let chosen = select_vehicle(weight, &tiers).unwrap();

            prop_assert!(chosen.max_capacity_kg >= weight);
            for tier in &tiers {
                if tier.max_capacity_kg >= weight {
                    prop_assert!(chosen.max_capacity_kg <= tier.max_capacity_kg);
                }
            }
        }

        #[test]
        fn prop_overflow_never_fails(weight in 15_001u64..10_000_000, km in 0.0f64..500.0) {
            let tiers = default_vehicles();
            let transport = price_transport(weight, km, &tiers).unwrap();
            prop_assert_eq!(transport.vehicle.id.as_str(), "tipper");
            prop_assert_eq!(
                transport.total_transport_cost,
                transport.base_charge.checked_add(transport.distance_charge).unwrap()
            );
        }
    }
}
