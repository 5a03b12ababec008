//! # GST Calculation
//!
//! Material cost and GST for one product line.
//!
//! ## Rounding Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PER-TERM ROUNDING                                                      │
//! │                                                                         │
//! │  material = round(unit price × quantity)                               │
//! │  gst      = round(material × rate / 100)                               │
//! │  total    = material + gst            ← no further rounding            │
//! │                                                                         │
//! │  Order messages print material, gst and total side by side, so the     │
//! │  total must be the sum of the two printed figures.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{TaxBreakdown, TaxRate};

/// Computes material cost, GST and the GST-inclusive total.
///
/// Pure: callers clamp `quantity` to at least 1 beforehand.
///
/// ## Errors
/// `CoreError::AmountOverflow` if any term leaves the `i64` range. Prices
/// within `MAX_UNIT_PRICE` never get there.
///
/// ## Example
/// ```rust
/// use buildmart_core::money::Money;
/// use buildmart_core::tax::compute_tax;
/// use buildmart_core::types::TaxRate;
///
/// let gst = compute_tax(Money::from_rupees(1800), 3, TaxRate::from_percent(5)).unwrap();
/// assert_eq!(gst.material_cost.rupees(), 5400);
/// assert_eq!(gst.tax_amount.rupees(), 270);
/// assert_eq!(gst.total_with_tax.rupees(), 5670);
/// ```
pub fn compute_tax(unit_price: Money, quantity: u32, rate: TaxRate) -> CoreResult<TaxBreakdown> {
    // Integer price × integer quantity is already a whole rupee amount
    let material_cost = unit_price.multiply_quantity(quantity)?;
    let tax_amount = material_cost.calculate_tax(rate)?;

    Ok(TaxBreakdown {
        material_cost,
        tax_amount,
        total_with_tax: material_cost.checked_add(tax_amount)?,
        tax_rate: rate,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cement_two_bags() {
        let gst = compute_tax(Money::from_rupees(380), 2, TaxRate::from_percent(28)).unwrap();
        assert_eq!(gst.material_cost.rupees(), 760);
        assert_eq!(gst.tax_amount.rupees(), 213);
        assert_eq!(gst.total_with_tax.rupees(), 973);
        assert_eq!(gst.tax_rate, TaxRate::from_percent(28));
    }

    #[test]
    fn test_zero_rate() {
        let gst = compute_tax(Money::from_rupees(65), 100, TaxRate::zero()).unwrap();
        assert_eq!(gst.material_cost.rupees(), 6500);
        assert!(gst.tax_amount.is_zero());
        assert_eq!(gst.total_with_tax, gst.material_cost);
    }

    #[test]
    fn test_bricks_fractional_gst() {
        // 7 × ₹6 = ₹42, 12% = ₹5.04 → ₹5
        let gst = compute_tax(Money::from_rupees(6), 7, TaxRate::from_percent(12)).unwrap();
        assert_eq!(gst.tax_amount.rupees(), 5);
        assert_eq!(gst.total_with_tax.rupees(), 47);
    }

    #[test]
    fn test_overflowing_line_is_an_error() {
        let err = compute_tax(
            Money::from_rupees(1_000_000_000_000_000),
            crate::MAX_ORDER_QUANTITY,
            TaxRate::from_percent(28),
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::CoreError::AmountOverflow));
    }

    #[test]
    fn test_deterministic() {
        let a = compute_tax(Money::from_rupees(63), 250, TaxRate::from_percent(18)).unwrap();
        let b = compute_tax(Money::from_rupees(63), 250, TaxRate::from_percent(18)).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_total_is_sum_of_rounded_terms(
            price in 0i64..100_000,
            qty in 1u32..10_000,
            bps in 0u32..10_000,
        ) {
            let gst = compute_tax(Money::from_rupees(price), qty, TaxRate::from_bps(bps)).unwrap();

            prop_assert_eq!(gst.total_with_tax, gst.material_cost.checked_add(gst.tax_amount).unwrap());

            let exact_material = price as f64 * qty as f64;
            prop_assert!((gst.material_cost.rupees() as f64 - exact_material).abs() <= 0.5);

            let exact_tax = gst.material_cost.rupees() as f64 * bps as f64 / 10_000.0;
            prop_assert!((gst.tax_amount.rupees() as f64 - exact_tax).abs() <= 0.5 + 1e-9);
            prop_assert!(!gst.tax_amount.is_negative());
        }

        #[test]
        fn prop_capped_prices_never_overflow(
            price in 0i64..=crate::MAX_UNIT_PRICE,
            qty in 1u32..=crate::MAX_ORDER_QUANTITY,
            bps in 0u32..=10_000,
        ) {
            let gst = compute_tax(Money::from_rupees(price), qty, TaxRate::from_bps(bps));
            prop_assert!(gst.is_ok());
            prop_assert!(!gst.unwrap().total_with_tax.is_negative());
        }
    }
}
