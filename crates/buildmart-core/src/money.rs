//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Every amount shown to a customer in a quote is a whole rupee:          │
//! │    material ₹760 + GST ₹213 + transport ₹1,380 = ₹2,353                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Rupees                                           │
//! │    Fractional intermediate values (212.8, 10.5 km × ₹18) are rounded   │
//! │    ONCE, per term, at the point they become a rupee amount.            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use buildmart_core::money::Money;
//!
//! let price = Money::from_rupees(380);
//! let line = price.multiply_quantity(2).unwrap();
//! assert_eq!(line.rupees(), 760);
//!
//! // Distance charges are the only fractional input
//! let charge = Money::round_from(10.5 * 18.0).unwrap();
//! assert_eq!(charge.rupees(), 189);
//! ```
//!
//! ## Overflow
//! Every operation that can leave the `i64` range is checked and returns
//! `CoreError::AmountOverflow`. There are no `+`/`*` operators on `Money`,
//! so a quote either adds up or fails; it never wraps to a negative total.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole rupees.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.base_price ──► material cost ──► GST ──► total with GST       │
/// │                                                        │                │
/// │  VehicleTier.base_charge ──┐                           │                │
/// │  VehicleTier.per_km_rate ──┴──► transport total ───────┤                │
/// │                                                        ▼                │
/// │                                              estimated total           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees)
    }

    /// Rounds a fractional rupee amount to the nearest rupee.
    ///
    /// Halves round away from zero (`212.5 → 213`, `-0.5 → -1`), which is
    /// what every rounded sub-total in a quote relies on.
    ///
    /// ## Errors
    /// `CoreError::AmountOverflow` for NaN, infinities and values outside
    /// the `i64` range.
    ///
    /// ## Example
    /// ```rust
    /// use buildmart_core::money::Money;
    ///
    /// assert_eq!(Money::round_from(212.8).unwrap().rupees(), 213);
    /// assert_eq!(Money::round_from(212.5).unwrap().rupees(), 213);
    /// assert_eq!(Money::round_from(212.4).unwrap().rupees(), 212);
    /// ```
    pub fn round_from(value: f64) -> CoreResult<Self> {
        let rounded = value.round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range
        if !rounded.is_finite() || rounded >= i64::MAX as f64 || rounded < i64::MIN as f64 {
            return Err(CoreError::AmountOverflow);
        }
        Ok(Money(rounded as i64))
    }

    /// Returns the value in rupees.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates GST on this amount, rounded half away from zero.
    ///
    /// ## Implementation
    /// Integer math on basis points: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides the rounding (5000/10000 = 0.5). Negative amounts
    /// are rounded on their magnitude so halves still move away from zero.
    ///
    /// ## Errors
    /// `CoreError::AmountOverflow` if the tax does not fit in an `i64`
    /// (only possible with rates above 100%).
    ///
    /// ## Example
    /// ```rust
    /// use buildmart_core::money::Money;
    /// use buildmart_core::types::TaxRate;
    ///
    /// let material = Money::from_rupees(760);
    /// let gst = material.calculate_tax(TaxRate::from_percent(28)).unwrap();
    /// // ₹760 × 28% = ₹212.8 → ₹213
    /// assert_eq!(gst.rupees(), 213);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> CoreResult<Money> {
        // i128 holds any i64 magnitude times any u32 rate
        let magnitude = (self.0.unsigned_abs() as i128 * rate.bps() as i128 + 5000) / 10000;
        let tax = if self.0 < 0 { -magnitude } else { magnitude };
        i64::try_from(tax)
            .map(Money)
            .map_err(|_| CoreError::AmountOverflow)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use buildmart_core::money::Money;
    ///
    /// let bag = Money::from_rupees(350);
    /// assert_eq!(bag.multiply_quantity(40).unwrap().rupees(), 14_000);
    /// assert!(Money::from_rupees(i64::MAX).multiply_quantity(2).is_err());
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> CoreResult<Self> {
        self.0
            .checked_mul(i64::from(qty))
            .map(Money)
            .ok_or(CoreError::AmountOverflow)
    }

    /// Adds two amounts.
    #[inline]
    pub fn checked_add(self, other: Money) -> CoreResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(CoreError::AmountOverflow)
    }

    /// Formats the amount with Indian digit grouping, without the rupee sign.
    ///
    /// The last three digits form one group; every group before that has
    /// two digits (`12,34,567`).
    pub fn grouped(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let sign = if self.0 < 0 { "-" } else { "" };

        if digits.len() <= 3 {
            return format!("{}{}", sign, digits);
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();

        format!("{}{},{}", sign, groups.join(","), tail)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the storefront and order messages print it: `₹1,23,456`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-₹{}", self.grouped().trim_start_matches('-'))
        } else {
            write!(f, "₹{}", self.grouped())
        }
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(1800);
        assert_eq!(money.rupees(), 1800);
        assert!(!money.is_zero());
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn test_round_from_half_away_from_zero() {
        let round = |v: f64| Money::round_from(v).unwrap().rupees();
        assert_eq!(round(0.5), 1);
        assert_eq!(round(1.5), 2);
        assert_eq!(round(2.5), 3);
        assert_eq!(round(-2.5), -3);
        assert_eq!(round(180.0), 180);
    }

    #[test]
    fn test_round_from_rejects_unrepresentable() {
        assert!(matches!(Money::round_from(f64::NAN), Err(CoreError::AmountOverflow)));
        assert!(matches!(Money::round_from(f64::INFINITY), Err(CoreError::AmountOverflow)));
        assert!(matches!(Money::round_from(1e19), Err(CoreError::AmountOverflow)));
        assert!(matches!(Money::round_from(-1e19), Err(CoreError::AmountOverflow)));
    }

    #[test]
    fn test_display_indian_grouping() {
        assert_eq!(Money::from_rupees(0).to_string(), "₹0");
        assert_eq!(Money::from_rupees(973).to_string(), "₹973");
        assert_eq!(Money::from_rupees(1380).to_string(), "₹1,380");
        assert_eq!(Money::from_rupees(123_456).to_string(), "₹1,23,456");
        assert_eq!(Money::from_rupees(12_345_678).to_string(), "₹1,23,45,678");
        assert_eq!(Money::from_rupees(-1500).to_string(), "-₹1,500");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(973);
        let b = Money::from_rupees(1380);

        assert_eq!(a.checked_add(b).unwrap().rupees(), 2353);
        assert_eq!(a.multiply_quantity(3).unwrap().rupees(), 2919);
        assert_eq!(Money::zero().checked_add(a).unwrap(), a);
    }

    #[test]
    fn test_arithmetic_overflow_is_an_error() {
        let huge = Money::from_rupees(1_000_000_000_000_000);
        assert!(matches!(
            huge.multiply_quantity(100_000),
            Err(CoreError::AmountOverflow)
        ));
        assert!(matches!(
            Money::from_rupees(i64::MAX).checked_add(Money::from_rupees(1)),
            Err(CoreError::AmountOverflow)
        ));
        assert!(matches!(
            Money::from_rupees(i64::MAX).calculate_tax(TaxRate::from_bps(20_000)),
            Err(CoreError::AmountOverflow)
        ));
    }

    #[test]
    fn test_tax_calculation_basic() {
        // ₹1,000 at 18% = ₹180
        let amount = Money::from_rupees(1000);
        let tax = amount.calculate_tax(TaxRate::from_percent(18)).unwrap();
        assert_eq!(tax.rupees(), 180);
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        // ₹760 at 28% = ₹212.8 → ₹213
        let tax = Money::from_rupees(760).calculate_tax(TaxRate::from_percent(28)).unwrap();
        assert_eq!(tax.rupees(), 213);

        // ₹10 at 5% = ₹0.5 → ₹1 (half rounds up)
        let tax = Money::from_rupees(10).calculate_tax(TaxRate::from_percent(5)).unwrap();
        assert_eq!(tax.rupees(), 1);

        // ₹8 at 12% = ₹0.96 → ₹1
        let tax = Money::from_rupees(8).calculate_tax(TaxRate::from_percent(12)).unwrap();
        assert_eq!(tax.rupees(), 1);
    }

    #[test]
    fn test_tax_on_negative_amount_rounds_away_from_zero() {
        let tax = Money::from_rupees(-10).calculate_tax(TaxRate::from_percent(5)).unwrap();
        assert_eq!(tax.rupees(), -1);
    }
}
