//! # buildmart-core: Pure Business Logic for BuildMart
//!
//! This crate is the **heart** of the BuildMart storefront. It contains the
//! quote engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BuildMart Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront (CLI / browser)                      │   │
//! │  │    Catalog ──► Product Detail ──► Quote ──► WhatsApp hand-off   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ buildmart-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │    tax    │  │ transport │  │   quote   │  │   │
//! │  │   │ Products  │  │    GST    │  │  Vehicle  │  │  Totals   │  │   │
//! │  │   │ Vehicles  │  │ Breakdown │  │   tiers   │  │  Message  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                │                                 │                      │
//! │  ┌─────────────▼──────────────┐   ┌──────────────▼─────────────────┐   │
//! │  │  buildmart-db (overrides)  │   │  buildmart-maps (distance)     │   │
//! │  └────────────────────────────┘   └────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, VehicleTier, DistanceResult, ...)
//! - [`money`] - Money type with integer rupee arithmetic
//! - [`catalog`] - Static catalog and lookups
//! - [`tax`] - GST calculation
//! - [`transport`] - Shipment weight and vehicle tier pricing
//! - [`quote`] - Quote assembly
//! - [`order`] - Order hand-off messages and deep links
//! - [`validation`] - Order form and admin edit validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use buildmart_core::money::Money;
//! use buildmart_core::tax::compute_tax;
//! use buildmart_core::types::TaxRate;
//!
//! // 2 bags at ₹380 with 28% GST
//! let gst = compute_tax(Money::from_rupees(380), 2, TaxRate::from_percent(28)).unwrap();
//!
//! assert_eq!(gst.material_cost.rupees(), 760);
//! assert_eq!(gst.tax_amount.rupees(), 213); // 212.8 rounded
//! assert_eq!(gst.total_with_tax.rupees(), 973);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod quote;
pub mod tax;
pub mod transport;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, CategoryFilter};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quote::{assemble_quote, Quote};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity accepted on a single quote line.
///
/// ## Business Reason
/// Keeps a stray keystroke (10000 instead of 100 bags) from producing a
/// nonsensical transport quote. Bulk orders go through WhatsApp directly.
pub const MAX_ORDER_QUANTITY: u32 = 100_000;

/// Largest unit price, base charge or per-km rate an admin may set (₹1 crore).
///
/// At `MAX_ORDER_QUANTITY` units and a 100% rate this keeps every quote
/// total far inside `i64`.
pub const MAX_UNIT_PRICE: i64 = 10_000_000;

/// Minimum length of a customer phone number (10-digit Indian mobile).
pub const MIN_PHONE_LENGTH: usize = 10;
