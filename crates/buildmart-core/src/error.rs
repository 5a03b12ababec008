//! # Error Types
//!
//! Domain-specific error types for buildmart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  buildmart-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Order form / admin input failures              │
//! │                                                                         │
//! │  buildmart-db errors (separate crate)                                  │
//! │  └── DbError          - Override store failures                        │
//! │                                                                         │
//! │  buildmart-maps errors (separate crate)                                │
//! │  └── DistanceError    - Never propagated: becomes a fallback result    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → user-facing message    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors from catalog lookups and the quote flow.
///
/// None of them are fatal: each maps to a recoverable, user-visible state.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown product id.
    ///
    /// ## When This Occurs
    /// - A product detail link carries an unknown id
    /// - An admin edit targets a product that is not in the catalog
    ///
    /// The detail view offers a way back to the catalog; no quote is computed.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Vehicle tier cannot be found (admin edits only).
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    /// The catalog has no vehicle tiers to price transport with.
    #[error("No vehicle tiers configured")]
    NoVehicleTiers,

    /// An order message was requested before the delivery distance was known.
    ///
    /// ## User Workflow
    /// ```text
    /// Fill form ──► Send on WhatsApp
    ///                    │
    ///                    ▼
    ///          distance resolved? ── no ──► "Please calculate distance first"
    /// ```
    #[error("Please calculate distance first")]
    DistanceNotResolved,

    /// A quote amount left the representable range.
    ///
    /// Admin amounts are capped at `MAX_UNIT_PRICE`, so this only shows up
    /// if a caller skips validation.
    #[error("Amount out of range")]
    AmountOverflow,

    /// Bad form or admin input.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised synchronously, before any computation or network call.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// Fewer characters than allowed (phone numbers).
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Outside an inclusive range (GST percent).
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A price or charge below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., non-digit phone number, bad URL).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
