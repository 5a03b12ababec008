//! # Commands Module
//!
//! One function per CLI command. Each returns a report that can be printed
//! as text or as JSON.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (Render + emit)
//! ├── catalog.rs  ◄─── products, product
//! ├── quote.rs    ◄─── quote (tax, distance, transport)
//! ├── order.rs    ◄─── order, payment-confirmation
//! └── admin.rs    ◄─── admin show / set-* / reset
//! ```
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  buildmart quote cement-1 -q 2 --address "Sector 62" --pincode 201301   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  quote::quote(&settings, &client, &args) -> Result<QuoteReport, _>      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  emit(&report, json)                                                    │
//! │     ├── --json: serde_json pretty print                                 │
//! │     └── text:   report.render_text()                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod catalog;
pub mod order;
pub mod quote;

use serde::Serialize;

use buildmart_maps::DistanceLookup;

use crate::error::AppError;

/// Command output.
pub trait Render: Serialize {
    /// Human readable form.
    fn render_text(&self) -> String;
}

/// Prints a report to stdout.
pub fn emit<T: Render>(report: &T, json: bool) -> Result<(), AppError> {
    let text = if json {
        serde_json::to_string_pretty(report)?
    } else {
        report.render_text()
    };
    println!("{}", text);
    Ok(())
}

/// Fallback reason for display, if the estimate was used.
pub(crate) fn fallback_note(lookup: &DistanceLookup) -> Option<String> {
    lookup.reason().map(|reason| reason.to_string())
}
