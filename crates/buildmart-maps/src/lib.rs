//! # buildmart-maps: Distance Resolver
//!
//! Resolves the delivery distance from the warehouse to a free-text address.
//!
//! ## Outcome Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve("Sector 62, Noida, 201301")                                   │
//! │       │                                                                 │
//! │       ├── no API key ─────────────┐                                     │
//! │       ├── network error ──────────┤                                     │
//! │       ├── HTTP status not 2xx ────┼──► Fallback { 15 km, reason }       │
//! │       ├── undecodable body ───────┤      (warn! logged)                 │
//! │       ├── status != "OK" ─────────┘                                     │
//! │       │                                                                 │
//! │       └── OK ─────────────────────────► Resolved(12.4 km, "28 mins")    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The resolver never returns `Err`: a quote can always be priced. The
//! reason for a fallback travels alongside the estimate so callers can
//! show it.

pub mod config;
pub mod error;
pub mod resolver;
pub mod response;

pub use config::MapsConfig;
pub use error::DistanceError;
pub use resolver::{DistanceLookup, DistanceMatrixClient};
