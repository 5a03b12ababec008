//! # Distance Matrix Client
//!
//! One GET per lookup, no retries, no timeout beyond the HTTP client's
//! defaults. Any failure becomes [`DistanceLookup::Fallback`].

use serde::Serialize;
use tracing::{debug, info, warn};

use buildmart_core::DistanceResult;

use crate::config::MapsConfig;
use crate::error::DistanceError;
use crate::response::DistanceMatrixResponse;

// =============================================================================
// Lookup Outcome
// =============================================================================

/// Result of a distance lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceLookup {
    /// The provider answered.
    Resolved(DistanceResult),

    /// The fixed estimate, with the reason the provider was not used.
    Fallback {
        estimate: DistanceResult,
        reason: DistanceError,
    },
}

impl DistanceLookup {
    /// Wraps `reason` with the standard 15 km estimate.
    pub fn fallback(reason: DistanceError) -> Self {
        DistanceLookup::Fallback {
            estimate: DistanceResult::fallback(),
            reason,
        }
    }

    /// The distance to price with, whichever branch this is.
    pub fn result(&self) -> &DistanceResult {
        match self {
            DistanceLookup::Resolved(result) => result,
            DistanceLookup::Fallback { estimate, .. } => estimate,
        }
    }

    pub fn into_result(self) -> DistanceResult {
        match self {
            DistanceLookup::Resolved(result) => result,
            DistanceLookup::Fallback { estimate, .. } => estimate,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, DistanceLookup::Fallback { .. })
    }

    /// Why the estimate was used, for display.
    pub fn reason(&self) -> Option<&DistanceError> {
        match self {
            DistanceLookup::Resolved(_) => None,
            DistanceLookup::Fallback { reason, .. } => Some(reason),
        }
    }
}

// =============================================================================
// Client
// =============================================================================

#[derive(Serialize)]
struct MatrixQuery<'a> {
    origins: &'a str,
    destinations: &'a str,
    key: &'a str,
}

/// HTTP client for the distance-matrix service.
#[derive(Debug, Clone)]
pub struct DistanceMatrixClient {
    http: reqwest::Client,
    config: MapsConfig,
}

impl DistanceMatrixClient {
    /// Builds a client.
    ///
    /// ## Errors
    /// `DistanceError::Request` if the HTTP client cannot be initialised
    /// (TLS backend unavailable).
    pub fn new(config: MapsConfig) -> Result<Self, DistanceError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("buildmart/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DistanceError::Request(e.to_string()))?;
        Ok(DistanceMatrixClient { http, config })
    }

    pub fn config(&self) -> &MapsConfig {
        &self.config
    }

    /// Resolves the distance from the warehouse to `destination`.
    ///
    /// Never fails: see [`DistanceLookup`].
    pub async fn resolve(&self, destination: &str) -> DistanceLookup {
        match self.lookup(destination).await {
            Ok(result) => {
                info!(
                    destination = %destination,
                    km = result.distance_km,
                    "Distance resolved"
                );
                DistanceLookup::Resolved(result)
            }
            Err(reason) => {
                warn!(
                    destination = %destination,
                    reason = %reason,
                    "Distance lookup failed, using fallback estimate"
                );
                DistanceLookup::fallback(reason)
            }
        }
    }

    async fn lookup(&self, destination: &str) -> Result<DistanceResult, DistanceError> {
        let key = self.config.api_key().ok_or(DistanceError::MissingApiKey)?;
        let origin = self.config.origin();

        debug!(endpoint = %self.config.endpoint, origin = %origin, "Requesting distance");

        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&MatrixQuery {
                origins: &origin,
                destinations: destination,
                key,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DistanceError::HttpStatus(status.as_u16()));
        }

        let body: DistanceMatrixResponse = response.json().await?;
        if let Some(message) = &body.error_message {
            debug!(status = %body.status, message = %message, "Provider message");
        }
        body.into_distance()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
