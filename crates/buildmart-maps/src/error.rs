//! Distance lookup failure reasons.

use thiserror::Error;

/// Why a lookup fell back to the estimate.
///
/// Displayed to the user next to the estimated distance; never propagated
/// as a failure of the quote.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// No provider credential is configured.
    #[error("Google Maps API key not configured")]
    MissingApiKey,

    /// The request never got a response (DNS, connect, TLS, ...).
    #[error("Distance service unreachable: {0}")]
    Request(String),

    /// The provider answered with a non-success HTTP status.
    #[error("Failed to fetch distance data (HTTP {0})")]
    HttpStatus(u16),

    /// The body was not the expected JSON.
    #[error("Invalid distance response: {0}")]
    InvalidResponse(String),

    /// The provider could not route to the destination.
    #[error("Unable to calculate distance. Please check the address.")]
    Unresolvable { status: String },
}

impl From<reqwest::Error> for DistanceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DistanceError::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            DistanceError::HttpStatus(status.as_u16())
        } else {
            DistanceError::Request(err.to_string())
        }
    }
}
