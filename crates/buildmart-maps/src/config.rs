//! Distance resolver configuration.

/// Google distance-matrix JSON endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Warehouse latitude used when none is configured (New Delhi).
pub const DEFAULT_WAREHOUSE_LAT: f64 = 28.6139;

/// Warehouse longitude used when none is configured.
pub const DEFAULT_WAREHOUSE_LNG: f64 = 77.2090;

/// Settings for [`crate::DistanceMatrixClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapsConfig {
    /// Provider credential. `None` or blank makes every lookup fall back.
    pub api_key: Option<String>,
    pub warehouse_lat: f64,
    pub warehouse_lng: f64,
    pub endpoint: String,
}

impl MapsConfig {
    pub fn new(api_key: Option<String>) -> Self {
        MapsConfig {
            api_key,
            ..Default::default()
        }
    }

    pub fn with_origin(mut self, lat: f64, lng: f64) -> Self {
        self.warehouse_lat = lat;
        self.warehouse_lng = lng;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// `"lat,lng"` as sent in the `origins` parameter.
    pub fn origin(&self) -> String {
        format!("{},{}", self.warehouse_lat, self.warehouse_lng)
    }

    /// The credential, if one is usable.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

impl Default for MapsConfig {
    fn default() -> Self {
        MapsConfig {
            api_key: None,
            warehouse_lat: DEFAULT_WAREHOUSE_LAT,
            warehouse_lng: DEFAULT_WAREHOUSE_LNG,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_format() {
        assert_eq!(MapsConfig::default().origin(), "28.6139,77.209");
        assert_eq!(
            MapsConfig::default().with_origin(12.97, 77.59).origin(),
            "12.97,77.59"
        );
    }

    #[test]
    fn test_blank_key_is_missing() {
        assert!(MapsConfig::new(Some("  ".to_string())).api_key().is_none());
        assert!(MapsConfig::new(None).api_key().is_none());
        assert_eq!(MapsConfig::new(Some("abc".to_string())).api_key(), Some("abc"));
    }
}
