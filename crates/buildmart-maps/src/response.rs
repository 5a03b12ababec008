//! Distance-matrix response body.
//!
//! Only the first row's first element is consulted: one origin, one
//! destination per request.
//!
//! ```json
//! {
//!   "status": "OK",
//!   "rows": [{ "elements": [{
//!       "status": "OK",
//!       "distance": { "text": "12.4 km", "value": 12437 },
//!       "duration": { "text": "28 mins", "value": 1680 }
//!   }]}]
//! }
//! ```

use serde::Deserialize;

use buildmart_core::DistanceResult;

use crate::error::DistanceError;

const STATUS_OK: &str = "OK";

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixResponse {
    pub status: String,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    pub status: String,
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
}

/// Provider formatted text plus the raw value (metres or seconds).
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

/// Metres to kilometres, one decimal place.
pub fn metres_to_km(metres: u64) -> f64 {
    (metres as f64 / 100.0).round() / 10.0
}

impl DistanceMatrixResponse {
    /// Extracts the distance for the single origin/destination pair.
    pub fn into_distance(self) -> Result<DistanceResult, DistanceError> {
        if self.status != STATUS_OK {
            return Err(DistanceError::Unresolvable {
                status: self.status,
            });
        }

        let element = self
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .ok_or_else(|| DistanceError::InvalidResponse("no result element".to_string()))?;

        if element.status != STATUS_OK {
            return Err(DistanceError::Unresolvable {
                status: element.status,
            });
        }

        match (element.distance, element.duration) {
            (Some(distance), Some(duration)) => Ok(DistanceResult::resolved(
                metres_to_km(distance.value),
                distance.text,
                duration.text,
            )),
            _ => Err(DistanceError::InvalidResponse(
                "element missing distance or duration".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> DistanceMatrixResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_metres_to_km() {
        assert_eq!(metres_to_km(12_437), 12.4);
        assert_eq!(metres_to_km(12_450), 12.5);
        assert_eq!(metres_to_km(15_000), 15.0);
        assert_eq!(metres_to_km(0), 0.0);
    }

    #[test]
    fn test_ok_response() {
        let body = parse(serde_json::json!({
            "status": "OK",
            "rows": [{ "elements": [{
                "status": "OK",
                "distance": { "text": "12.4 km", "value": 12437 },
                "duration": { "text": "28 mins", "value": 1680 }
            }]}]
        }));

        let result = body.into_distance().unwrap();
        assert_eq!(result.distance_km, 12.4);
        assert_eq!(result.distance_text, "12.4 km");
        assert_eq!(result.duration_text, "28 mins");
        assert!(!result.is_fallback);
    }

    #[test]
    fn test_element_not_found() {
        let body = parse(serde_json::json!({
            "status": "OK",
            "rows": [{ "elements": [{ "status": "NOT_FOUND" }] }]
        }));

        let err = body.into_distance().unwrap_err();
        assert_eq!(
            err,
            DistanceError::Unresolvable {
                status: "NOT_FOUND".to_string()
            }
        );
    }

    #[test]
    fn test_request_denied() {
        let body = parse(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        }));
        assert!(matches!(
            body.into_distance(),
            Err(DistanceError::Unresolvable { .. })
        ));
    }

    #[test]
    fn test_no_rows() {
        let body = parse(serde_json::json!({ "status": "OK", "rows": [] }));
        assert!(matches!(
            body.into_distance(),
            Err(DistanceError::InvalidResponse(_))
        ));
    }
}
