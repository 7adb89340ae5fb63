use serde_json::Value;
use thiserror::Error;

use crate::domain::{GeoPoint, Location};

/// Why a raw coordinate pair failed to become a GeoJSON point. Returned as
/// a value and logged by the host; never fatal to the record or the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("coordinates could not be parsed: {detail}")]
    Parse { detail: String },

    #[error("coordinates out of range: lat={lat}, lon={lon}")]
    Range { lat: f64, lon: f64 },
}

/// Build a GeoJSON point from raw latitude/longitude values, which sources
/// hand over as numbers or strings interchangeably. All failure modes come
/// back as the empty location plus an error value; this never panics.
pub fn build_point(
    lat_raw: Option<&Value>,
    lon_raw: Option<&Value>,
) -> (Location, Option<CoordinateError>) {
    let lat = lat_raw.and_then(coerce);
    let lon = lon_raw.and_then(coerce);

    match (lat, lon) {
        (Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return (Location::missing(), Some(CoordinateError::Range { lat, lon }));
            }
            (Location::Point(GeoPoint::new(lon, lat)), None)
        }
        _ => {
            let detail = format!("lat={}, lon={}", describe(lat_raw), describe(lon_raw));
            (Location::missing(), Some(CoordinateError::Parse { detail }))
        }
    }
}

/// Re-validate a location that already arrived in GeoJSON form (coordinates
/// ordered longitude, latitude).
pub fn from_geojson(value: &Value) -> (Location, Option<CoordinateError>) {
    match value.get("coordinates").and_then(Value::as_array) {
        Some(pair) if pair.len() == 2 => build_point(Some(&pair[1]), Some(&pair[0])),
        _ => (
            Location::missing(),
            Some(CoordinateError::Parse {
                detail: "malformed GeoJSON point".to_string(),
            }),
        ),
    }
}

fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "absent".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_pair_yields_lon_lat_floats() {
        let (location, error) = build_point(Some(&json!(40.7128)), Some(&json!(-74.006)));
        assert!(error.is_none());
        let point = location.point().unwrap();
        assert_eq!(point.coordinates, [-74.006, 40.7128]);
    }

    #[test]
    fn test_string_coordinates_are_coerced() {
        let (location, error) = build_point(Some(&json!(" 47.6062 ")), Some(&json!("-122.3321")));
        assert!(error.is_none());
        assert_eq!(location.point().unwrap().latitude(), 47.6062);
    }

    #[test]
    fn test_out_of_range_latitude() {
        let (location, error) = build_point(Some(&json!(95.0)), Some(&json!(-74.0)));
        assert!(location.is_missing());
        assert_eq!(
            error,
            Some(CoordinateError::Range {
                lat: 95.0,
                lon: -74.0
            })
        );
    }

    #[test]
    fn test_out_of_range_longitude() {
        let (location, error) = build_point(Some(&json!(45.0)), Some(&json!(200.0)));
        assert!(location.is_missing());
        assert!(matches!(error, Some(CoordinateError::Range { .. })));
    }

    #[test]
    fn test_unparseable_input_yields_parse_error() {
        let (location, error) = build_point(Some(&json!("not-a-number")), Some(&json!(-74.0)));
        assert!(location.is_missing());
        assert!(matches!(error, Some(CoordinateError::Parse { .. })));

        let (location, error) = build_point(None, None);
        assert!(location.is_missing());
        assert!(matches!(error, Some(CoordinateError::Parse { .. })));
    }

    #[test]
    fn test_from_geojson_round_trips() {
        let value = json!({"type": "Point", "coordinates": [-122.3321, 47.6062]});
        let (location, error) = from_geojson(&value);
        assert!(error.is_none());
        assert_eq!(location.point().unwrap().coordinates, [-122.3321, 47.6062]);
    }

    #[test]
    fn test_from_geojson_rejects_malformed_point() {
        let (location, error) = from_geojson(&json!({"type": "Point"}));
        assert!(location.is_missing());
        assert!(matches!(error, Some(CoordinateError::Parse { .. })));
    }
}
