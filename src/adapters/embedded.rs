use serde_json::{Map, Value};

use super::{remap, store_maps, ShapeAdapter};
use crate::domain::RawStoreInput;

/// Adapter for JSON payloads lifted out of script tags and HTML attributes.
/// Store lists hide behind framework-specific key paths, and per-store
/// fields often sit in nested address/geo objects that need flattening
/// before the alias projection applies.
pub struct EmbeddedJsonAdapter;

/// Key paths where embedding frameworks conventionally bury store lists.
const CANDIDATE_PATHS: [&str; 6] = [
    "props.pageProps.stores",
    "props.pageProps.locations",
    "data.stores",
    "storeLocator.stores",
    "appData.stores",
    "stores",
];

/// Container keys whose object children are lifted to the top level.
const NESTED_CONTAINERS: [&str; 4] = ["address", "geo", "geoPoint", "coordinates"];

impl ShapeAdapter for EmbeddedJsonAdapter {
    fn extract(&self, payload: &Value) -> Vec<RawStoreInput> {
        for path in CANDIDATE_PATHS {
            if let Some(Value::Array(items)) = descend(payload, path) {
                return items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(flatten_store)
                    .collect();
            }
        }
        // No recognized key path; fall back to the flat conventions.
        store_maps(payload).into_iter().map(flatten_store).collect()
    }
}

fn descend<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

/// Lift nested container objects into the top level (existing top-level
/// keys win), then project onto the canonical vocabulary. A GeoJSON-shaped
/// "location" passes through remap untouched; a {latitude, longitude} pair
/// inside "geo" becomes top-level coordinates.
fn flatten_store(store: &Map<String, Value>) -> RawStoreInput {
    let mut flat = store.clone();
    for container in NESTED_CONTAINERS {
        let nested = match store.get(container) {
            Some(Value::Object(nested)) => nested.clone(),
            _ => continue,
        };
        flat.remove(container);
        for (key, value) in nested {
            flat.entry(key).or_insert(value);
        }
    }
    remap(&flat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_descends_page_props() {
        let payload = json!({
            "props": {
                "pageProps": {
                    "stores": [
                        {
                            "storeId": "881",
                            "name": "Acme Midtown",
                            "address": {
                                "line1": "88 Pine St",
                                "city": "Seattle",
                                "region": "WA",
                                "postalCode": "98101"
                            },
                            "geo": {"latitude": 47.6062, "longitude": -122.3321}
                        }
                    ]
                }
            }
        });

        let raw = EmbeddedJsonAdapter.extract(&payload);
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].get("number"), Some(&json!("881")));
        assert_eq!(raw[0].get("street"), Some(&json!("88 Pine St")));
        assert_eq!(raw[0].get("state"), Some(&json!("WA")));
        assert_eq!(raw[0].get("latitude"), Some(&json!(47.6062)));
        assert!(raw[0].get("address").is_none());
    }

    #[test]
    fn test_top_level_keys_win_over_lifted_ones() {
        let payload = json!({
            "stores": [{
                "latitude": 40.0,
                "geo": {"latitude": 99.9, "longitude": -70.0}
            }]
        });

        let raw = EmbeddedJsonAdapter.extract(&payload);
        assert_eq!(raw[0].get("latitude"), Some(&json!(40.0)));
        assert_eq!(raw[0].get("longitude"), Some(&json!(-70.0)));
    }

    #[test]
    fn test_fallback_to_flat_payload() {
        let payload = json!({"results": [{"storeNumber": "5", "city": "Austin"}]});
        let raw = EmbeddedJsonAdapter.extract(&payload);
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].get("number"), Some(&json!("5")));
    }
}
