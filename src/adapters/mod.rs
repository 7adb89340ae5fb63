use serde_json::{Map, Value};

use crate::domain::RawStoreInput;
use crate::envelope::SourceShape;

mod api;
mod embedded;
mod table;

pub use api::ApiAdapter;
pub use embedded::EmbeddedJsonAdapter;
pub use table::HtmlTableAdapter;

/// Converts one fetched payload into per-store raw mappings carrying the
/// canonical intermediate keys. Adapters are infallible over well-formed
/// JSON: a row yielding no usable fields becomes an empty mapping the
/// pipeline rejects downstream.
pub trait ShapeAdapter {
    fn extract(&self, payload: &Value) -> Vec<RawStoreInput>;
}

pub fn for_shape(shape: SourceShape) -> Box<dyn ShapeAdapter> {
    match shape {
        SourceShape::Api => Box::new(ApiAdapter),
        SourceShape::EmbeddedJson => Box::new(EmbeddedJsonAdapter),
        SourceShape::HtmlTable => Box::new(HtmlTableAdapter),
    }
}

pub fn extract(shape: SourceShape, payload: &Value) -> Vec<RawStoreInput> {
    for_shape(shape).extract(payload)
}

/// Collection keys sources conventionally nest their store arrays under.
const COLLECTION_KEYS: [&str; 5] = ["stores", "locations", "results", "items", "data"];

/// Source-key vocabularies, one alias list per canonical intermediate key.
/// First populated alias wins.
const FIELD_ALIASES: [(&str, &[&str]); 14] = [
    (
        "number",
        &[
            "number",
            "storeNumber",
            "store_number",
            "storeId",
            "store_id",
            "stlocID",
            "id",
        ],
    ),
    ("name", &["name", "storeName", "store_name", "store", "title"]),
    ("address", &["address", "formattedAddress", "formatted_address"]),
    (
        "street",
        &[
            "street",
            "address1",
            "addressLine1",
            "address_line1",
            "line1",
            "streetAddress",
            "street_address",
        ],
    ),
    (
        "street2",
        &["street2", "address2", "addressLine2", "address_line2", "line2"],
    ),
    ("city", &["city", "town"]),
    (
        "state",
        &["state", "region", "province", "state_code", "countyProvinceState"],
    ),
    (
        "zip",
        &["zip", "zipCode", "zipcode", "postalCode", "postal_code", "postCode"],
    ),
    ("latitude", &["latitude", "lat"]),
    ("longitude", &["longitude", "lng", "lon", "long"]),
    ("location", &["location"]),
    (
        "phone_number",
        &["phone_number", "phone", "phoneNumber", "telephone", "phone_main"],
    ),
    (
        "hours",
        &[
            "hours",
            "openingHours",
            "opening_hours",
            "store_hours",
            "operatingHours",
        ],
    ),
    ("services", &["services", "amenities", "departments"]),
];

/// Locate the per-store objects inside a payload: a bare array, an object
/// with a conventional collection key, or a single store object.
fn store_maps(payload: &Value) -> Vec<&Map<String, Value>> {
    match payload {
        Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
        Value::Object(map) => {
            for key in COLLECTION_KEYS {
                if let Some(Value::Array(items)) = map.get(key) {
                    return items.iter().filter_map(Value::as_object).collect();
                }
            }
            vec![map]
        }
        _ => Vec::new(),
    }
}

/// Project a source object onto the canonical intermediate vocabulary.
fn remap(source: &Map<String, Value>) -> RawStoreInput {
    let mut out = Map::new();
    for (canonical, aliases) in FIELD_ALIASES {
        for alias in aliases {
            match source.get(*alias) {
                Some(value) if !value.is_null() => {
                    out.insert(canonical.to_string(), value.clone());
                    break;
                }
                _ => {}
            }
        }
    }
    out
}
