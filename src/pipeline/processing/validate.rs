use std::collections::BTreeSet;

use serde_json::Value;

use crate::domain::StoreRecord;

/// Fields a candidate record must carry to be emitted.
pub const REQUIRED_FIELDS: [&str; 4] = ["address", "location", "url", "raw"];

/// Outcome of required-field validation. The missing set doubles as the
/// diagnostic handed back to the caller; an empty set means the record is
/// good to emit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub missing: BTreeSet<String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check required-field presence on an assembled candidate. A field counts
/// as missing when absent, an empty string, or an empty mapping — so a
/// geolocation that fell back to the empty-object placeholder downgrades the
/// whole record even though the field is structurally present.
pub fn validate(candidate: &StoreRecord) -> Validation {
    let mut missing = BTreeSet::new();

    if candidate.address.trim().is_empty() {
        missing.insert("address".to_string());
    }
    if candidate.location.is_missing() {
        missing.insert("location".to_string());
    }
    if candidate.url.trim().is_empty() {
        missing.insert("url".to_string());
    }
    if is_empty_value(&candidate.raw) {
        missing.insert("raw".to_string());
    }

    Validation { missing }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoPoint, Location};
    use serde_json::json;

    fn candidate() -> StoreRecord {
        StoreRecord {
            number: Some("4721".to_string()),
            name: Some("Acme #4721".to_string()),
            address: "123 Main St, Springfield IL 12345".to_string(),
            location: Location::Point(GeoPoint::new(-89.65, 39.78)),
            phone_number: None,
            hours: Default::default(),
            services: Vec::new(),
            url: "https://stores.example.com/4721".to_string(),
            raw: json!({"storeNumber": "4721"}),
        }
    }

    #[test]
    fn test_complete_record_is_valid() {
        let validation = validate(&candidate());
        assert!(validation.is_valid());
        assert!(validation.missing.is_empty());
    }

    #[test]
    fn test_empty_address_is_missing() {
        let mut record = candidate();
        record.address = "  ".to_string();
        let validation = validate(&record);
        assert!(!validation.is_valid());
        assert_eq!(
            validation.missing.iter().collect::<Vec<_>>(),
            vec!["address"]
        );
    }

    #[test]
    fn test_empty_location_object_counts_as_missing() {
        let mut record = candidate();
        record.location = Location::missing();
        let validation = validate(&record);
        assert!(validation.missing.contains("location"));
    }

    #[test]
    fn test_empty_raw_mapping_counts_as_missing() {
        let mut record = candidate();
        record.raw = json!({});
        assert!(validate(&record).missing.contains("raw"));

        record.raw = serde_json::Value::Null;
        assert!(validate(&record).missing.contains("raw"));
    }

    #[test]
    fn test_multiple_missing_fields_reported_together() {
        let mut record = candidate();
        record.address = String::new();
        record.url = String::new();
        record.location = Location::missing();
        let validation = validate(&record);
        assert_eq!(validation.missing.len(), 3);
    }
}
