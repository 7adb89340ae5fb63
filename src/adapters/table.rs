use serde_json::{Map, Value};

use super::{remap, store_maps, ShapeAdapter};
use crate::domain::RawStoreInput;

/// Adapter for rows scraped out of table-like markup. Everything arrives as
/// strings and needs the heaviest cleaning: leftover HTML entity artifacts
/// are scrubbed and delimiter-packed service cells are split into lists.
pub struct HtmlTableAdapter;

const ENTITY_ARTIFACTS: [(&str, &str); 6] = [
    ("&amp;", "&"),
    ("&nbsp;", " "),
    ("\u{a0}", " "),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&quot;", "\""),
];

impl ShapeAdapter for HtmlTableAdapter {
    fn extract(&self, payload: &Value) -> Vec<RawStoreInput> {
        store_maps(payload)
            .into_iter()
            .map(|row| {
                let scrubbed: Map<String, Value> = row
                    .iter()
                    .map(|(key, value)| (key.clone(), scrub_value(value)))
                    .collect();
                let mut raw = remap(&scrubbed);
                split_services(&mut raw);
                raw
            })
            .collect()
    }
}

fn scrub_value(value: &Value) -> Value {
    match value {
        Value::String(text) => {
            let mut scrubbed = text.clone();
            for (artifact, replacement) in ENTITY_ARTIFACTS {
                scrubbed = scrubbed.replace(artifact, replacement);
            }
            Value::String(scrubbed)
        }
        other => other.clone(),
    }
}

/// Markup sources pack the whole service list into one delimited cell.
fn split_services(raw: &mut RawStoreInput) {
    let delimited = match raw.get("services") {
        Some(Value::String(cell)) => cell.clone(),
        _ => return,
    };
    let entries: Vec<Value> = delimited
        .split([';', ','])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| Value::String(entry.to_string()))
        .collect();
    raw.insert("services".to_string(), Value::Array(entries));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_scrubs_entity_artifacts() {
        let payload = json!([{
            "store": "Andy&#39;s Market",
            "address1": "12 Bay&nbsp;Rd",
            "city": "Salem",
            "state": "OR",
            "zip": "97301",
            "phone": "503\u{a0}555\u{a0}0101"
        }]);

        let raw = HtmlTableAdapter.extract(&payload);
        assert_eq!(raw[0].get("name"), Some(&json!("Andy's Market")));
        assert_eq!(raw[0].get("street"), Some(&json!("12 Bay Rd")));
        assert_eq!(raw[0].get("phone_number"), Some(&json!("503 555 0101")));
    }

    #[test]
    fn test_extract_splits_delimited_services() {
        let payload = json!([{
            "store": "Acme Downtown",
            "services": "Pharmacy; Deli;  Fuel &amp; Wash ; "
        }]);

        let raw = HtmlTableAdapter.extract(&payload);
        assert_eq!(
            raw[0].get("services"),
            Some(&json!(["Pharmacy", "Deli", "Fuel & Wash"]))
        );
    }

    #[test]
    fn test_extract_leaves_list_services_alone() {
        let payload = json!([{"store": "Acme", "services": ["Deli", "Bakery"]}]);
        let raw = HtmlTableAdapter.extract(&payload);
        assert_eq!(raw[0].get("services"), Some(&json!(["Deli", "Bakery"])));
    }
}
