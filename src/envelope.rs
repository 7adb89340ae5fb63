use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fetched page or API response, as handed over by the fetch layer.
/// The fetch layer owns retries, pagination and HTML selection; by the time
/// an envelope reaches this crate its payload is plain JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEnvelope {
    pub source_id: String,
    /// URL of the page the payload was extracted from.
    pub url: String,
    pub shape: SourceShape,
    pub payload: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
}

/// The three raw-mapping shapes produced upstream, dispatched to
/// shape-specific adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceShape {
    /// Flat numeric/string fields straight from a paginated location API.
    Api,
    /// Nested mapping mirroring a page's script-tag payload.
    EmbeddedJson,
    /// Flat string fields already extracted from table-like markup.
    HtmlTable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_round_trip() {
        let envelope = SourceEnvelope {
            source_id: "acme_api".to_string(),
            url: "https://stores.example.com/page/1".to_string(),
            shape: SourceShape::Api,
            payload: json!({"stores": []}),
            fetched_at: Utc::now(),
        };

        let line = serde_json::to_string(&envelope).unwrap();
        assert!(line.contains("\"shape\":\"api\""));

        let parsed: SourceEnvelope = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed.shape, SourceShape::Api);
        assert_eq!(parsed.url, envelope.url);
    }
}
