use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::address::{self, AddressParts};
use super::dedup::{self, Deduplicator};
use super::{geo, hours, services, text, validate};
use super::{FieldIssue, IssueSeverity};
use crate::config::{BrandConfig, ScraperConfig};
use crate::domain::{Location, RawStoreInput, StoreRecord};

/// Terminal state of one raw input after normalization.
#[derive(Debug)]
pub enum Disposition {
    /// The record passed validation and deduplication; hand it downstream.
    Emitted(Box<StoreRecord>),
    /// Required fields were absent after normalization; the record is
    /// dropped and never reaches the deduplicator.
    RejectedInvalid { missing_fields: BTreeSet<String> },
    /// A record with the same key was already emitted this run.
    RejectedDuplicate { key: String },
}

/// Everything the host needs to know about one processed input: the
/// terminal disposition plus the field-level fallbacks taken along the way.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub disposition: Disposition,
    pub issues: Vec<FieldIssue>,
    pub processed_at: DateTime<Utc>,
}

/// Identity of one normalization run, stamped on logs by the host.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
}

/// Orchestrates the field normalizers over one raw mapping at a time:
/// normalize independently, assemble, validate, deduplicate. Owns the
/// run-scoped dedup state — build one pipeline per crawl run. No failure in
/// here escapes as a panic; every input lands in exactly one disposition.
pub struct NormalizationPipeline {
    config: ScraperConfig,
    dedup: Deduplicator,
    run: RunContext,
}

impl NormalizationPipeline {
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            dedup: Deduplicator::new(),
            run: RunContext {
                run_id: Uuid::new_v4(),
                started_at: Utc::now(),
            },
        }
    }

    pub fn run(&self) -> &RunContext {
        &self.run
    }

    /// Number of distinct store keys emitted so far this run.
    pub fn emitted_keys(&self) -> usize {
        self.dedup.len()
    }

    pub fn process(&self, raw: RawStoreInput, source_url: &str) -> ProcessOutcome {
        let mut issues = Vec::new();

        // Field normalizers run independently; a failure in one only costs
        // that field its value, never the record or the run.
        let number = string_field(&raw, "number");
        let name = string_field(&raw, "name");
        let phone_number = string_field(&raw, "phone_number");
        let address = address_from(&raw);

        let (location, geo_error) = location_from(&raw);
        if let Some(error) = geo_error {
            issues.push(FieldIssue {
                field: "location",
                severity: IssueSeverity::Warning,
                message: error.to_string(),
            });
        }

        let (hours, hour_issues) = hours::normalize(raw.get("hours"));
        issues.extend(hour_issues);

        let services = services_from(&raw, &self.config.brand);

        let record = StoreRecord {
            number,
            name,
            address,
            location,
            phone_number,
            hours,
            services,
            url: source_url.to_string(),
            raw: Value::Object(raw),
        };

        let validation = validate::validate(&record);
        if !validation.is_valid() {
            return ProcessOutcome {
                disposition: Disposition::RejectedInvalid {
                    missing_fields: validation.missing,
                },
                issues,
                processed_at: Utc::now(),
            };
        }

        // Only validated candidates may touch dedup state; the claim is a
        // single atomic insert-if-absent.
        let key = dedup::dedup_key(self.config.dedup.key_policy, &record);
        if !self.dedup.claim(&key) {
            return ProcessOutcome {
                disposition: Disposition::RejectedDuplicate { key },
                issues,
                processed_at: Utc::now(),
            };
        }

        ProcessOutcome {
            disposition: Disposition::Emitted(Box::new(record)),
            issues,
            processed_at: Utc::now(),
        }
    }
}

/// Read an optional text field, accepting the numeric identifiers some APIs
/// hand over. Cleans whitespace; empty results become absent.
fn string_field(raw: &RawStoreInput, key: &str) -> Option<String> {
    let cleaned = match raw.get(key)? {
        Value::String(s) => text::clean(s),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// A pre-joined address string wins; otherwise compose from components.
fn address_from(raw: &RawStoreInput) -> String {
    if let Some(Value::String(joined)) = raw.get("address") {
        let cleaned = text::clean(joined);
        if !cleaned.is_empty() {
            return cleaned;
        }
    }

    let part = |key: &str| {
        raw.get(key)
            .and_then(text_value)
            .unwrap_or_default()
    };
    address::format(&AddressParts {
        street: part("street"),
        street2: part("street2"),
        city: part("city"),
        state: part("state"),
        zip: part("zip"),
    })
}

fn location_from(raw: &RawStoreInput) -> (Location, Option<geo::CoordinateError>) {
    match raw.get("location") {
        Some(value) if value.as_object().map_or(false, |map| !map.is_empty()) => {
            geo::from_geojson(value)
        }
        _ => geo::build_point(raw.get("latitude"), raw.get("longitude")),
    }
}

fn services_from(raw: &RawStoreInput, brand: &BrandConfig) -> Vec<String> {
    match raw.get("services") {
        Some(Value::Array(entries)) => {
            let raw_services: Vec<String> = entries
                .iter()
                .filter_map(|entry| entry.as_str().map(str::to_string))
                .collect();
            services::format(&raw_services, brand)
        }
        _ => Vec::new(),
    }
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
