use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An untyped per-store mapping handed over by a source adapter. Keys follow
/// the canonical intermediate vocabulary (number, name, street, city, state,
/// zip, address, latitude, longitude, location, phone_number, hours,
/// services); values are whatever the source produced.
pub type RawStoreInput = serde_json::Map<String, serde_json::Value>;

/// The canonical store record every source shape converges to. Built once by
/// the normalization pipeline and immutable afterwards; it is either handed
/// downstream or discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    /// Opaque source-specific store identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Store display name, trimmed and non-empty when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Comma-joined formatted address; required.
    pub address: String,
    /// GeoJSON point, or the empty-object placeholder when coordinates
    /// failed to parse or validate. Always serialized.
    pub location: Location,
    /// Phone number with whitespace normalized; no real-world validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Weekly schedule keyed by lowercase day name, monday first.
    #[serde(default)]
    pub hours: BTreeMap<Day, DaySchedule>,
    /// Cleaned, deduplicated service names in first-seen order.
    #[serde(default)]
    pub services: Vec<String>,
    /// URL of the source page the record was extracted from.
    pub url: String,
    /// Verbatim copy of the raw input mapping, kept for audit and debugging.
    pub raw: serde_json::Value,
}

/// Days of the week in canonical order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    /// Case-insensitive match against the canonical day names. Accepts the
    /// abbreviated forms sources commonly emit ("mon", "tues", "thurs"), as
    /// long as at least three characters prefix the full name.
    pub fn parse(raw: &str) -> Option<Day> {
        let token = raw.trim().to_lowercase();
        if token.len() < 3 {
            return None;
        }
        Day::ALL
            .into_iter()
            .find(|day| day.as_str().starts_with(token.as_str()))
    }
}

/// One day's schedule: an open/close range in the source's literal time
/// format, or one of the two sentinels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DaySchedule {
    Sentinel(HoursSentinel),
    Range { open: String, close: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoursSentinel {
    #[serde(rename = "24 hours")]
    OpenAllDay,
    #[serde(rename = "closed")]
    Closed,
}

impl DaySchedule {
    pub fn range(open: impl Into<String>, close: impl Into<String>) -> Self {
        DaySchedule::Range {
            open: open.into(),
            close: close.into(),
        }
    }

    pub fn all_day() -> Self {
        DaySchedule::Sentinel(HoursSentinel::OpenAllDay)
    }

    pub fn closed() -> Self {
        DaySchedule::Sentinel(HoursSentinel::Closed)
    }
}

/// Store geolocation: a GeoJSON point, or an empty object when the source
/// coordinates could not be validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    Point(GeoPoint),
    Missing {},
}

impl Location {
    pub fn missing() -> Self {
        Location::Missing {}
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Location::Missing {})
    }

    pub fn point(&self) -> Option<&GeoPoint> {
        match self {
            Location::Point(point) => Some(point),
            Location::Missing {} => None,
        }
    }
}

/// GeoJSON point. Coordinates are ordered longitude first, then latitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: PointKind,
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointKind {
    Point,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: PointKind::Point,
            coordinates: [longitude, latitude],
        }
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}
