use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::text::clean;
use super::{FieldIssue, IssueSeverity};
use crate::domain::{Day, DaySchedule};

/// Strips everything but letters and digits before sentinel matching, so
/// "Open 24 Hours", "open24hours" and "24 hrs." collapse to one token.
static NON_ALNUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]").unwrap());

/// 24-hour sentinels after token normalization.
static ALL_DAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:open)?24(?:hours?|hrs?)?$").unwrap());

/// Repairs missing whitespace between digits and a meridiem suffix
/// ("9:00am" -> "9:00 am"). A cleanup, not a 12/24-hour conversion.
static MERIDIEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)\s*([ap]m)\b").unwrap());

/// Convert a raw per-day hours mapping into the canonical weekly schedule.
/// Day keys are matched case-insensitively; unrecognized keys are dropped
/// with a warning. Days whose value cannot be read are omitted silently —
/// absent hours are normal, never an error. A wholly missing block yields an
/// empty mapping.
pub fn normalize(raw: Option<&Value>) -> (BTreeMap<Day, DaySchedule>, Vec<FieldIssue>) {
    let mut schedule = BTreeMap::new();
    let mut issues = Vec::new();

    let entries = match raw.and_then(Value::as_object) {
        Some(entries) => entries,
        None => return (schedule, issues),
    };

    for (key, value) in entries {
        let day = match Day::parse(key) {
            Some(day) => day,
            None => {
                issues.push(FieldIssue {
                    field: "hours",
                    severity: IssueSeverity::Warning,
                    message: format!("unrecognized day key '{}' dropped", key),
                });
                continue;
            }
        };

        match schedule_from_value(value) {
            Some(day_schedule) => {
                schedule.insert(day, day_schedule);
            }
            None => {
                issues.push(FieldIssue {
                    field: "hours",
                    severity: IssueSeverity::Debug,
                    message: format!("no usable hours for {}, day omitted", day.as_str()),
                });
            }
        }
    }

    (schedule, issues)
}

fn schedule_from_value(value: &Value) -> Option<DaySchedule> {
    match value {
        Value::String(raw) => sentinel(raw),
        Value::Object(entry) => {
            let open = clean(entry.get("open").and_then(Value::as_str).unwrap_or_default())
                .to_lowercase();
            let close = clean(entry.get("close").and_then(Value::as_str).unwrap_or_default())
                .to_lowercase();

            // The open token doubles as the sentinel carrier upstream.
            if let Some(day_schedule) = sentinel(&open) {
                return Some(day_schedule);
            }
            if open.is_empty() && close.is_empty() {
                return None;
            }
            Some(DaySchedule::Range {
                open: format_time(&open),
                close: format_time(&close),
            })
        }
        _ => None,
    }
}

fn sentinel(raw: &str) -> Option<DaySchedule> {
    let token = NON_ALNUM_RE
        .replace_all(&raw.to_lowercase(), "")
        .into_owned();
    if token == "closed" {
        return Some(DaySchedule::closed());
    }
    if ALL_DAY_RE.is_match(&token) {
        return Some(DaySchedule::all_day());
    }
    None
}

fn format_time(time: &str) -> String {
    MERIDIEM_RE.replace_all(time, "${1} ${2}").into_owned()
}
