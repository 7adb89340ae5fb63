use serde::Serialize;

pub mod address;
pub mod dedup;
pub mod geo;
pub mod hours;
pub mod normalize;
pub mod services;
pub mod text;
pub mod validate;

pub use normalize::{Disposition, NormalizationPipeline, ProcessOutcome, RunContext};

/// A non-fatal field-level diagnostic. The pipeline collects these instead
/// of logging directly; the host maps them onto its log levels.
#[derive(Debug, Clone, Serialize)]
pub struct FieldIssue {
    /// Canonical record field the fallback applied to.
    pub field: &'static str,
    pub severity: IssueSeverity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Routine omission, worth a debug line at most.
    Debug,
    /// Data was lost or downgraded to a fallback value.
    Warning,
}
