use anyhow::Result;
use tracing::{debug, info, warn};

use crate::adapters;
use crate::envelope::SourceEnvelope;
use crate::pipeline::processing::{Disposition, IssueSeverity, NormalizationPipeline};
use crate::sink::RecordSink;

pub mod processing;

/// Counters for one processed envelope, summed across a whole run by the
/// driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total_records: usize,
    pub emitted: usize,
    pub rejected_invalid: usize,
    pub rejected_duplicate: usize,
}

impl RunSummary {
    pub fn absorb(&mut self, other: RunSummary) {
        self.total_records += other.total_records;
        self.emitted += other.emitted;
        self.rejected_invalid += other.rejected_invalid;
        self.rejected_duplicate += other.rejected_duplicate;
    }
}

/// Drive one fetched envelope through adapter extraction and the
/// normalization pipeline, handing emitted records to the sink. This is the
/// host edge where the pipeline's returned diagnostics get wired onto log
/// levels: field fallbacks and invalid rejections at warn, duplicates at
/// debug.
pub fn process_envelope(
    pipeline: &NormalizationPipeline,
    envelope: &SourceEnvelope,
    sink: &mut dyn RecordSink,
) -> Result<RunSummary> {
    let raw_inputs = adapters::extract(envelope.shape, &envelope.payload);
    debug!(
        source_id = %envelope.source_id,
        url = %envelope.url,
        records = raw_inputs.len(),
        "extracted raw store mappings"
    );

    let mut summary = RunSummary::default();
    for raw in raw_inputs {
        summary.total_records += 1;
        let outcome = pipeline.process(raw, &envelope.url);

        for issue in &outcome.issues {
            match issue.severity {
                IssueSeverity::Warning => {
                    warn!(url = %envelope.url, field = issue.field, "{}", issue.message)
                }
                IssueSeverity::Debug => {
                    debug!(url = %envelope.url, field = issue.field, "{}", issue.message)
                }
            }
        }

        match outcome.disposition {
            Disposition::Emitted(record) => {
                sink.emit(&record)?;
                summary.emitted += 1;
            }
            Disposition::RejectedInvalid { missing_fields } => {
                warn!(
                    url = %envelope.url,
                    missing = ?missing_fields,
                    "store record rejected: missing required fields"
                );
                summary.rejected_invalid += 1;
            }
            Disposition::RejectedDuplicate { key } => {
                debug!(url = %envelope.url, key = %key, "store record rejected: duplicate");
                summary.rejected_duplicate += 1;
            }
        }
    }

    info!(
        source_id = %envelope.source_id,
        url = %envelope.url,
        emitted = summary.emitted,
        invalid = summary.rejected_invalid,
        duplicate = summary.rejected_duplicate,
        "envelope processed"
    );
    Ok(summary)
}
