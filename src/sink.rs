use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::StoreRecord;

/// Downstream boundary for emitted records. Persistence beyond this trait
/// is someone else's problem.
pub trait RecordSink {
    fn emit(&mut self, record: &StoreRecord) -> anyhow::Result<()>;
}

/// File-based sink writing one canonical record per NDJSON line.
pub struct JsonLinesSink {
    writer: BufWriter<std::fs::File>,
    path: PathBuf,
    emitted: usize,
}

impl JsonLinesSink {
    pub fn create(path: &Path) -> anyhow::Result<Self> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        info!("writing canonical records to {}", path.display());

        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            emitted: 0,
        })
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl RecordSink for JsonLinesSink {
    fn emit(&mut self, record: &StoreRecord) -> anyhow::Result<()> {
        let line = serde_json::to_string(record)?;
        writeln!(self.writer, "{}", line)?;
        self.emitted += 1;
        Ok(())
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub records: Vec<StoreRecord>,
}

impl RecordSink for CollectingSink {
    fn emit(&mut self, record: &StoreRecord) -> anyhow::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
