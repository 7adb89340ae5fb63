use std::collections::HashSet;
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use crate::config::DedupKeyPolicy;
use crate::domain::StoreRecord;

/// Run-scoped registry of store keys already emitted. One instance lives
/// inside each pipeline and is discarded with it at run end; repeated or
/// concurrent runs never share state. The seen-set sits behind a mutex so
/// `claim` is a single atomic insert-if-absent, which keeps emission
/// at-most-once even if the pipeline is ever driven from parallel workers.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: Mutex<HashSet<String>>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure membership check against the run-scoped state.
    pub fn seen(&self, key: &str) -> bool {
        self.seen.lock().unwrap().contains(key)
    }

    /// Mark a key as emitted.
    pub fn record(&self, key: &str) {
        self.seen.lock().unwrap().insert(key.to_string());
    }

    /// Atomic check-then-record. Returns true when the key had not been
    /// seen before — the caller may emit exactly when this is true.
    pub fn claim(&self, key: &str) -> bool {
        self.seen.lock().unwrap().insert(key.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compose the duplicate-suppression key for a validated record under the
/// configured policy. Keys are SHA-256 digests of a canonical string so the
/// two key families cannot collide with each other.
pub fn dedup_key(policy: DedupKeyPolicy, record: &StoreRecord) -> String {
    match policy {
        DedupKeyPolicy::StoreNumber => match record.number.as_deref().filter(|n| !n.is_empty()) {
            Some(number) => digest(&format!("number|{}", number)),
            None => composite_key(&record.address, &record.url),
        },
        DedupKeyPolicy::AddressUrl => composite_key(&record.address, &record.url),
    }
}

/// Fallback key for records without a store number: formatted address plus
/// source page URL.
pub fn composite_key(address: &str, url: &str) -> String {
    digest(&format!("address|{}|{}", address, url))
}

fn digest(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
