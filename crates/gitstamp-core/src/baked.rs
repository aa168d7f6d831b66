use std::cell::OnceCell;

use tracing::{debug, error};

use crate::domain::{
    ProvenanceEntry, ProvenanceRecord, MISSING_BUILD_TIME, MISSING_HASH, MISSING_STATUS,
};
use crate::ports::ResourceStorePort;

/// Reads provenance persisted at bake time.
///
/// The three entries are loaded together on first access and cached for the
/// lifetime of the value. Missing or empty entries degrade to fallback strings,
/// so every field is always set after the load.
#[derive(Debug)]
pub struct BakedProvenance<S>
where
    S: ResourceStorePort,
{
    store: S,
    cache: OnceCell<Loaded>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadIssueKind {
    Missing,
    Empty,
    ReadFailed,
}

/// An error reported while loading one baked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadIssue {
    pub entry: ProvenanceEntry,
    pub kind: LoadIssueKind,
}

#[derive(Debug)]
struct Loaded {
    record: ProvenanceRecord,
    issues: Vec<LoadIssue>,
}

impl<S> BakedProvenance<S>
where
    S: ResourceStorePort,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    pub fn record(&self) -> &ProvenanceRecord {
        &self.loaded().record
    }

    /// Errors reported by the one-time load, triggering it if needed.
    pub fn load_issues(&self) -> &[LoadIssue] {
        &self.loaded().issues
    }

    pub fn hash(&self) -> &str {
        &self.record().hash
    }

    pub fn status(&self) -> &str {
        &self.record().status
    }

    pub fn build_time(&self) -> &str {
        &self.record().build_time
    }

    fn loaded(&self) -> &Loaded {
        self.cache.get_or_init(|| self.load())
    }

    fn load(&self) -> Loaded {
        debug!("loading baked provenance");
        let mut issues = Vec::new();
        let record = ProvenanceRecord {
            hash: self.load_entry(ProvenanceEntry::Hash, &mut issues),
            status: self.load_entry(ProvenanceEntry::Status, &mut issues),
            build_time: self.load_entry(ProvenanceEntry::BuildTime, &mut issues),
        };
        Loaded { record, issues }
    }

    fn load_entry(&self, entry: ProvenanceEntry, issues: &mut Vec<LoadIssue>) -> String {
        let key = entry.resource_key();
        let mut report = |kind| issues.push(LoadIssue { entry, kind });

        let value = match self.store.read(&key) {
            Ok(value) => value,
            Err(e) => {
                error!(%key, error = %e, "failed to read baked provenance entry");
                report(LoadIssueKind::ReadFailed);
                return missing_value(entry).to_owned();
            }
        };

        match value {
            Some(value) if !value.is_empty() => value,
            // A clean tree bakes an empty status.
            Some(value) if entry == ProvenanceEntry::Status => value,
            Some(value) => {
                error!(%key, "baked provenance entry is empty");
                report(LoadIssueKind::Empty);
                value
            }
            None => {
                error!(%key, "baked provenance entry is missing");
                report(LoadIssueKind::Missing);
                missing_value(entry).to_owned()
            }
        }
    }
}

fn missing_value(entry: ProvenanceEntry) -> &'static str {
    match entry {
        ProvenanceEntry::Hash => MISSING_HASH,
        ProvenanceEntry::Status => MISSING_STATUS,
        ProvenanceEntry::BuildTime => MISSING_BUILD_TIME,
    }
}
