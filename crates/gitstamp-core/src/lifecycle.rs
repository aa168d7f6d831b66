use tracing::{info, warn};

use crate::domain::{ProvenanceEntry, ProvenanceRecord};
use crate::live::LiveProvenance;
use crate::ports::{ArtifactSinkPort, ClockPort, CommandPort, PortError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BakeWarning {
    EmptyHash,
    EmptyBuildTime,
    UncommittedChanges,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakeOutcome {
    pub record: ProvenanceRecord,
    pub warnings: Vec<BakeWarning>,
}

/// Prebuild/postbuild hooks around a set of destination trees.
///
/// `generate` runs before a build and `cleanup` after a successful one. A
/// failed build never reaches `cleanup`; the stale files it leaves behind are
/// overwritten by the next `generate`.
#[derive(Debug, Clone)]
pub struct BakeLifecycle<K>
where
    K: ArtifactSinkPort,
{
    sinks: Vec<K>,
    strict: bool,
}

impl<K> BakeLifecycle<K>
where
    K: ArtifactSinkPort,
{
    pub fn new(sinks: Vec<K>) -> Self {
        Self {
            sinks,
            strict: false,
        }
    }

    /// In strict mode a git failure aborts `generate` instead of baking empty values.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn generate<R, C>(&self, live: &LiveProvenance<R, C>) -> Result<BakeOutcome, PortError>
    where
        R: CommandPort,
        C: ClockPort,
    {
        let record = if self.strict {
            live.try_record()?
        } else {
            live.record()
        };

        let mut warnings = Vec::new();
        if record.hash.is_empty() {
            warn!("git hash is empty; baking without a commit id");
            warnings.push(BakeWarning::EmptyHash);
        }
        if record.build_time.is_empty() {
            warn!("build time is empty");
            warnings.push(BakeWarning::EmptyBuildTime);
        }
        if !record.is_clean() {
            warn!(status = %record.status, "building with uncommitted changes");
            warnings.push(BakeWarning::UncommittedChanges);
        }

        self.publish(&record)?;
        Ok(BakeOutcome { record, warnings })
    }

    /// Writes every entry of `record` to every sink, overwriting what is there.
    pub fn publish(&self, record: &ProvenanceRecord) -> Result<(), PortError> {
        for sink in &self.sinks {
            for entry in ProvenanceEntry::ALL {
                sink.write_entry(entry, record.value(entry))?;
            }
            info!(sink = %sink.describe(), hash = %record.hash_short(), "published provenance");
        }
        Ok(())
    }

    /// Removes every sink's artifacts.
    ///
    /// All sinks are attempted; the first failure (typically `NotFound` when
    /// nothing was baked) is returned after the rest have run.
    pub fn cleanup(&self) -> Result<(), PortError> {
        let mut first_err = None;
        for sink in &self.sinks {
            match sink.remove_all() {
                Ok(()) => info!(sink = %sink.describe(), "removed transient provenance artifacts"),
                Err(e) => {
                    warn!(sink = %sink.describe(), error = %e, "failed to remove provenance artifacts");
                    first_err.get_or_insert(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
