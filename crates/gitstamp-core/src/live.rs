use std::path::PathBuf;

use tracing::{debug, error};

use crate::domain::{ProvenanceRecord, BUILD_TIME_FORMAT, GIT_HEAD_ARGS, GIT_STATUS_ARGS};
use crate::ports::{ClockPort, CommandPort, PortError};

/// Queries git on every access. Used from an editable checkout.
#[derive(Debug, Clone)]
pub struct LiveProvenance<R, C>
where
    R: CommandPort,
    C: ClockPort,
{
    runner: R,
    clock: C,
    git: String,
    repo_root: PathBuf,
}

impl<R, C> LiveProvenance<R, C>
where
    R: CommandPort,
    C: ClockPort,
{
    pub fn new(runner: R, clock: C, git: impl Into<String>, repo_root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            clock,
            git: git.into(),
            repo_root: repo_root.into(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn try_hash(&self) -> Result<String, PortError> {
        self.git(&GIT_HEAD_ARGS)
    }

    pub fn try_status(&self) -> Result<String, PortError> {
        self.git(&GIT_STATUS_ARGS)
    }

    pub fn try_build_time(&self) -> Result<String, PortError> {
        let now = self.clock.now_utc()?;
        Ok(now.format(BUILD_TIME_FORMAT).to_string())
    }

    pub fn try_record(&self) -> Result<ProvenanceRecord, PortError> {
        Ok(ProvenanceRecord {
            hash: self.try_hash()?,
            status: self.try_status()?,
            build_time: self.try_build_time()?,
        })
    }

    pub fn hash(&self) -> String {
        self.try_hash().unwrap_or_else(|e| {
            error!(error = %e, "failed to read git hash");
            String::new()
        })
    }

    pub fn status(&self) -> String {
        self.try_status().unwrap_or_else(|e| {
            error!(error = %e, "failed to read git status");
            String::new()
        })
    }

    pub fn build_time(&self) -> String {
        self.try_build_time().unwrap_or_else(|e| {
            error!(error = %e, "failed to read build time");
            String::new()
        })
    }

    pub fn record(&self) -> ProvenanceRecord {
        ProvenanceRecord {
            hash: self.hash(),
            status: self.status(),
            build_time: self.build_time(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<String, PortError> {
        debug!(git = %self.git, ?args, root = %self.repo_root.display(), "running git");
        self.runner
            .run(&self.git, args, &self.repo_root)?
            .into_stdout()
    }
}
