use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{trim_trailing_newline, ProvenanceEntry};

#[derive(Debug, Error)]
pub enum PortError {
    #[error("failed to spawn {program}: {message}")]
    Spawn { program: String, message: String },
    #[error("command timed out after {0} ms")]
    Timeout(u64),
    #[error("command failed with exit code {code:?}: {stderr}")]
    CommandFailed { code: Option<i32>, stderr: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("clock error: {0}")]
    Clock(String),
}

/// Exit code and captured streams of one finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Builds an output from raw stream text, trimming one trailing newline from each.
    pub fn from_raw(exit_code: Option<i32>, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout: trim_trailing_newline(stdout),
            stderr: trim_trailing_newline(stderr),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Returns stdout on exit code 0, otherwise a `CommandFailed` carrying stderr.
    pub fn into_stdout(self) -> Result<String, PortError> {
        if self.success() {
            Ok(self.stdout)
        } else {
            Err(PortError::CommandFailed {
                code: self.exit_code,
                stderr: self.stderr,
            })
        }
    }
}

pub trait CommandPort {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        working_dir: &Path,
    ) -> Result<CommandOutput, PortError>;
}

pub trait ClockPort {
    fn now_utc(&self) -> Result<DateTime<Utc>, PortError>;
}

/// Read side of the embedded persistence store.
pub trait ResourceStorePort {
    /// `Ok(None)` when the key is not present in the store.
    fn read(&self, key: &str) -> Result<Option<String>, PortError>;
}

/// One destination tree that bake output is published to.
pub trait ArtifactSinkPort {
    fn describe(&self) -> String;
    fn write_entry(&self, entry: ProvenanceEntry, contents: &str) -> Result<(), PortError>;
    /// Removes everything this sink wrote; `NotFound` when nothing is there.
    fn remove_all(&self) -> Result<(), PortError>;
}

impl<T: ArtifactSinkPort + ?Sized> ArtifactSinkPort for &T {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn write_entry(&self, entry: ProvenanceEntry, contents: &str) -> Result<(), PortError> {
        (**self).write_entry(entry, contents)
    }

    fn remove_all(&self) -> Result<(), PortError> {
        (**self).remove_all()
    }
}

impl<T: ArtifactSinkPort + ?Sized> ArtifactSinkPort for Box<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn write_entry(&self, entry: ProvenanceEntry, contents: &str) -> Result<(), PortError> {
        (**self).write_entry(entry, contents)
    }

    fn remove_all(&self) -> Result<(), PortError> {
        (**self).remove_all()
    }
}
