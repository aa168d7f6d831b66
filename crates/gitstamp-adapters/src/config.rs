use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use gitstamp_core::{BakeLifecycle, LiveProvenance, PortError, ProvenanceMode};

use crate::clock::BuildClockAdapter;
use crate::command::ProcessCommandAdapter;
use crate::sink::FileSinkAdapter;
use crate::store::DirectoryStoreAdapter;

#[derive(Debug, Clone)]
pub struct GitStampConfig {
    pub git_executable: String,
    pub repo_root: PathBuf,
    /// Destination compiled into the binary's embedded store.
    pub embedded_root: PathBuf,
    /// Destination shipped as loose files next to the build output.
    pub shipped_root: PathBuf,
    /// `0` disables the timeout.
    pub command_timeout_ms: u64,
    pub strict: bool,
    pub sidecar_extension: Option<String>,
    pub mode: ProvenanceMode,
    /// Pins the build time (`SOURCE_DATE_EPOCH`).
    pub source_date_epoch: Option<i64>,
}

impl Default for GitStampConfig {
    fn default() -> Self {
        Self::with_repo_root(env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

impl GitStampConfig {
    pub fn with_repo_root(repo_root: impl Into<PathBuf>) -> Self {
        let repo_root = repo_root.into();
        Self {
            git_executable: "git".to_owned(),
            embedded_root: repo_root.join("resources"),
            shipped_root: repo_root.join("target").join("gitstamp"),
            repo_root,
            command_timeout_ms: 30_000,
            strict: false,
            sidecar_extension: None,
            mode: if cfg!(debug_assertions) {
                ProvenanceMode::Live
            } else {
                ProvenanceMode::Baked
            },
            source_date_epoch: None,
        }
    }

    /// Builds a config from `GITSTAMP_*` variables resolved through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("GITSTAMP_REPO_ROOT") {
            Some(root) => Self::with_repo_root(root),
            None => Self::default(),
        };

        if let Some(git) = lookup("GITSTAMP_GIT") {
            cfg.git_executable = git;
        }
        if let Some(root) = lookup("GITSTAMP_EMBED_ROOT") {
            cfg.embedded_root = PathBuf::from(root);
        }
        if let Some(root) = lookup("GITSTAMP_SHIP_ROOT") {
            cfg.shipped_root = PathBuf::from(root);
        }
        if let Some(raw) = lookup("GITSTAMP_COMMAND_TIMEOUT_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => cfg.command_timeout_ms = ms,
                Err(e) => warn!(%raw, error = %e, "ignoring invalid GITSTAMP_COMMAND_TIMEOUT_MS"),
            }
        }
        if let Some(raw) = lookup("GITSTAMP_STRICT") {
            cfg.strict = matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(ext) = lookup("GITSTAMP_SIDECAR_EXT").filter(|e| !e.is_empty()) {
            cfg.sidecar_extension = Some(ext);
        }
        if let Some(raw) = lookup("GITSTAMP_MODE") {
            match raw.parse::<ProvenanceMode>() {
                Ok(mode) => cfg.mode = mode,
                Err(e) => warn!(%raw, error = %e, "ignoring invalid GITSTAMP_MODE"),
            }
        }
        if let Some(raw) = lookup("SOURCE_DATE_EPOCH") {
            match raw.trim().parse::<i64>() {
                Ok(secs) => cfg.source_date_epoch = Some(secs),
                Err(e) => warn!(%raw, error = %e, "ignoring invalid SOURCE_DATE_EPOCH"),
            }
        }
        cfg
    }

    pub fn command_runner(&self) -> ProcessCommandAdapter {
        match self.command_timeout_ms {
            0 => ProcessCommandAdapter::without_timeout(),
            ms => ProcessCommandAdapter::with_timeout(Duration::from_millis(ms)),
        }
    }

    pub fn clock(&self) -> Result<BuildClockAdapter, PortError> {
        match self.source_date_epoch {
            Some(secs) => BuildClockAdapter::from_unix_seconds(secs),
            None => Ok(BuildClockAdapter::system()),
        }
    }

    pub fn live_provenance(
        &self,
    ) -> Result<LiveProvenance<ProcessCommandAdapter, BuildClockAdapter>, PortError> {
        Ok(LiveProvenance::new(
            self.command_runner(),
            self.clock()?,
            self.git_executable.clone(),
            self.repo_root.clone(),
        ))
    }

    /// Embedded destination first, then the shipped one.
    pub fn sinks(&self) -> Vec<FileSinkAdapter> {
        [&self.embedded_root, &self.shipped_root]
            .into_iter()
            .map(|root| {
                let sink = FileSinkAdapter::new(root.clone());
                match &self.sidecar_extension {
                    Some(ext) => sink.with_sidecar(ext.clone()),
                    None => sink,
                }
            })
            .collect()
    }

    pub fn lifecycle(&self) -> BakeLifecycle<FileSinkAdapter> {
        BakeLifecycle::new(self.sinks()).strict(self.strict)
    }

    /// Store over the loose files in the shipped destination.
    pub fn shipped_store(&self) -> DirectoryStoreAdapter {
        DirectoryStoreAdapter::new(self.shipped_root.clone())
    }
}
