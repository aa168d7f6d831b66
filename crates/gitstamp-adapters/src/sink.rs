use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use gitstamp_core::domain::INFO_DIR;
use gitstamp_core::{ArtifactSinkPort, PortError, ProvenanceEntry};

/// Writes provenance text files under `<root>/GitInfoInBuild/`.
#[derive(Debug, Clone)]
pub struct FileSinkAdapter {
    root: PathBuf,
    sidecar_extension: Option<String>,
}

impl FileSinkAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sidecar_extension: None,
        }
    }

    /// Also delete `<root>/GitInfoInBuild<ext>` on cleanup (e.g. `.meta`).
    pub fn with_sidecar(mut self, extension: impl Into<String>) -> Self {
        self.sidecar_extension = Some(extension.into());
        self
    }

    pub fn info_dir(&self) -> PathBuf {
        self.root.join(INFO_DIR)
    }

    pub fn entry_path(&self, entry: ProvenanceEntry) -> PathBuf {
        self.root.join(entry.relative_path())
    }

    fn sidecar_path(&self) -> Option<PathBuf> {
        self.sidecar_extension
            .as_ref()
            .map(|ext| self.root.join(format!("{INFO_DIR}{ext}")))
    }
}

impl ArtifactSinkPort for FileSinkAdapter {
    fn describe(&self) -> String {
        self.info_dir().display().to_string()
    }

    fn write_entry(&self, entry: ProvenanceEntry, contents: &str) -> Result<(), PortError> {
        let path = self.entry_path(entry);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        fs::write(&path, contents).map_err(|e| io_error(&path, e))?;
        debug!(path = %path.display(), "wrote provenance entry");
        Ok(())
    }

    fn remove_all(&self) -> Result<(), PortError> {
        // The sidecar can outlive its directory, so it goes first.
        if let Some(sidecar) = self.sidecar_path() {
            match fs::remove_file(&sidecar) {
                Ok(()) => debug!(path = %sidecar.display(), "removed sidecar"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(io_error(&sidecar, e)),
            }
        }

        let dir = self.info_dir();
        match fs::remove_dir_all(&dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(PortError::NotFound(dir.display().to_string()))
            }
            Err(e) => Err(io_error(&dir, e)),
        }
    }
}

fn io_error(path: &Path, e: io::Error) -> PortError {
    PortError::Io(format!("{}: {e}", path.display()))
}
