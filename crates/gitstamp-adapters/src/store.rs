use std::fs;
use std::io;
use std::path::PathBuf;

use gitstamp_core::{PortError, ResourceStorePort};

/// Reads `<root>/<key>.txt` from disk.
#[derive(Debug, Clone)]
pub struct DirectoryStoreAdapter {
    root: PathBuf,
}

impl DirectoryStoreAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceStorePort for DirectoryStoreAdapter {
    fn read(&self, key: &str) -> Result<Option<String>, PortError> {
        let path = self.root.join(format!("{key}.txt"));
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PortError::Io(format!("{}: {e}", path.display()))),
        }
    }
}

/// Key/value table compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticStoreAdapter {
    entries: &'static [(&'static str, &'static str)],
}

impl StaticStoreAdapter {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceStorePort for StaticStoreAdapter {
    fn read(&self, key: &str) -> Result<Option<String>, PortError> {
        Ok(self
            .entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_owned()))
    }
}
