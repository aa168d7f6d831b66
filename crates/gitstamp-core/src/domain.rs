use std::fmt;

use serde::{Deserialize, Serialize};

/// Directory (and key prefix) shared by every persisted provenance entry.
pub const INFO_DIR: &str = "GitInfoInBuild";

/// `chrono` format for build timestamps: `yyyy/MM/dd HH:mm:ss`, always UTC.
pub const BUILD_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

pub const HASH_SHORT_LEN: usize = 8;

/// Hash value used when the baked hash entry is missing entirely.
pub const MISSING_HASH: &str = "0";
pub const MISSING_STATUS: &str = "Git status unavailable";
pub const MISSING_BUILD_TIME: &str = "Build time unavailable";

pub const GIT_HEAD_ARGS: [&str; 2] = ["rev-parse", "HEAD"];
pub const GIT_STATUS_ARGS: [&str; 2] = ["status", "--porcelain"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProvenanceEntry {
    Hash,
    Status,
    BuildTime,
}

impl ProvenanceEntry {
    pub const ALL: [ProvenanceEntry; 3] = [
        ProvenanceEntry::Hash,
        ProvenanceEntry::Status,
        ProvenanceEntry::BuildTime,
    ];

    pub fn stem(self) -> &'static str {
        match self {
            ProvenanceEntry::Hash => "gitHash",
            ProvenanceEntry::Status => "gitStatus",
            ProvenanceEntry::BuildTime => "buildTime",
        }
    }

    /// Extension-less logical key used by embedded resource stores.
    pub fn resource_key(self) -> String {
        format!("{INFO_DIR}/{}", self.stem())
    }

    /// Path of the text file relative to a destination root.
    pub fn relative_path(self) -> String {
        format!("{INFO_DIR}/{}.txt", self.stem())
    }
}

impl fmt::Display for ProvenanceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// The hash/status/build-time triple identifying the source state of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvenanceRecord {
    pub hash: String,
    /// Porcelain status lines; empty means a clean working tree.
    pub status: String,
    pub build_time: String,
}

impl ProvenanceRecord {
    pub fn hash_short(&self) -> &str {
        truncate(Some(&self.hash), HASH_SHORT_LEN)
    }

    pub fn is_clean(&self) -> bool {
        self.status.is_empty()
    }

    pub fn value(&self, entry: ProvenanceEntry) -> &str {
        match entry {
            ProvenanceEntry::Hash => &self.hash,
            ProvenanceEntry::Status => &self.status,
            ProvenanceEntry::BuildTime => &self.build_time,
        }
    }
}

impl fmt::Display for ProvenanceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = if self.is_clean() { "clean" } else { "dirty" };
        write!(f, "{} ({tree}) built {}", self.hash_short(), self.build_time)
    }
}

/// Returns at most `max_chars` leading characters of `value`; `None` maps to `""`.
pub fn truncate(value: Option<&str>, max_chars: usize) -> &str {
    let Some(value) = value else {
        return "";
    };
    match value.char_indices().nth(max_chars) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// Strips one trailing `\r\n`, `\n` or `\r`.
pub fn trim_trailing_newline(mut text: String) -> String {
    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    } else if text.ends_with('\n') || text.ends_with('\r') {
        text.truncate(text.len() - 1);
    }
    text
}
