#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use gitstamp_adapters::{GitStampConfig, ProcessCommandAdapter};

pub fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.name=gitstamp tests",
            "-c",
            "user.email=tests@gitstamp.invalid",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .status()
        .expect("spawn git");
    assert!(status.success(), "git {args:?} failed");
}

/// A repository with one committed file.
pub fn committed_repo() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    git(dir.path(), &["init", "--quiet"]);
    fs::write(dir.path().join("README.md"), "hello\n").expect("write readme");
    git(dir.path(), &["add", "README.md"]);
    git(dir.path(), &["commit", "--quiet", "-m", "initial"]);
    dir
}

pub fn head_of(dir: &Path) -> String {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(dir)
        .output()
        .expect("spawn git");
    String::from_utf8(output.stdout)
        .expect("utf8 hash")
        .trim()
        .to_owned()
}

/// Config rooted at `repo` with both destinations under `out`.
pub fn config_for(repo: &Path, out: &Path) -> GitStampConfig {
    GitStampConfig {
        embedded_root: out.join("resources"),
        shipped_root: out.join("shipped"),
        source_date_epoch: Some(1_772_874_302),
        ..GitStampConfig::with_repo_root(repo)
    }
}

pub fn runner() -> ProcessCommandAdapter {
    ProcessCommandAdapter::default()
}
