use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use gitstamp_adapters::GitStampConfig;
use gitstamp_core::{ClockPort, ProvenanceMode};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn repo_root_drives_default_destinations() {
    let cfg = GitStampConfig::from_lookup(lookup(&[("GITSTAMP_REPO_ROOT", "/src/app")]));

    assert_eq!(cfg.repo_root, PathBuf::from("/src/app"));
    assert_eq!(cfg.embedded_root, PathBuf::from("/src/app/resources"));
    assert_eq!(cfg.shipped_root, PathBuf::from("/src/app/target/gitstamp"));
    assert_eq!(cfg.git_executable, "git");
    assert!(!cfg.strict);
    assert_eq!(cfg.sinks().len(), 2);
}

#[test]
fn environment_overrides_every_field() {
    let cfg = GitStampConfig::from_lookup(lookup(&[
        ("GITSTAMP_REPO_ROOT", "/src/app"),
        ("GITSTAMP_GIT", "/usr/local/bin/git"),
        ("GITSTAMP_EMBED_ROOT", "/tmp/embed"),
        ("GITSTAMP_SHIP_ROOT", "/tmp/ship"),
        ("GITSTAMP_COMMAND_TIMEOUT_MS", "1500"),
        ("GITSTAMP_STRICT", "true"),
        ("GITSTAMP_SIDECAR_EXT", ".meta"),
        ("GITSTAMP_MODE", "baked"),
        ("SOURCE_DATE_EPOCH", "1772874302"),
    ]));

    assert_eq!(cfg.git_executable, "/usr/local/bin/git");
    assert_eq!(cfg.embedded_root, PathBuf::from("/tmp/embed"));
    assert_eq!(cfg.shipped_root, PathBuf::from("/tmp/ship"));
    assert_eq!(cfg.command_runner().timeout(), Some(Duration::from_millis(1500)));
    assert!(cfg.strict);
    assert_eq!(cfg.sidecar_extension.as_deref(), Some(".meta"));
    assert_eq!(cfg.mode, ProvenanceMode::Baked);

    let now = cfg.clock().expect("clock").now_utc().expect("now");
    assert_eq!(now.format("%Y/%m/%d %H:%M:%S").to_string(), "2026/03/07 09:05:02");
}

#[test]
fn invalid_values_keep_defaults() {
    let cfg = GitStampConfig::from_lookup(lookup(&[
        ("GITSTAMP_REPO_ROOT", "/src/app"),
        ("GITSTAMP_COMMAND_TIMEOUT_MS", "soon"),
        ("GITSTAMP_MODE", "packaged"),
        ("SOURCE_DATE_EPOCH", "yesterday"),
    ]));
    let defaults = GitStampConfig::with_repo_root("/src/app");

    assert_eq!(cfg.command_timeout_ms, 30_000);
    assert_eq!(cfg.mode, defaults.mode);
    assert_eq!(cfg.source_date_epoch, None);
}

#[test]
fn zero_timeout_disables_it() {
    let cfg = GitStampConfig {
        command_timeout_ms: 0,
        ..GitStampConfig::with_repo_root("/src/app")
    };
    assert_eq!(cfg.command_runner().timeout(), None);
}
