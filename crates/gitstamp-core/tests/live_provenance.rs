mod common;

use gitstamp_core::{PortError, ProvenanceMode, ProvenanceService};

use common::{clean_repo, live, ScriptedRunner, HEAD};

#[test]
fn hash_trims_trailing_newline() {
    let live = live(ScriptedRunner::default().respond("rev-parse HEAD", 0, "deadbeef\n", ""));
    assert_eq!(live.hash(), "deadbeef");
}

#[test]
fn clean_tree_has_empty_status() {
    let live = live(clean_repo());
    assert_eq!(live.status(), "");
    assert!(live.record().is_clean());
}

#[test]
fn dirty_tree_lists_changed_paths() {
    let runner = clean_repo().respond("status --porcelain", 0, " M src/main.rs\n?? notes.txt\n", "");
    let live = live(runner);

    let status = live.status();
    assert_eq!(status, " M src/main.rs\n?? notes.txt");
    assert!(status.contains("src/main.rs"));
}

#[test]
fn build_time_uses_fixed_utc_format() {
    let live = live(clean_repo());
    assert_eq!(live.build_time(), "2026/03/07 09:05:02");
}

#[test]
fn live_accessors_query_git_every_time() {
    let service = ProvenanceService::new(live(clean_repo()));
    assert_eq!(service.mode(), ProvenanceMode::Live);

    assert_eq!(service.hash(), HEAD);
    assert_eq!(service.hash(), HEAD);
    assert_eq!(service.hash_short(), "a1b2c3d4");
    assert_eq!(service.status(), "");
    assert_eq!(service.source().runner().calls(), 4);

    let record = service.record();
    assert_eq!(record.hash, HEAD);
    assert_eq!(service.source().runner().calls(), 6);
}

#[test]
fn failed_git_degrades_to_empty() {
    let runner = ScriptedRunner::default().respond(
        "rev-parse HEAD",
        128,
        "",
        "fatal: not a git repository (or any of the parent directories): .git\n",
    );
    let live = live(runner);

    assert_eq!(live.hash(), "");
    assert_eq!(live.status(), "");
    assert_eq!(ProvenanceService::new(live).hash_short(), "");
}

#[test]
fn strict_accessors_carry_exit_code_and_stderr() {
    let runner = ScriptedRunner::default().respond(
        "rev-parse HEAD",
        128,
        "",
        "fatal: not a git repository\n",
    );
    let live = live(runner);

    match live.try_hash().expect_err("strict hash must fail") {
        PortError::CommandFailed { code, stderr } => {
            assert_eq!(code, Some(128));
            assert_eq!(stderr, "fatal: not a git repository");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = live.try_status().expect_err("git missing");
    assert!(err.to_string().contains("failed to spawn git"));
}
