// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `scale db` specs

use crate::prelude::*;

const PHASES: [&str; 5] = ["job_exe", "job_exe_dup", "recipe_fields", "batch_fields", "job_type_manifest"];

#[test]
fn status_on_empty_state_lists_pending_phases() {
    let state = StateDir::empty();
    let result = cli().args(&["db", "status", "--state-dir", &state.arg()]).passes().stdout_has("PHASE");
    for phase in PHASES {
        assert!(result.stdout.contains(phase), "missing {phase}:\n{}", result.stdout);
    }
    result.stdout_has("pending").stdout_has("seq 0");
}

#[test]
fn status_json_reports_phases_in_run_order() {
    let state = StateDir::empty();
    let json = cli().args(&["db", "status", "-o", "json", "--state-dir", &state.arg()]).passes().json();

    assert_eq!(json["seq"], 0);
    let names: Vec<&str> = json["phases"].as_array().unwrap().iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, PHASES);
    assert!(json["phases"].as_array().unwrap().iter().all(|p| p["state"] == "pending"));
}

#[test]
fn state_dir_comes_from_environment() {
    let state = StateDir::empty();
    cli().args(&["db", "status"]).env("SCALE_STATE_DIR", state.path()).passes();
    assert!(state.path().join("scale.lock").exists());
}

#[test]
fn update_on_empty_state_completes_every_phase() {
    let state = StateDir::empty();
    let json = cli().args(&["db", "update", "-o", "json", "--state-dir", &state.arg()]).passes().json();

    assert_eq!(json["outcome"], "completed");
    assert!(json["phases"].as_array().unwrap().iter().all(|p| p["state"] == "done"));
    assert!(json["checkpoint"]["size_bytes"].as_u64().unwrap() > 0);
    assert!(state.path().join("snapshot.json.zst").exists());
}

#[test]
fn second_update_writes_nothing_new() {
    let state = StateDir::empty();
    let first = cli().args(&["db", "update", "-o", "json", "--state-dir", &state.arg()]).passes().json();
    let second = cli().args(&["db", "update", "-o", "json", "--state-dir", &state.arg()]).passes().json();

    assert_eq!(first["seq"], second["seq"]);
    assert_eq!(second["journal_entries"], 0);
}

#[test]
fn status_after_update_shows_done() {
    let state = StateDir::empty();
    cli().args(&["db", "update", "--state-dir", &state.arg()]).passes().stdout_has("checkpoint at seq");
    cli().args(&["db", "status", "--state-dir", &state.arg()]).passes().stdout_has("done");
}

#[test]
fn checkpoint_reports_sequence() {
    let state = StateDir::empty();
    cli().args(&["db", "checkpoint", "--state-dir", &state.arg()]).passes().stdout_has("checkpoint at seq 0 (");
}

#[test]
fn log_file_receives_logs() {
    let state = StateDir::empty();
    let log = state.path().join("logs/scale.log");
    cli()
        .args(&["db", "update", "--state-dir", &state.arg(), "--log-file", &log.display().to_string()])
        .env("SCALE_LOG", "info")
        .passes();
    let text = std::fs::read_to_string(&log).unwrap();
    assert!(text.contains("database update complete"), "{text}");
}
