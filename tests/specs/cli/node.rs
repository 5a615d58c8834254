// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `scale node replay` specs

use crate::prelude::*;

const EVENTS: &str = r#"{"host": "node-1", "task": "health", "outcome": "failed", "exit_code": 3}
{"host": "node-2", "task": "health", "outcome": "completed"}
{"host": "node-1", "task": "pull", "outcome": "failed"}
"#;

#[test]
fn replay_prints_node_table() {
    let state = StateDir::empty();
    let events = state.file("events.jsonl", EVENTS);
    cli()
        .args(&["node", "replay", &events.display().to_string()])
        .passes()
        .stdout_eq(
            "HOST    DAEMON  PULL  HEALTH  ERRORS\n\
             node-1  ok      bad   bad     IMAGE_PULL,LOW_DOCKER_SPACE\n\
             node-2  ok      ok    ok      -\n",
        );
}

#[test]
fn replay_json_includes_error_details() {
    let state = StateDir::empty();
    let events = state.file("events.jsonl", EVENTS);
    let json = cli().args(&["node", "replay", "-o", "json", &events.display().to_string()]).passes().json();

    let nodes = json.as_array().unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0]["hostname"], "node-1");
    assert_eq!(nodes[0]["is_pull_bad"], true);
    assert_eq!(nodes[0]["is_daemon_bad"], false);
    assert_eq!(nodes[0]["errors"][1]["name"], "LOW_DOCKER_SPACE");
    assert!(nodes[0]["errors"][1]["started"].is_string());
    assert_eq!(nodes[1]["errors"], serde_json::json!([]));
}

#[test]
fn replay_reads_stdin() {
    cli()
        .args(&["node", "replay", "-"])
        .stdin("{\"host\": \"n\", \"task\": \"health\", \"outcome\": \"timed_out\"}\n")
        .passes()
        .stdout_has("HEALTH_TIMEOUT");
}

#[test]
fn unknown_health_code_activates_nothing() {
    cli()
        .args(&["node", "replay", "-"])
        .stdin("{\"host\": \"n\", \"task\": \"health\", \"outcome\": \"failed\", \"exit_code\": 9}\n")
        .passes()
        .stdout_has("n     ok      ok    bad     -");
}

#[test]
fn malformed_event_fails_with_line_number() {
    cli()
        .args(&["node", "replay", "-"])
        .stdin("{\"host\": \"n\", \"task\": \"pull\", \"outcome\": \"completed\"}\nnot json\n")
        .exits(1)
        .stderr_has("line 2");
}

#[test]
fn missing_events_file_fails() {
    let state = StateDir::empty();
    cli()
        .args(&["node", "replay", &state.path().join("nope.jsonl").display().to_string()])
        .exits(1)
        .stderr_has("cannot read");
}
