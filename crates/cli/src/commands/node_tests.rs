// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use scale_node::{TaskKind, TaskOutcome};
use serial_test::serial;

const EVENTS: &str = r#"
{"host": "node-1", "task": "health", "outcome": "failed", "exit_code": 2}
{"host": "node-2", "task": "pull", "outcome": "timed_out"}

{"host": "node-1", "task": "cleanup", "outcome": "failed"}
"#;

#[test]
fn blank_lines_are_skipped() {
    let events = parse_events(EVENTS).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].task, TaskKind::Health);
    assert_eq!(events[0].outcome, TaskOutcome::Failed { exit_code: Some(2) });
    assert_eq!(events[1].outcome, TaskOutcome::TimedOut);
}

#[test]
fn parse_error_names_the_line() {
    let text = "{\"host\": \"a\", \"task\": \"pull\", \"outcome\": \"completed\"}\n\n{\"host\": \"a\", \"task\": \"reboot\"}\n";
    let err = parse_events(text).unwrap_err();
    assert!(format!("{err}").starts_with("line 3:"), "{err}");
}

#[test]
fn replay_registers_hosts_and_applies_events() {
    let statuses = replay(&parse_events(EVENTS).unwrap());
    assert_eq!(statuses.len(), 2);

    let node1 = &statuses[0];
    assert_eq!(node1.hostname, "node-1");
    assert!(node1.is_daemon_bad);
    assert!(node1.is_pull_bad);
    assert!(!node1.is_health_check_normal);
    let names: Vec<&str> = node1.errors.iter().map(|e| e.error.name).collect();
    assert_eq!(names, vec!["BAD_DAEMON", "CLEANUP"]);

    // A pull failure is reported but does not block further pulls
    let node2 = &statuses[1];
    assert!(!node2.is_pull_bad);
    assert!(node2.is_health_check_normal);
    assert_eq!(node2.errors[0].error.name, "IMAGE_PULL");
}

#[test]
fn later_success_clears_earlier_failure() {
    let events = parse_events(
        "{\"host\": \"n\", \"task\": \"pull\", \"outcome\": \"failed\"}\n\
         {\"host\": \"n\", \"task\": \"pull\", \"outcome\": \"completed\"}\n",
    )
    .unwrap();
    let statuses = replay(&events);
    assert!(statuses[0].errors.is_empty());
}

#[test]
#[serial]
fn render_marks_flags_and_errors() {
    std::env::set_var("NO_COLOR", "1");
    let statuses = replay(&parse_events(EVENTS).unwrap());
    let out = render_statuses(&statuses);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0].split_whitespace().collect::<Vec<_>>(), ["HOST", "DAEMON", "PULL", "HEALTH", "ERRORS"]);
    assert_eq!(lines[1].split_whitespace().collect::<Vec<_>>(), ["node-1", "bad", "bad", "bad", "BAD_DAEMON,CLEANUP"]);
    assert_eq!(lines[2].split_whitespace().collect::<Vec<_>>(), ["node-2", "ok", "ok", "ok", "IMAGE_PULL"]);
    std::env::remove_var("NO_COLOR");
}
