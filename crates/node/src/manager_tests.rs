// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::task::{TaskKind, TaskOutcome, BAD_DAEMON_CODE, LOW_DOCKER_SPACE_CODE};
use scale_core::FakeClock;

fn event(host: &str, task: TaskKind, outcome: TaskOutcome) -> TaskEvent {
    TaskEvent { host: host.to_string(), task, outcome }
}

fn manager() -> NodeManager<FakeClock> {
    let mut manager = NodeManager::with_clock(FakeClock::new());
    for host in ["node-a", "node-b", "node-c"] {
        manager.register(host);
    }
    manager
}

#[test]
fn routes_events_to_nodes() {
    let mut manager = manager();
    let failed = TaskOutcome::Failed { exit_code: Some(BAD_DAEMON_CODE) };
    assert!(manager.handle(&event("node-a", TaskKind::Health, failed)));
    assert!(manager.get("node-a").unwrap().conditions.is_daemon_bad());
    assert!(!manager.get("node-b").unwrap().conditions.is_daemon_bad());
}

#[test]
fn unknown_host_is_ignored() {
    let mut manager = manager();
    assert!(!manager.handle(&event("ghost", TaskKind::Pull, TaskOutcome::TimedOut)));
    assert_eq!(manager.len(), 3);
}

#[test]
fn schedulable_and_pull_eligible_nodes() {
    let mut manager = manager();
    let low_space = TaskOutcome::Failed { exit_code: Some(LOW_DOCKER_SPACE_CODE) };
    manager.handle(&event("node-a", TaskKind::Health, low_space));
    manager.handle(&event("node-b", TaskKind::Pull, TaskOutcome::Failed { exit_code: None }));

    // Failed health check makes node-a unschedulable even though the daemon is fine
    assert_eq!(manager.schedulable_nodes(), vec!["node-b", "node-c"]);
    assert_eq!(manager.pull_eligible_nodes(), vec!["node-b", "node-c"]);

    manager.handle(&event("node-a", TaskKind::Health, TaskOutcome::Completed));
    assert_eq!(manager.schedulable_nodes(), vec!["node-a", "node-b", "node-c"]);
}

#[test]
fn reregister_keeps_conditions_and_remove_drops_them() {
    let mut manager = manager();
    manager.handle(&event("node-c", TaskKind::Cleanup, TaskOutcome::TimedOut));
    manager.register("node-c");
    assert!(manager.get("node-c").unwrap().conditions.is_active("CLEANUP"));

    assert!(manager.remove("node-c").is_some());
    assert!(manager.remove("node-c").is_none());
    manager.register("node-c");
    assert!(manager.get("node-c").unwrap().conditions.active_errors().is_empty());
}

#[test]
fn statuses_sorted_by_hostname() {
    let manager = manager();
    let hosts: Vec<_> = manager.statuses().into_iter().map(|s| s.hostname).collect();
    assert_eq!(hosts, vec!["node-a", "node-b", "node-c"]);
}
