// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    bad_daemon       = { "BAD_DAEMON", true, true },
    bad_logstash     = { "BAD_LOGSTASH", false, false },
    cleanup          = { "CLEANUP", false, false },
    health_timeout   = { "HEALTH_TIMEOUT", false, false },
    image_pull       = { "IMAGE_PULL", false, false },
    low_docker_space = { "LOW_DOCKER_SPACE", false, true },
)]
fn severity_flags(name: &str, daemon_bad: bool, pull_bad: bool) {
    let error = lookup(name).unwrap();
    assert_eq!(error.daemon_bad, daemon_bad);
    assert_eq!(error.pull_bad, pull_bad);
}

#[test]
fn names_are_unique_and_sorted() {
    let names: Vec<_> = ALL.iter().map(|e| e.name).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(names, sorted);
}

#[test]
fn lookup_returns_catalog_entry() {
    let error = lookup("CLEANUP").unwrap();
    assert!(std::ptr::eq(error, &CLEANUP));
    assert!(lookup("NOPE").is_none());
}

#[test]
fn health_errors_exclude_task_failures() {
    assert!(!HEALTH_ERRORS.iter().any(|e| e.name == "CLEANUP" || e.name == "IMAGE_PULL"));
}
