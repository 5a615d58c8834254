// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static registry of known node errors.

use serde::Serialize;

/// A failure condition that can apply to a node
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct NodeError {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// The Docker daemon is unusable, so no Docker tasks can run
    pub daemon_bad: bool,
    /// Image pulls should not be attempted
    pub pull_bad: bool,
}

pub static BAD_DAEMON: NodeError = NodeError {
    name: "BAD_DAEMON",
    title: "Docker Not Responding",
    description: "The Docker daemon on this node is not responding.",
    daemon_bad: true,
    pull_bad: true,
};

pub static BAD_LOGSTASH: NodeError = NodeError {
    name: "BAD_LOGSTASH",
    title: "Logstash Not Responding",
    description: "The Scale logstash is not responding to this node.",
    daemon_bad: false,
    pull_bad: false,
};

pub static CLEANUP: NodeError = NodeError {
    name: "CLEANUP",
    title: "Cleanup Failure",
    description: "The node failed to clean up some Scale Docker containers and volumes.",
    daemon_bad: false,
    pull_bad: false,
};

pub static HEALTH_TIMEOUT: NodeError = NodeError {
    name: "HEALTH_TIMEOUT",
    title: "Health Check Timeout",
    description: "The last node health check timed out.",
    daemon_bad: false,
    pull_bad: false,
};

pub static IMAGE_PULL: NodeError = NodeError {
    name: "IMAGE_PULL",
    title: "Image Pull Failure",
    description: "The node failed to pull the Scale Docker image from the registry.",
    daemon_bad: false,
    pull_bad: false,
};

pub static LOW_DOCKER_SPACE: NodeError = NodeError {
    name: "LOW_DOCKER_SPACE",
    title: "Low Docker Disk Space",
    description: "The free disk space available to Docker is low.",
    daemon_bad: false,
    pull_bad: true,
};

/// Every known error, sorted by name
pub static ALL: [&NodeError; 6] =
    [&BAD_DAEMON, &BAD_LOGSTASH, &CLEANUP, &HEALTH_TIMEOUT, &IMAGE_PULL, &LOW_DOCKER_SPACE];

/// Errors raised by health check tasks; cleared together on every health result
pub static HEALTH_ERRORS: [&NodeError; 4] =
    [&BAD_DAEMON, &BAD_LOGSTASH, &HEALTH_TIMEOUT, &LOW_DOCKER_SPACE];

pub fn lookup(name: &str) -> Option<&'static NodeError> {
    ALL.iter().copied().find(|e| e.name == name)
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
