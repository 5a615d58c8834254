// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Current conditions of one node.

use chrono::{DateTime, Utc};
use scale_core::{Clock, SystemClock};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

use crate::catalog::{self, NodeError, HEALTH_ERRORS};
use crate::task::{BAD_DAEMON_CODE, BAD_LOGSTASH_CODE, LOW_DOCKER_SPACE_CODE};

/// An error currently in effect on a node
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveError {
    pub error: &'static NodeError,
    pub started: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Serialize for ActiveError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ActiveError", 5)?;
        s.serialize_field("name", self.error.name)?;
        s.serialize_field("title", self.error.title)?;
        s.serialize_field("description", self.error.description)?;
        s.serialize_field("started", &self.started)?;
        s.serialize_field("last_updated", &self.last_updated)?;
        s.end()
    }
}

/// Serializable view of a node's conditions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStatus {
    pub hostname: String,
    pub is_daemon_bad: bool,
    pub is_pull_bad: bool,
    pub is_health_check_normal: bool,
    pub errors: Vec<ActiveError>,
}

/// Set of error conditions currently applying to a node.
///
/// Mutated only through the task handlers below. The daemon and pull flags
/// are derived from the active errors after every change.
#[derive(Debug, Clone)]
pub struct NodeConditions<C: Clock = SystemClock> {
    hostname: String,
    clock: C,
    // Keyed by error name, so iteration is sorted
    active: BTreeMap<&'static str, ActiveError>,
    daemon_bad: bool,
    pull_bad: bool,
    health_check_normal: bool,
}

impl NodeConditions<SystemClock> {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self::with_clock(hostname, SystemClock)
    }
}

impl<C: Clock> NodeConditions<C> {
    pub fn with_clock(hostname: impl Into<String>, clock: C) -> Self {
        Self {
            hostname: hostname.into(),
            clock,
            active: BTreeMap::new(),
            daemon_bad: false,
            pull_bad: false,
            health_check_normal: true,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Whether the Docker daemon is unusable, preventing Docker tasks from running
    pub fn is_daemon_bad(&self) -> bool {
        self.daemon_bad
    }

    /// Whether the node should skip Docker image pulls
    pub fn is_pull_bad(&self) -> bool {
        self.pull_bad
    }

    /// Whether the last health check was normal
    pub fn is_health_check_normal(&self) -> bool {
        self.health_check_normal
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.contains_key(name)
    }

    /// Active errors, sorted by name
    pub fn active_errors(&self) -> Vec<ActiveError> {
        self.active.values().cloned().collect()
    }

    pub fn status(&self) -> NodeStatus {
        NodeStatus {
            hostname: self.hostname.clone(),
            is_daemon_bad: self.daemon_bad,
            is_pull_bad: self.pull_bad,
            is_health_check_normal: self.health_check_normal,
            errors: self.active_errors(),
        }
    }

    pub fn handle_cleanup_task_completed(&mut self) {
        self.error_inactive(&catalog::CLEANUP);
    }

    pub fn handle_cleanup_task_failed(&mut self) {
        self.error_active(&catalog::CLEANUP);
    }

    pub fn cleanup_task_timeout(&mut self) {
        self.error_active(&catalog::CLEANUP);
    }

    pub fn handle_pull_task_completed(&mut self) {
        self.error_inactive(&catalog::IMAGE_PULL);
    }

    pub fn handle_pull_task_failed(&mut self) {
        self.error_active(&catalog::IMAGE_PULL);
    }

    pub fn pull_task_timeout(&mut self) {
        self.error_active(&catalog::IMAGE_PULL);
    }

    pub fn handle_health_task_completed(&mut self) {
        self.health_check_normal = true;
        self.clear_health_errors();
    }

    /// A failed health check activates the error its exit code names.
    ///
    /// Unrecognized (or missing) codes leave no health error active.
    pub fn handle_health_task_failed(&mut self, exit_code: Option<i32>) {
        self.health_check_normal = false;
        self.clear_health_errors();
        match exit_code {
            Some(BAD_DAEMON_CODE) => {
                warn!(host = %self.hostname, "Docker daemon not responding");
                self.error_active(&catalog::BAD_DAEMON);
            }
            Some(LOW_DOCKER_SPACE_CODE) => {
                warn!(host = %self.hostname, "low Docker disk space");
                self.error_active(&catalog::LOW_DOCKER_SPACE);
            }
            Some(BAD_LOGSTASH_CODE) => {
                warn!(host = %self.hostname, "logstash not responding");
                self.error_active(&catalog::BAD_LOGSTASH);
            }
            other => {
                error!(host = %self.hostname, exit_code = ?other, "unknown failed health check exit code");
            }
        }
    }

    pub fn health_task_timeout(&mut self) {
        self.health_check_normal = false;
        self.clear_health_errors();
        warn!(host = %self.hostname, "health check timed out");
        self.error_active(&catalog::HEALTH_TIMEOUT);
    }

    fn error_active(&mut self, error: &'static NodeError) {
        let now = self.clock.now();
        self.active
            .entry(error.name)
            .and_modify(|active| active.last_updated = now)
            .or_insert_with(|| {
                debug!(host = %self.hostname, error = error.name, "node error active");
                ActiveError { error, started: now, last_updated: now }
            });
        self.refresh_flags();
    }

    fn error_inactive(&mut self, error: &'static NodeError) {
        if self.active.remove(error.name).is_some() {
            debug!(host = %self.hostname, error = error.name, "node error cleared");
            self.refresh_flags();
        }
    }

    fn clear_health_errors(&mut self) {
        for error in HEALTH_ERRORS {
            self.error_inactive(error);
        }
    }

    fn refresh_flags(&mut self) {
        self.daemon_bad = self.active.values().any(|a| a.error.daemon_bad);
        self.pull_bad = self.active.values().any(|a| a.error.pull_bad);
    }
}

#[cfg(test)]
#[path = "conditions_tests.rs"]
mod tests;
