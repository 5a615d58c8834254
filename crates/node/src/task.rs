// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task outcome events that drive node conditions.

use scale_core::Clock;
use serde::{Deserialize, Serialize};

use crate::conditions::NodeConditions;

/// Health check exit code: the Docker daemon is not responding
pub const BAD_DAEMON_CODE: i32 = 2;
/// Health check exit code: Docker is low on disk space
pub const LOW_DOCKER_SPACE_CODE: i32 = 3;
/// Health check exit code: logstash is not responding
pub const BAD_LOGSTASH_CODE: i32 = 4;

/// Node-level task the scheduler runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Cleanup,
    Pull,
    Health,
}

scale_core::simple_display! {
    TaskKind {
        Cleanup => "cleanup",
        Pull => "pull",
        Health => "health",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TaskOutcome {
    Completed,
    Failed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exit_code: Option<i32>,
    },
    TimedOut,
}

/// One task outcome reported for a host.
///
/// Wire form: `{"host": "node-1", "task": "health", "outcome": "failed", "exit_code": 2}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEvent {
    pub host: String,
    pub task: TaskKind,
    #[serde(flatten)]
    pub outcome: TaskOutcome,
}

impl<C: Clock> NodeConditions<C> {
    /// Route a task outcome to the matching handler.
    pub fn handle_task(&mut self, task: TaskKind, outcome: TaskOutcome) {
        match (task, outcome) {
            (TaskKind::Cleanup, TaskOutcome::Completed) => self.handle_cleanup_task_completed(),
            (TaskKind::Cleanup, TaskOutcome::Failed { .. }) => self.handle_cleanup_task_failed(),
            (TaskKind::Cleanup, TaskOutcome::TimedOut) => self.cleanup_task_timeout(),
            (TaskKind::Pull, TaskOutcome::Completed) => self.handle_pull_task_completed(),
            (TaskKind::Pull, TaskOutcome::Failed { .. }) => self.handle_pull_task_failed(),
            (TaskKind::Pull, TaskOutcome::TimedOut) => self.pull_task_timeout(),
            (TaskKind::Health, TaskOutcome::Completed) => self.handle_health_task_completed(),
            (TaskKind::Health, TaskOutcome::Failed { exit_code }) => {
                self.handle_health_task_failed(exit_code)
            }
            (TaskKind::Health, TaskOutcome::TimedOut) => self.health_task_timeout(),
        }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
