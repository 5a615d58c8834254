// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-task results recorded on an execution end row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::records::{LegacyExecution, TaskTimes};

pub const TASK_RESULTS_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Pre,
    Main,
    Post,
}

impl TaskType {
    /// Suffix appended to the cluster id to form the task id
    fn id_suffix(self) -> &'static str {
        match self {
            TaskType::Pre => "pre",
            TaskType::Main => "job",
            TaskType::Post => "post",
        }
    }
}

crate::simple_display! {
    TaskType {
        Pre => "pre",
        Main => "main",
        Post => "post",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub task_id: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub was_launched: bool,
    pub was_started: bool,
    pub started: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResults {
    pub version: String,
    pub tasks: Vec<TaskResult>,
}

impl Default for TaskResults {
    fn default() -> Self {
        Self { version: TASK_RESULTS_VERSION.to_string(), tasks: Vec::new() }
    }
}

impl TaskResults {
    /// Build results from the pre/main/post columns of a legacy execution.
    ///
    /// A task that never started leaves no entry.
    pub fn from_legacy(cluster_id: &str, legacy: &LegacyExecution) -> Self {
        let mut results = Self::default();
        for (task_type, times) in
            [(TaskType::Pre, &legacy.pre), (TaskType::Main, &legacy.main), (TaskType::Post, &legacy.post)]
        {
            if let Some(result) = task_result(cluster_id, task_type, times) {
                results.tasks.push(result);
            }
        }
        results
    }

    pub fn task(&self, task_type: TaskType) -> Option<&TaskResult> {
        self.tasks.iter().find(|t| t.task_type == task_type)
    }

    pub fn task_started(&self, task_type: TaskType) -> Option<DateTime<Utc>> {
        self.task(task_type).and_then(|t| t.started)
    }

    pub fn task_ended(&self, task_type: TaskType) -> Option<DateTime<Utc>> {
        self.task(task_type).and_then(|t| t.ended)
    }
}

fn task_result(cluster_id: &str, task_type: TaskType, times: &TaskTimes) -> Option<TaskResult> {
    let started = times.started?;
    Some(TaskResult {
        task_id: format!("{}_{}", cluster_id, task_type.id_suffix()),
        task_type,
        was_launched: true,
        was_started: true,
        started: Some(started),
        ended: times.completed,
        exit_code: times.exit_code,
    })
}

#[cfg(test)]
#[path = "task_results_tests.rs"]
mod tests;
