// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure type definitions for persisted dataset rows.
//!
//! Every row is keyed by a [`RecordId`]. Rows that extend another row one to
//! one (`JobExecutionEnd`, `JobExecutionOutput`) share the parent's key.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::task_results::TaskResults;

/// Primary key of a persisted row
pub type RecordId = i64;

/// A row that can be stored in a keyed table
pub trait Record: Clone {
    fn id(&self) -> RecordId;
}

macro_rules! keyed_by {
    ($($ty:ty => $field:ident),+ $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> RecordId {
                    self.$field
                }
            }
        )+
    };
}

keyed_by! {
    JobExecution => id,
    JobExecutionEnd => job_exe_id,
    JobExecutionOutput => job_exe_id,
    TaskUpdate => id,
    Job => id,
    Recipe => id,
    RecipeNode => id,
    RecipeTypeRevision => id,
    Batch => id,
    BatchJob => id,
    BatchRecipe => id,
    JobType => id,
}

/// Status of a job execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExeStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Canceled,
}

impl ExeStatus {
    /// Whether the execution has ended (and so gets an end record)
    pub fn is_terminal(self) -> bool {
        matches!(self, ExeStatus::Completed | ExeStatus::Failed | ExeStatus::Canceled)
    }
}

crate::simple_display! {
    ExeStatus {
        Queued => "QUEUED",
        Running => "RUNNING",
        Completed => "COMPLETED",
        Failed => "FAILED",
        Canceled => "CANCELED",
    }
}

/// Timing of one pre/main/post task in the legacy execution layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskTimes {
    pub started: Option<DateTime<Utc>>,
    pub completed: Option<DateTime<Utc>>,
    pub exit_code: Option<i32>,
}

/// Columns that only exist on executions written by the old schema.
///
/// Present means the execution still needs converting; the conversion
/// moves everything here into end/output rows and clears it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyExecution {
    pub status: ExeStatus,
    pub error_id: Option<RecordId>,
    pub ended: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pre: TaskTimes,
    #[serde(default)]
    pub main: TaskTimes,
    #[serde(default)]
    pub post: TaskTimes,
    /// Output results (only meaningful for completed executions)
    pub results: Option<Value>,
    pub command_arguments: Option<String>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

/// A job execution (one attempt of a job)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobExecution {
    pub id: RecordId,
    pub job_id: RecordId,
    pub cluster_id: String,
    /// 1-based attempt number within the job; unset on legacy rows
    pub exe_num: Option<u32>,
    pub node_id: Option<RecordId>,
    pub queued: DateTime<Utc>,
    pub started: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<LegacyExecution>,
}

impl JobExecution {
    pub fn is_legacy(&self) -> bool {
        self.legacy.is_some()
    }
}

crate::builder! {
    pub struct JobExecutionBuilder => JobExecution {
        set {
            id: RecordId = 1,
            job_id: RecordId = 1,
            queued: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH,
        }
        into {
            cluster_id: String = "scale_1",
        }
        option {
            exe_num: u32,
            node_id: RecordId,
            started: DateTime<Utc>,
            legacy: LegacyExecution,
        }
    }
}

/// End-of-execution summary, keyed by the execution it describes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobExecutionEnd {
    pub job_exe_id: RecordId,
    pub job_id: RecordId,
    pub job_type_id: RecordId,
    pub exe_num: u32,
    pub task_results: TaskResults,
    pub status: ExeStatus,
    pub error_id: Option<RecordId>,
    pub node_id: Option<RecordId>,
    pub queued: DateTime<Utc>,
    pub started: Option<DateTime<Utc>>,
    pub seed_started: Option<DateTime<Utc>>,
    pub seed_ended: Option<DateTime<Utc>>,
    pub ended: Option<DateTime<Utc>>,
}

/// Output of a completed execution, keyed by the execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobExecutionOutput {
    pub job_exe_id: RecordId,
    pub job_id: RecordId,
    pub job_type_id: RecordId,
    pub exe_num: u32,
    pub output: Value,
}

/// Status update received for one task of an execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub id: RecordId,
    pub job_exe_id: RecordId,
    pub task_id: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: RecordId,
    pub job_type_id: RecordId,
    pub recipe_id: Option<RecordId>,
    pub root_recipe_id: Option<RecordId>,
    pub batch_id: Option<RecordId>,
}

crate::builder! {
    pub struct JobBuilder => Job {
        set {
            id: RecordId = 1,
            job_type_id: RecordId = 1,
        }
        option {
            recipe_id: RecordId,
            root_recipe_id: RecordId,
            batch_id: RecordId,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecordId,
    pub recipe_type_id: RecordId,
    pub recipe_type_rev_id: RecordId,
    /// Root of the supersede chain, unset for recipes that superseded nothing
    pub root_superseded_recipe_id: Option<RecordId>,
    pub completed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_completed: bool,
    pub batch_id: Option<RecordId>,
}

crate::builder! {
    pub struct RecipeBuilder => Recipe {
        set {
            id: RecordId = 1,
            recipe_type_id: RecordId = 1,
            recipe_type_rev_id: RecordId = 1,
            is_completed: bool = false,
        }
        option {
            root_superseded_recipe_id: RecordId,
            completed: DateTime<Utc>,
            batch_id: RecordId,
        }
    }
}

/// Link between a recipe and one of its jobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeNode {
    pub id: RecordId,
    pub recipe_id: RecordId,
    pub job_id: RecordId,
    /// False when the job was copied from a superseded recipe
    pub is_original: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeTypeRevision {
    pub id: RecordId,
    pub recipe_type_id: RecordId,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: RecordId,
    pub recipe_type_id: RecordId,
    /// Revision 1 is the placeholder written before revisions were tracked
    pub recipe_type_rev_id: RecordId,
    pub root_batch_id: Option<RecordId>,
    pub created: DateTime<Utc>,
}

crate::builder! {
    pub struct BatchBuilder => Batch {
        set {
            id: RecordId = 1,
            recipe_type_id: RecordId = 1,
            recipe_type_rev_id: RecordId = 1,
            created: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH,
        }
        option {
            root_batch_id: RecordId,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchJob {
    pub id: RecordId,
    pub batch_id: RecordId,
    pub job_id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecipe {
    pub id: RecordId,
    pub batch_id: RecordId,
    pub recipe_id: RecordId,
}

/// Legacy exit code → error name mapping stored on a job type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorMapping {
    #[serde(default)]
    pub exit_codes: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobType {
    pub id: RecordId,
    pub name: String,
    pub version: String,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    /// Seconds
    pub timeout: u64,
    pub is_active: bool,
    pub is_paused: bool,
    /// Either a legacy interface or a Seed manifest
    pub manifest: Value,
    #[serde(default)]
    pub error_mapping: ErrorMapping,
    pub cpus_required: f64,
    pub mem_const_required: f64,
    pub mem_mult_required: f64,
    pub shared_mem_required: f64,
    pub disk_out_const_required: f64,
    pub disk_out_mult_required: f64,
}

crate::builder! {
    pub struct JobTypeBuilder => JobType {
        set {
            id: RecordId = 1,
            timeout: u64 = 1800,
            is_active: bool = true,
            is_paused: bool = false,
            manifest: Value = Value::Object(Default::default()),
            error_mapping: ErrorMapping = ErrorMapping::default(),
            cpus_required: f64 = 1.0,
            mem_const_required: f64 = 64.0,
            mem_mult_required: f64 = 0.0,
            shared_mem_required: f64 = 0.0,
            disk_out_const_required: f64 = 64.0,
            disk_out_mult_required: f64 = 0.0,
        }
        into {
            name: String = "my_job",
            version: String = "1.0",
            title: String = "My Job",
            description: String = "A job",
        }
        option {
            category: String,
            author_name: String,
            author_url: String,
        }
    }
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
