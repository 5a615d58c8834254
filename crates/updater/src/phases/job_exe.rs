// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Split legacy executions into slim execution, end, and output rows.

use scale_core::{
    ExeStatus, JobExecution, JobExecutionEnd, JobExecutionOutput, LegacyExecution, RecordId,
    TaskResults, TaskType,
};
use scale_storage::{Dataset, TableName, WriteBatch};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::error::PhaseError;
use crate::phase::{Chunk, InitPlan, Phase};

const CHUNK_SIZE: usize = 500;

/// Converts legacy executions, numbering every execution of a job `1..n` by id.
///
/// A chunk pages legacy executions by id, then converts every legacy
/// execution of the jobs they belong to, so numbering always sees a job's
/// full history at once.
pub struct JobExePhase;

impl Phase for JobExePhase {
    fn name(&self) -> &'static str {
        "job_exe"
    }

    fn unit(&self) -> &'static str {
        "job executions"
    }

    fn chunk_size(&self) -> usize {
        CHUNK_SIZE
    }

    fn init(&self, data: &Dataset) -> Result<InitPlan, PhaseError> {
        let total_work = data.job_exe.count_where(JobExecution::is_legacy);
        Ok(InitPlan { total_work, writes: WriteBatch::new() })
    }

    fn iterate(&self, data: &Dataset, cursor: Option<RecordId>) -> Result<Chunk, PhaseError> {
        let page = data.job_exe.page_after(cursor, CHUNK_SIZE, JobExecution::is_legacy);
        let Some(last_key) = page.last().map(|e| e.id) else {
            return Ok(Chunk::empty());
        };
        let job_ids: BTreeSet<RecordId> = page.iter().map(|e| e.job_id).collect();

        // Table iteration is in id order, so each job's list is too
        let mut by_job: BTreeMap<RecordId, Vec<&JobExecution>> = BTreeMap::new();
        for exe in data.job_exe.iter().filter(|e| job_ids.contains(&e.job_id)) {
            by_job.entry(exe.job_id).or_default().push(exe);
        }

        let mut writes = WriteBatch::new();
        let mut converted = 0u64;
        for (job_id, exes) in by_job {
            for (index, exe) in exes.into_iter().enumerate() {
                let Some(legacy) = &exe.legacy else {
                    continue;
                };
                let exe_num = index as u32 + 1;
                let job_type_id = match data.job.get(job_id) {
                    Some(job) => job.job_type_id,
                    None => {
                        return Err(PhaseError::MissingParent {
                            table: TableName::JobExe,
                            id: exe.id,
                            missing: TableName::Job,
                            missing_id: job_id,
                        })
                    }
                };
                convert(exe, legacy, exe_num, job_type_id, &mut writes);
                converted += 1;
            }
        }

        debug!(converted, jobs = job_ids.len(), "converted job executions");
        Ok(Chunk { writes, processed: converted, last_key: Some(last_key) })
    }
}

fn convert(
    exe: &JobExecution,
    legacy: &LegacyExecution,
    exe_num: u32,
    job_type_id: RecordId,
    writes: &mut WriteBatch,
) {
    if legacy.status.is_terminal() {
        let task_results = TaskResults::from_legacy(&exe.cluster_id, legacy);
        writes.put(JobExecutionEnd {
            job_exe_id: exe.id,
            job_id: exe.job_id,
            job_type_id,
            exe_num,
            status: legacy.status,
            error_id: legacy.error_id,
            node_id: exe.node_id,
            queued: exe.queued,
            started: exe.started,
            seed_started: task_results.task_started(TaskType::Main),
            seed_ended: task_results.task_ended(TaskType::Main),
            ended: legacy.ended,
            task_results,
        });
    }

    if legacy.status == ExeStatus::Completed {
        writes.put(JobExecutionOutput {
            job_exe_id: exe.id,
            job_id: exe.job_id,
            job_type_id,
            exe_num,
            output: legacy.results.clone().unwrap_or(Value::Null),
        });
    }

    writes.put(JobExecution { exe_num: Some(exe_num), legacy: None, ..exe.clone() });
}

#[cfg(test)]
#[path = "job_exe_tests.rs"]
mod tests;
