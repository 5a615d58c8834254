// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remove duplicate executions sharing a job and attempt number.

use scale_core::RecordId;
use scale_storage::{Dataset, TableName, WriteBatch};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

use crate::error::PhaseError;
use crate::phase::{Chunk, InitPlan, Phase};

const CHUNK_SIZE: usize = 10_000;

/// Keeps the smallest execution id of each `(job_id, exe_num)` group.
///
/// Dependent rows go first: task updates, outputs, ends, then the
/// executions themselves.
pub struct JobExeDupPhase;

impl Phase for JobExeDupPhase {
    fn name(&self) -> &'static str {
        "job_exe_dup"
    }

    fn unit(&self) -> &'static str {
        "jobs"
    }

    fn chunk_size(&self) -> usize {
        CHUNK_SIZE
    }

    fn init(&self, data: &Dataset) -> Result<InitPlan, PhaseError> {
        Ok(InitPlan { total_work: data.job.len() as u64, writes: WriteBatch::new() })
    }

    fn iterate(&self, data: &Dataset, cursor: Option<RecordId>) -> Result<Chunk, PhaseError> {
        let page = data.job.page_after(cursor, CHUNK_SIZE, |_| true);
        let Some(last_key) = page.last().map(|j| j.id) else {
            return Ok(Chunk::empty());
        };
        let job_ids: BTreeSet<RecordId> = page.iter().map(|j| j.id).collect();

        let mut groups: BTreeMap<(RecordId, u32), Vec<RecordId>> = BTreeMap::new();
        for exe in data.job_exe.iter().filter(|e| job_ids.contains(&e.job_id)) {
            if let Some(exe_num) = exe.exe_num {
                groups.entry((exe.job_id, exe_num)).or_default().push(exe.id);
            }
        }

        // Ids arrive in ascending order; the first of each group survives
        let duplicates: BTreeSet<RecordId> =
            groups.into_values().flat_map(|ids| ids.into_iter().skip(1)).collect();

        let mut writes = WriteBatch::new();
        if duplicates.is_empty() {
            info!(jobs = page.len(), "no duplicates found");
        } else {
            info!(count = duplicates.len(), "deleting duplicate job executions");
            writes.delete_all(
                TableName::TaskUpdate,
                data.task_update.iter().filter(|u| duplicates.contains(&u.job_exe_id)).map(|u| u.id),
            );
            writes.delete_all(
                TableName::JobExeOutput,
                duplicates.iter().copied().filter(|id| data.job_exe_output.contains(*id)),
            );
            writes.delete_all(
                TableName::JobExeEnd,
                duplicates.iter().copied().filter(|id| data.job_exe_end.contains(*id)),
            );
            writes.delete_all(TableName::JobExe, duplicates.iter().copied());
        }

        Ok(Chunk { writes, processed: page.len() as u64, last_key: Some(last_key) })
    }
}

#[cfg(test)]
#[path = "job_exe_dup_tests.rs"]
mod tests;
