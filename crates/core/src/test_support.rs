// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use crate::records::{ExeStatus, JobExecution, LegacyExecution, RecordId, TaskTimes};

/// A fixed timestamp `secs` seconds after 2020-09-13T12:26:40Z.
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_600_000_000 + secs, 0).single().unwrap_or_default()
}

/// Legacy columns for an execution that ran its main task and ended with `status`.
pub fn legacy_columns(status: ExeStatus) -> LegacyExecution {
    let ran = status.is_terminal();
    LegacyExecution {
        status,
        error_id: (status == ExeStatus::Failed).then_some(4),
        ended: ran.then(|| at(60)),
        pre: TaskTimes { started: Some(at(1)), completed: Some(at(2)), exit_code: Some(0) },
        main: TaskTimes {
            started: Some(at(3)),
            completed: ran.then(|| at(50)),
            exit_code: ran.then_some(if status == ExeStatus::Failed { 1 } else { 0 }),
        },
        post: TaskTimes::default(),
        results: (status == ExeStatus::Completed).then(|| json!({"output_data": []})),
        command_arguments: Some("run.sh".to_string()),
        stdout: None,
        stderr: None,
    }
}

/// An unconverted execution of `job_id`.
pub fn legacy_exe(id: RecordId, job_id: RecordId, status: ExeStatus) -> JobExecution {
    JobExecution::builder()
        .id(id)
        .job_id(job_id)
        .cluster_id(format!("scale_{id}"))
        .queued(at(0))
        .started(at(1))
        .legacy(legacy_columns(status))
        .build()
}

/// An already converted execution of `job_id` with attempt number `exe_num`.
pub fn converted_exe(id: RecordId, job_id: RecordId, exe_num: u32) -> JobExecution {
    JobExecution::builder()
        .id(id)
        .job_id(job_id)
        .cluster_id(format!("scale_{id}"))
        .queued(at(0))
        .exe_num(exe_num)
        .build()
}
