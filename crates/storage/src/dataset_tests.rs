// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use scale_core::test_support::{converted_exe, legacy_exe};
use scale_core::ExeStatus;

fn executions() -> Table<JobExecution> {
    vec![
        legacy_exe(1, 10, ExeStatus::Completed),
        converted_exe(2, 10, 1),
        legacy_exe(5, 11, ExeStatus::Failed),
        legacy_exe(9, 12, ExeStatus::Running),
    ]
    .into_iter()
    .collect()
}

#[test]
fn page_after_respects_cursor_and_filter() {
    let table = executions();
    let ids: Vec<_> = table.page_after(None, 10, JobExecution::is_legacy).iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 5, 9]);

    let ids: Vec<_> =
        table.page_after(Some(1), 1, JobExecution::is_legacy).iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![5]);

    assert!(table.page_after(Some(9), 10, |_| true).is_empty());
}

#[test]
fn count_where_and_max_id() {
    let table = executions();
    assert_eq!(table.count_where(JobExecution::is_legacy), 3);
    assert_eq!(table.max_id(), Some(9));
    assert_eq!(Table::<JobExecution>::default().max_id(), None);
}

#[test]
fn apply_batch_puts_and_deletes_in_order() {
    let mut dataset = Dataset { job_exe: executions(), ..Dataset::default() };

    let mut batch = WriteBatch::new();
    batch.put(converted_exe(1, 10, 2));
    batch.delete(TableName::JobExe, 9);
    batch.delete(TableName::JobExe, 404);
    batch.set_progress(PhaseProgress::new("job_exe", 3));
    dataset.apply_batch(&batch);

    assert_eq!(dataset.job_exe.get(1).and_then(|e| e.exe_num), Some(2));
    assert!(!dataset.job_exe.contains(9));
    assert_eq!(dataset.job_exe.len(), 3);
    assert_eq!(dataset.progress("job_exe").map(|p| p.total_work), Some(3));
}

#[test]
fn missing_tables_deserialize_empty() {
    let dataset: Dataset = serde_json::from_str(r#"{"job": {}}"#).unwrap();
    assert!(dataset.job_exe.is_empty());
    assert!(dataset.progress.is_empty());
}
