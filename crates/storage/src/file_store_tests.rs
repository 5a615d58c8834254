// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::batch::TableName;
use crate::progress::PhaseProgress;
use scale_core::test_support::converted_exe;
use tempfile::tempdir;

fn put_exe(id: i64) -> WriteBatch {
    let mut batch = WriteBatch::new();
    batch.put(converted_exe(id, 1, 1));
    batch.set_progress(PhaseProgress::new("job_exe", id as u64));
    batch
}

#[test]
fn commits_survive_reopen() {
    let dir = tempdir().unwrap();
    {
        let store = FileStore::open(dir.path()).unwrap();
        store.commit(put_exe(1)).unwrap();
        store.commit(put_exe(2)).unwrap();
        assert_eq!(store.seq(), 2);
    }

    let store = FileStore::open(dir.path()).unwrap();
    assert_eq!(store.seq(), 2);
    assert_eq!(store.read(|d| d.job_exe.len()), 2);
    assert_eq!(store.read(|d| d.progress("job_exe").map(|p| p.total_work)), Some(2));
}

#[test]
fn checkpoint_truncates_journal_and_keeps_state() {
    let dir = tempdir().unwrap();
    {
        let store = FileStore::open(dir.path()).unwrap();
        store.commit(put_exe(1)).unwrap();
        let result = store.checkpoint().unwrap();
        assert_eq!(result.seq, 1);
        assert!(result.size_bytes > 0);
        assert_eq!(store.journal_len(), 0);

        let mut batch = WriteBatch::new();
        batch.delete(TableName::JobExe, 1);
        store.commit(batch).unwrap();
    }

    let store = FileStore::open(dir.path()).unwrap();
    assert_eq!(store.seq(), 2);
    assert!(store.read(|d| d.job_exe.is_empty()));
}

#[test]
fn second_open_is_locked() {
    let dir = tempdir().unwrap();
    let _store = FileStore::open(dir.path()).unwrap();
    assert!(matches!(FileStore::open(dir.path()), Err(StoreError::Locked(_))));
}

#[test]
fn empty_batch_writes_nothing() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    assert_eq!(store.commit(WriteBatch::new()).unwrap(), 0);
    assert_eq!(store.journal_len(), 0);
}
