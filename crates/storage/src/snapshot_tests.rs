// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::progress::PhaseProgress;
use tempfile::tempdir;

fn dataset_with_progress(name: &str) -> Dataset {
    let mut dataset = Dataset::default();
    dataset.progress.insert(name.to_string(), PhaseProgress::new(name, 10));
    dataset
}

#[test]
fn missing_snapshot_loads_none() {
    let dir = tempdir().unwrap();
    assert!(load_snapshot(&dir.path().join("snapshot.json.zst")).unwrap().is_none());
}

#[test]
fn save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json.zst");
    let size = Snapshot::new(7, dataset_with_progress("job_exe")).save(&path).unwrap();
    assert!(size > 0);

    let loaded = load_snapshot(&path).unwrap().unwrap();
    assert_eq!(loaded.seq, 7);
    assert_eq!(loaded.version, CURRENT_SNAPSHOT_VERSION);
    assert!(loaded.dataset.progress("job_exe").is_some());
}

#[test]
fn newer_version_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json.zst");
    let mut snapshot = Snapshot::new(1, Dataset::default());
    snapshot.version = CURRENT_SNAPSHOT_VERSION + 1;
    snapshot.save(&path).unwrap();

    assert!(matches!(load_snapshot(&path), Err(StoreError::SnapshotTooNew(2, 1))));
}

#[test]
fn backups_rotate_up_to_three() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json.zst");
    for seq in 1..=5 {
        Snapshot::new(seq, Dataset::default()).save(&path).unwrap();
    }

    assert!(path.with_extension("bak").exists());
    assert!(path.with_extension("bak.2").exists());
    assert!(path.with_extension("bak.3").exists());
    assert!(!path.with_extension("bak.4").exists());
    assert!(!path.with_extension("tmp").exists());
}
