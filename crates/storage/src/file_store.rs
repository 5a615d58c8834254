// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable [`Store`] backed by a snapshot plus journal in a state directory.

use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::batch::WriteBatch;
use crate::dataset::Dataset;
use crate::journal::{entries_after, Journal};
use crate::snapshot::{load_snapshot, Snapshot};
use crate::store::{Store, StoreError};

/// File layout of a state directory
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub state_dir: PathBuf,
    pub journal_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub lock_path: PathBuf,
}

impl StoreConfig {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self {
            journal_path: state_dir.join("journal.jsonl"),
            snapshot_path: state_dir.join("snapshot.json.zst"),
            lock_path: state_dir.join("scale.lock"),
            state_dir,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointResult {
    pub seq: u64,
    pub size_bytes: u64,
}

pub struct FileStore {
    config: StoreConfig,
    // Held for the lifetime of the store; the OS drops the lock on close
    _lock_file: File,
    inner: Mutex<FileInner>,
}

struct FileInner {
    dataset: Dataset,
    journal: Journal,
    seq: u64,
}

impl FileStore {
    /// Open the store in `state_dir`, recovering from snapshot and journal.
    ///
    /// Fails with [`StoreError::Locked`] if another process holds the directory.
    pub fn open(state_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open_with(StoreConfig::new(state_dir))
    }

    pub fn open_with(config: StoreConfig) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&config.state_dir)?;

        // Open without truncating so a held lock's pid survives a failed attempt
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&config.lock_path)?;
        lock_file.try_lock_exclusive().map_err(|_| StoreError::Locked(config.lock_path.clone()))?;
        let mut lock_file = lock_file;
        lock_file.set_len(0)?;
        writeln!(lock_file, "{}", std::process::id())?;

        let (mut dataset, snapshot_seq) = match load_snapshot(&config.snapshot_path)? {
            Some(snapshot) => (snapshot.dataset, snapshot.seq),
            None => (Dataset::default(), 0),
        };

        let (journal, entries) = Journal::open(&config.journal_path)?;
        let mut seq = snapshot_seq;
        let mut replayed = 0usize;
        for entry in entries_after(entries, snapshot_seq) {
            dataset.apply_batch(&entry.batch);
            seq = entry.seq;
            replayed += 1;
        }

        info!(
            state_dir = %config.state_dir.display(),
            snapshot_seq,
            replayed,
            seq,
            "opened store"
        );

        Ok(Self { config, _lock_file: lock_file, inner: Mutex::new(FileInner { dataset, journal, seq }) })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn state_dir(&self) -> &Path {
        &self.config.state_dir
    }

    /// Sequence number of the last committed batch
    pub fn seq(&self) -> u64 {
        self.inner.lock().seq
    }

    /// Number of journal entries not yet covered by a snapshot
    pub fn journal_len(&self) -> usize {
        self.inner.lock().journal.len()
    }

    /// Write a snapshot of the current dataset and truncate the journal.
    pub fn checkpoint(&self) -> Result<CheckpointResult, StoreError> {
        let mut inner = self.inner.lock();
        let snapshot = Snapshot::new(inner.seq, inner.dataset.clone());
        let size_bytes = snapshot.save(&self.config.snapshot_path)?;
        inner.journal.truncate()?;
        Ok(CheckpointResult { seq: inner.seq, size_bytes })
    }
}

impl Store for FileStore {
    fn read<T>(&self, f: impl FnOnce(&Dataset) -> T) -> T {
        f(&self.inner.lock().dataset)
    }

    fn commit(&self, batch: WriteBatch) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock();
        if batch.is_empty() {
            return Ok(inner.seq);
        }
        let seq = inner.seq + 1;
        // Journal first: a failed append leaves the dataset untouched
        inner.journal.append(seq, &batch)?;
        inner.dataset.apply_batch(&batch);
        inner.seq = seq;
        debug!(seq, mutations = batch.len(), "committed batch");
        Ok(seq)
    }
}

#[cfg(test)]
#[path = "file_store_tests.rs"]
mod tests;
