// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The [`Store`] seam between the updater and its backing storage.

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::batch::WriteBatch;
use crate::dataset::Dataset;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("state directory is locked by another process: {}", .0.display())]
    Locked(PathBuf),
    #[error("corrupt journal entry at line {line}: {source}")]
    CorruptJournal { line: usize, source: serde_json::Error },
    #[error("snapshot version {0} is newer than supported version {1}")]
    SnapshotTooNew(u32, u32),
}

/// Transactional access to a [`Dataset`].
///
/// `commit` applies every mutation of the batch or none of them. A committed
/// batch is visible to every later `read`.
pub trait Store {
    fn read<T>(&self, f: impl FnOnce(&Dataset) -> T) -> T;

    /// Commit a batch, returning its sequence number.
    fn commit(&self, batch: WriteBatch) -> Result<u64, StoreError>;
}

impl<S: Store + ?Sized> Store for &S {
    fn read<T>(&self, f: impl FnOnce(&Dataset) -> T) -> T {
        (**self).read(f)
    }

    fn commit(&self, batch: WriteBatch) -> Result<u64, StoreError> {
        (**self).commit(batch)
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn read<T>(&self, f: impl FnOnce(&Dataset) -> T) -> T {
        (**self).read(f)
    }

    fn commit(&self, batch: WriteBatch) -> Result<u64, StoreError> {
        (**self).commit(batch)
    }
}

/// In-memory store, used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    dataset: Dataset,
    seq: u64,
}

impl MemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self { inner: Mutex::new(MemoryInner { dataset, seq: 0 }) }
    }

    /// Number of non-empty batches committed so far
    pub fn commits(&self) -> u64 {
        self.inner.lock().seq
    }

    pub fn into_dataset(self) -> Dataset {
        self.inner.into_inner().dataset
    }
}

impl Store for MemoryStore {
    fn read<T>(&self, f: impl FnOnce(&Dataset) -> T) -> T {
        f(&self.inner.lock().dataset)
    }

    fn commit(&self, batch: WriteBatch) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock();
        if batch.is_empty() {
            return Ok(inner.seq);
        }
        inner.dataset.apply_batch(&batch);
        inner.seq += 1;
        Ok(inner.seq)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
