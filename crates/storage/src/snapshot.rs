// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot persistence for crash recovery.
//!
//! Snapshots store the complete dataset at a point in time, identified by
//! the journal sequence number. Recovery loads the snapshot and replays
//! journal entries after that sequence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::dataset::Dataset;
use crate::store::StoreError;

/// Current snapshot schema version
pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

const ZSTD_LEVEL: i32 = 3;

/// A snapshot of the dataset at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version
    #[serde(rename = "v")]
    pub version: u32,
    /// Journal sequence number at the time of snapshot
    pub seq: u64,
    pub dataset: Dataset,
    pub created_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(seq: u64, dataset: Dataset) -> Self {
        Self { version: CURRENT_SNAPSHOT_VERSION, seq, dataset, created_at: Utc::now() }
    }

    /// Write the snapshot atomically, returning its compressed size.
    ///
    /// The previous snapshot is kept as a rotated `.bak` file.
    pub fn save(&self, path: &Path) -> Result<u64, StoreError> {
        let tmp = path.with_extension("tmp");
        {
            let file = File::create(&tmp)?;
            let mut encoder = zstd::Encoder::new(BufWriter::new(file), ZSTD_LEVEL)?;
            serde_json::to_writer(&mut encoder, self)?;
            let mut writer = encoder.finish()?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }

        if path.exists() {
            let bak = rotate_bak_path(path);
            if let Err(e) = fs::copy(path, &bak) {
                warn!(error = %e, "failed to back up previous snapshot");
            }
        }
        fs::rename(&tmp, path)?;

        let size = fs::metadata(path)?.len();
        info!(seq = self.seq, size_bytes = size, "saved snapshot");
        Ok(size)
    }
}

/// Load a snapshot, if one exists.
pub fn load_snapshot(path: &Path) -> Result<Option<Snapshot>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let decoder = zstd::Decoder::new(File::open(path)?)?;
    let snapshot: Snapshot = serde_json::from_reader(decoder)?;
    if snapshot.version > CURRENT_SNAPSHOT_VERSION {
        return Err(StoreError::SnapshotTooNew(snapshot.version, CURRENT_SNAPSHOT_VERSION));
    }
    Ok(Some(snapshot))
}

const MAX_BAK_FILES: u32 = 3;

/// Pick the next `.bak` / `.bak.N` path, rotating older backups out.
///
/// Keeps up to [`MAX_BAK_FILES`] backups: `.bak`, `.bak.2`, `.bak.3`.
pub(crate) fn rotate_bak_path(path: &Path) -> PathBuf {
    let bak = |n: u32| {
        if n == 1 {
            path.with_extension("bak")
        } else {
            path.with_extension(format!("bak.{n}"))
        }
    };

    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        let _ = fs::remove_file(&oldest);
    }

    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            let _ = fs::rename(&src, bak(n + 1));
        }
    }

    bak(1)
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
