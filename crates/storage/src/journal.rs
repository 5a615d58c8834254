// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only journal of committed batches.
//!
//! One JSON object per line: `{"seq": N, "batch": [...]}`. A line is only
//! considered committed once its trailing newline is on disk, so a crash
//! mid-append leaves a torn last line that is dropped on the next open.

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::batch::WriteBatch;
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub seq: u64,
    pub batch: WriteBatch,
}

#[derive(Serialize)]
struct EntryRef<'a> {
    seq: u64,
    batch: &'a WriteBatch,
}

pub struct Journal {
    path: PathBuf,
    file: File,
    entries: usize,
}

impl Journal {
    /// Open (or create) the journal, returning it along with every intact entry.
    pub fn open(path: &Path) -> Result<(Self, Vec<JournalEntry>), StoreError> {
        let mut file =
            OpenOptions::new().read(true).append(true).create(true).open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let (entries, valid_len) = parse_entries(&contents)?;
        if valid_len < contents.len() {
            warn!(
                path = %path.display(),
                dropped_bytes = contents.len() - valid_len,
                "dropping torn journal tail"
            );
            file.set_len(valid_len as u64)?;
            file.sync_all()?;
        }

        let journal = Self { path: path.to_owned(), file, entries: entries.len() };
        Ok((journal, entries))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries written since the journal was last truncated
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Durably append one committed batch.
    pub fn append(&mut self, seq: u64, batch: &WriteBatch) -> Result<(), StoreError> {
        let mut line = serde_json::to_vec(&EntryRef { seq, batch })?;
        line.push(b'\n');
        self.file.write_all(&line)?;
        self.file.sync_data()?;
        self.entries += 1;
        Ok(())
    }

    /// Drop every entry; called once a snapshot covers them.
    pub fn truncate(&mut self) -> Result<(), StoreError> {
        self.file.set_len(0)?;
        self.file.sync_all()?;
        self.entries = 0;
        Ok(())
    }
}

/// Parse all complete entries, returning them and the byte length they span.
///
/// Only the last line may be damaged; anything earlier is corruption.
fn parse_entries(contents: &str) -> Result<(Vec<JournalEntry>, usize), StoreError> {
    let mut entries = Vec::new();
    let mut offset = 0;
    let lines: Vec<&str> = contents.split_inclusive('\n').collect();
    let last = lines.len().saturating_sub(1);

    for (i, raw) in lines.iter().enumerate() {
        let Some(line) = raw.strip_suffix('\n') else {
            break;
        };
        if line.trim().is_empty() {
            offset += raw.len();
            continue;
        }
        match serde_json::from_str::<JournalEntry>(line) {
            Ok(entry) => entries.push(entry),
            Err(_) if i == last => break,
            Err(source) => return Err(StoreError::CorruptJournal { line: i + 1, source }),
        }
        offset += raw.len();
    }

    Ok((entries, offset))
}

/// Entries with a sequence number greater than `seq`
pub fn entries_after(entries: Vec<JournalEntry>, seq: u64) -> impl Iterator<Item = JournalEntry> {
    entries.into_iter().filter(move |e| e.seq > seq)
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
