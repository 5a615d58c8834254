// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted progress of one updater phase.

use scale_core::RecordId;
use serde::{Deserialize, Serialize};

/// Counters and resume cursor for one phase.
///
/// Stored alongside the data the phase writes, so the records of a chunk and
/// the cursor that covers them always commit together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseProgress {
    pub name: String,
    pub total_work: u64,
    pub completed_work: u64,
    /// Key of the last processed record
    pub resume_cursor: Option<RecordId>,
    /// Number of committed iterations
    #[serde(default)]
    pub iterations: u64,
}

impl PhaseProgress {
    pub fn new(name: impl Into<String>, total_work: u64) -> Self {
        Self { name: name.into(), total_work, completed_work: 0, resume_cursor: None, iterations: 0 }
    }

    pub fn is_done(&self) -> bool {
        self.completed_work >= self.total_work
    }

    /// Record a processed chunk, clamping completed work to the total.
    ///
    /// The cursor only moves forward.
    pub fn advance(&mut self, processed: u64, last_key: Option<RecordId>) {
        self.completed_work = self.completed_work.saturating_add(processed).min(self.total_work);
        if let Some(key) = last_key {
            self.resume_cursor = Some(self.resume_cursor.map_or(key, |c| c.max(key)));
        }
        self.iterations += 1;
    }

    /// Mark the phase complete when no qualifying records remain.
    pub fn exhaust(&mut self) {
        self.completed_work = self.total_work;
        self.iterations += 1;
    }

    pub fn percent(&self) -> f64 {
        if self.total_work == 0 {
            return 100.0;
        }
        (self.completed_work as f64 / self.total_work as f64) * 100.0
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
