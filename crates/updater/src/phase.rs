// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use scale_core::RecordId;
use scale_storage::{Dataset, WriteBatch};

use crate::error::PhaseError;

/// Result of counting a phase's work.
#[derive(Debug, Default)]
pub struct InitPlan {
    pub total_work: u64,
    /// One-off writes committed together with the initial progress
    pub writes: WriteBatch,
}

/// Result of processing one chunk.
#[derive(Debug, Default)]
pub struct Chunk {
    pub writes: WriteBatch,
    /// Units of work done; zero means nothing qualifying is left
    pub processed: u64,
    /// Key of the last record the chunk covered
    pub last_key: Option<RecordId>,
}

impl Chunk {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One named stage of the update.
///
/// Phases never write directly; they read the dataset and return the writes
/// the driver should commit.
pub trait Phase: Send + Sync {
    fn name(&self) -> &'static str;

    /// Plural noun for the unit of work, used in log lines
    fn unit(&self) -> &'static str;

    fn chunk_size(&self) -> usize;

    /// Count the total work. Calling it again only recounts.
    fn init(&self, data: &Dataset) -> Result<InitPlan, PhaseError>;

    /// Process the next chunk of records keyed after `cursor`.
    fn iterate(&self, data: &Dataset, cursor: Option<RecordId>) -> Result<Chunk, PhaseError>;
}
