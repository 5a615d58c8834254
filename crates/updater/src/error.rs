// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use scale_core::{ManifestError, RecordId};
use scale_storage::{StoreError, TableName};
use thiserror::Error;

/// A record a phase cannot convert
#[derive(Debug, Error)]
pub enum PhaseError {
    #[error("job type {job_type_id}: {source}")]
    Manifest {
        job_type_id: RecordId,
        #[source]
        source: ManifestError,
    },

    #[error("{table} {id} references missing {missing} {missing_id}")]
    MissingParent { table: TableName, id: RecordId, missing: TableName, missing_id: RecordId },
}

/// Errors that abort an update run.
///
/// Everything committed before the failure stays committed.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("phase {phase}: storage error: {source}")]
    Store {
        phase: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("phase {phase}: {source}")]
    Phase {
        phase: &'static str,
        #[source]
        source: PhaseError,
    },
}

impl UpdateError {
    pub fn phase(&self) -> &'static str {
        match self {
            UpdateError::Store { phase, .. } | UpdateError::Phase { phase, .. } => phase,
        }
    }
}
