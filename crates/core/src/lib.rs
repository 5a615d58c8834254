// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! scale-core: Shared records, manifests, and clock for the Scale services

pub mod macros;

pub mod clock;
pub mod manifest;
pub mod records;
pub mod task_results;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use manifest::{
    convert_job_type, is_seed_manifest, LegacyManifest, ManifestError, ManifestValidator,
    SeedManifest, SeedValidator, UniqueNames,
};
pub use records::{
    Batch, BatchJob, BatchRecipe, ErrorMapping, ExeStatus, Job, JobExecution, JobExecutionEnd,
    JobExecutionOutput, JobType, LegacyExecution, Recipe, RecipeNode, RecipeTypeRevision, Record,
    RecordId, TaskTimes, TaskUpdate,
};
pub use task_results::{TaskResult, TaskResults, TaskType};
