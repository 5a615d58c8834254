// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The standard update phases, in the order they must run.
//!
//! | phase | chunk | work unit |
//! |---|---|---|
//! | `job_exe` | 500 | legacy job executions |
//! | `job_exe_dup` | 10,000 | jobs |
//! | `recipe_fields` | 10,000 | recipes |
//! | `batch_fields` | 1 | batches |
//! | `job_type_manifest` | 1 | job types |

mod batch_fields;
mod job_exe;
mod job_exe_dup;
mod job_type_manifest;
mod recipe_fields;

pub use batch_fields::BatchFieldsPhase;
pub use job_exe::JobExePhase;
pub use job_exe_dup::JobExeDupPhase;
pub use job_type_manifest::JobTypeManifestPhase;
pub use recipe_fields::RecipeFieldsPhase;

use scale_core::SeedValidator;

use crate::phase::Phase;

pub fn default_phases() -> Vec<Box<dyn Phase>> {
    vec![
        Box::new(JobExePhase),
        Box::new(JobExeDupPhase),
        Box::new(RecipeFieldsPhase),
        Box::new(BatchFieldsPhase),
        Box::new(JobTypeManifestPhase::new(SeedValidator)),
    ]
}
