// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Replace legacy job type interfaces with Seed manifests.

use scale_core::{convert_job_type, is_seed_manifest, JobType, ManifestError, ManifestValidator, RecordId};
use scale_storage::{Dataset, WriteBatch};
use std::collections::BTreeSet;
use tracing::info;

use crate::error::PhaseError;
use crate::phase::{Chunk, InitPlan, Phase};

/// One job type per iteration.
///
/// A legacy job type is renamed `legacy-<name>`, given the first unused
/// `1.0.N` version, deactivated, paused, and given a converted manifest.
/// Job types that already carry a Seed manifest are left alone.
pub struct JobTypeManifestPhase {
    validator: Box<dyn ManifestValidator + Send + Sync>,
}

impl JobTypeManifestPhase {
    pub fn new(validator: impl ManifestValidator + Send + Sync + 'static) -> Self {
        Self { validator: Box::new(validator) }
    }
}

impl Phase for JobTypeManifestPhase {
    fn name(&self) -> &'static str {
        "job_type_manifest"
    }

    fn unit(&self) -> &'static str {
        "job types"
    }

    fn chunk_size(&self) -> usize {
        1
    }

    fn init(&self, data: &Dataset) -> Result<InitPlan, PhaseError> {
        Ok(InitPlan { total_work: data.job_type.len() as u64, writes: WriteBatch::new() })
    }

    fn iterate(&self, data: &Dataset, cursor: Option<RecordId>) -> Result<Chunk, PhaseError> {
        let Some(job_type) = data.job_type.page_after(cursor, 1, |_| true).into_iter().next() else {
            return Ok(Chunk::empty());
        };
        let mut writes = WriteBatch::new();

        if !is_seed_manifest(&job_type.manifest) {
            let converted = self
                .convert(data, job_type)
                .map_err(|source| PhaseError::Manifest { job_type_id: job_type.id, source })?;
            info!(
                job_type_id = job_type.id,
                from = %format!("{} {}", job_type.name, job_type.version),
                to = %format!("{} {}", converted.name, converted.version),
                "converted legacy job type"
            );
            writes.put(converted);
        }

        Ok(Chunk { writes, processed: 1, last_key: Some(job_type.id) })
    }
}

impl JobTypeManifestPhase {
    fn convert(&self, data: &Dataset, job_type: &JobType) -> Result<JobType, ManifestError> {
        let name = format!("legacy-{}", job_type.name.replace('_', "-"));
        let version = first_free_version(data, &name);
        let manifest = convert_job_type(job_type, &name, &version, self.validator.as_ref())?;
        Ok(JobType {
            name,
            version,
            is_active: false,
            is_paused: true,
            manifest: serde_json::to_value(&manifest)?,
            ..job_type.clone()
        })
    }
}

/// First `1.0.N` version not already used by a job type called `name`
fn first_free_version(data: &Dataset, name: &str) -> String {
    let taken: BTreeSet<&str> =
        data.job_type.iter().filter(|jt| jt.name == name).map(|jt| jt.version.as_str()).collect();
    let mut n = 0u64;
    loop {
        let version = format!("1.0.{n}");
        if !taken.contains(version.as_str()) {
            return version;
        }
        n += 1;
    }
}

#[cfg(test)]
#[path = "job_type_manifest_tests.rs"]
mod tests;
