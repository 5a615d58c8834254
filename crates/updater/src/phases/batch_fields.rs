// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Populate the batch columns added to jobs, recipes, and batches.

use scale_core::{Batch, Recipe, RecordId};
use scale_storage::{Dataset, WriteBatch};
use std::collections::BTreeMap;
use tracing::info;

use crate::error::PhaseError;
use crate::phase::{Chunk, InitPlan, Phase};

/// Revision written on batches created before revisions were tracked
const PLACEHOLDER_REVISION: RecordId = 1;

/// One batch per iteration.
///
/// Init roots every batch without a root at itself. Each iteration fills
/// `job.batch_id` and `recipe.batch_id` from the batch link tables, then
/// repairs a placeholder `recipe_type_rev_id`: first from a recipe in the
/// batch, otherwise from the latest revision of the recipe type created
/// before the batch.
pub struct BatchFieldsPhase;

impl Phase for BatchFieldsPhase {
    fn name(&self) -> &'static str {
        "batch_fields"
    }

    fn unit(&self) -> &'static str {
        "batches"
    }

    fn chunk_size(&self) -> usize {
        1
    }

    fn init(&self, data: &Dataset) -> Result<InitPlan, PhaseError> {
        let mut writes = WriteBatch::new();
        for batch in data.batch.iter().filter(|b| b.root_batch_id.is_none()) {
            writes.put(Batch { root_batch_id: Some(batch.id), ..batch.clone() });
        }
        if !writes.is_empty() {
            info!(count = writes.len(), "batches updated with root_batch_id");
        }
        Ok(InitPlan { total_work: data.batch.len() as u64, writes })
    }

    fn iterate(&self, data: &Dataset, cursor: Option<RecordId>) -> Result<Chunk, PhaseError> {
        let Some(batch) = data.batch.page_after(cursor, 1, |_| true).into_iter().next() else {
            return Ok(Chunk::empty());
        };
        let mut writes = WriteBatch::new();

        let mut jobs_updated = 0usize;
        for link in data.batch_job.iter().filter(|l| l.batch_id == batch.id) {
            if let Some(job) = data.job.get(link.job_id).filter(|j| j.batch_id.is_none()) {
                let mut job = job.clone();
                job.batch_id = Some(batch.id);
                writes.put(job);
                jobs_updated += 1;
            }
        }

        let mut recipes: BTreeMap<RecordId, Recipe> = BTreeMap::new();
        for link in data.batch_recipe.iter().filter(|l| l.batch_id == batch.id) {
            if let Some(recipe) = data.recipe.get(link.recipe_id).filter(|r| r.batch_id.is_none()) {
                let mut recipe = recipe.clone();
                recipe.batch_id = Some(batch.id);
                recipes.insert(recipe.id, recipe);
            }
        }
        let recipes_updated = recipes.len();

        if batch.recipe_type_rev_id == PLACEHOLDER_REVISION {
            let revision = revision_from_recipes(data, &recipes, batch.id)
                .filter(|rev| *rev != PLACEHOLDER_REVISION)
                .or_else(|| revision_before(data, batch));
            if let Some(rev) = revision.filter(|rev| *rev != PLACEHOLDER_REVISION) {
                info!(batch_id = batch.id, recipe_type_rev_id = rev, "set batch recipe type revision");
                writes.put(Batch { recipe_type_rev_id: rev, ..batch.clone() });
            }
        }

        for recipe in recipes.into_values() {
            writes.put(recipe);
        }
        if jobs_updated > 0 || recipes_updated > 0 {
            info!(batch_id = batch.id, jobs_updated, recipes_updated, "populated batch fields");
        }
        Ok(Chunk { writes, processed: 1, last_key: Some(batch.id) })
    }
}

/// Revision of the first recipe in the batch, counting links set this chunk
fn revision_from_recipes(
    data: &Dataset,
    updated: &BTreeMap<RecordId, Recipe>,
    batch_id: RecordId,
) -> Option<RecordId> {
    data.recipe
        .iter()
        .map(|r| updated.get(&r.id).unwrap_or(r))
        .find(|r| r.batch_id == Some(batch_id))
        .map(|r| r.recipe_type_rev_id)
}

/// Latest revision of the batch's recipe type created before the batch
fn revision_before(data: &Dataset, batch: &Batch) -> Option<RecordId> {
    data.recipe_type_revision
        .iter()
        .filter(|rev| rev.recipe_type_id == batch.recipe_type_id && rev.created < batch.created)
        .max_by_key(|rev| (rev.created, rev.id))
        .map(|rev| rev.id)
}

#[cfg(test)]
#[path = "batch_fields_tests.rs"]
mod tests;
