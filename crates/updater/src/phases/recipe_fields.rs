// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Populate the recipe columns added to jobs and recipes.

use scale_core::{Job, RecordId};
use scale_storage::{Dataset, WriteBatch};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

use crate::error::PhaseError;
use crate::phase::{Chunk, InitPlan, Phase};

const CHUNK_SIZE: usize = 10_000;

/// For each recipe in the chunk:
///
/// - `job.recipe_id` from the recipe's original nodes
/// - `job.root_recipe_id` from the root of the recipe's supersede chain
/// - `recipe.is_completed` when a completion time is set
///
/// Only unset columns are filled.
pub struct RecipeFieldsPhase;

impl Phase for RecipeFieldsPhase {
    fn name(&self) -> &'static str {
        "recipe_fields"
    }

    fn unit(&self) -> &'static str {
        "recipes"
    }

    fn chunk_size(&self) -> usize {
        CHUNK_SIZE
    }

    fn init(&self, data: &Dataset) -> Result<InitPlan, PhaseError> {
        Ok(InitPlan { total_work: data.recipe.len() as u64, writes: WriteBatch::new() })
    }

    fn iterate(&self, data: &Dataset, cursor: Option<RecordId>) -> Result<Chunk, PhaseError> {
        let page = data.recipe.page_after(cursor, CHUNK_SIZE, |_| true);
        let Some(last_key) = page.last().map(|r| r.id) else {
            return Ok(Chunk::empty());
        };
        let recipe_ids: BTreeSet<RecordId> = page.iter().map(|r| r.id).collect();

        let mut jobs: BTreeMap<RecordId, Job> = BTreeMap::new();
        for node in data.recipe_node.iter().filter(|n| recipe_ids.contains(&n.recipe_id)) {
            let Some(recipe) = data.recipe.get(node.recipe_id) else {
                continue;
            };
            let job = match jobs.entry(node.job_id) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => match data.job.get(node.job_id) {
                    Some(job) => e.insert(job.clone()),
                    None => continue,
                },
            };
            if node.is_original && job.recipe_id.is_none() {
                job.recipe_id = Some(recipe.id);
            }
            if job.root_recipe_id.is_none() {
                job.root_recipe_id = Some(recipe.root_superseded_recipe_id.unwrap_or(recipe.id));
            }
        }

        let mut writes = WriteBatch::new();
        let mut jobs_updated = 0usize;
        for job in jobs.into_values() {
            if data.job.get(job.id) != Some(&job) {
                writes.put(job);
                jobs_updated += 1;
            }
        }

        let mut recipes_completed = 0usize;
        for recipe in page.iter().filter(|r| r.completed.is_some() && !r.is_completed) {
            let mut recipe = (*recipe).clone();
            recipe.is_completed = true;
            writes.put(recipe);
            recipes_completed += 1;
        }

        if jobs_updated > 0 || recipes_completed > 0 {
            info!(jobs_updated, recipes_completed, "updated recipe fields");
        }
        Ok(Chunk { writes, processed: page.len() as u64, last_key: Some(last_key) })
    }
}

#[cfg(test)]
#[path = "recipe_fields_tests.rs"]
mod tests;
