// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use scale_core::test_support::at;
use scale_core::{BatchJob, BatchRecipe, Job, RecipeTypeRevision};

fn revision(id: RecordId, recipe_type_id: RecordId, created: i64) -> RecipeTypeRevision {
    RecipeTypeRevision { id, recipe_type_id, created: at(created) }
}

fn dataset() -> Dataset {
    let mut data = Dataset::default();
    data.batch = vec![
        Batch::builder().id(1).recipe_type_id(5).created(at(100)).build(),
        Batch::builder().id(2).recipe_type_id(5).created(at(100)).root_batch_id(1).build(),
        Batch::builder().id(3).recipe_type_id(6).recipe_type_rev_id(40).created(at(100)).build(),
    ]
    .into_iter()
    .collect();
    data.job = vec![Job::builder().id(10).build(), Job::builder().id(11).batch_id(3).build()]
        .into_iter()
        .collect();
    data.recipe = vec![
        Recipe::builder().id(20).recipe_type_id(5).recipe_type_rev_id(7).build(),
        Recipe::builder().id(21).recipe_type_id(5).recipe_type_rev_id(8).build(),
    ]
    .into_iter()
    .collect();
    data.batch_job = vec![
        BatchJob { id: 1, batch_id: 1, job_id: 10 },
        BatchJob { id: 2, batch_id: 1, job_id: 11 },
    ]
    .into_iter()
    .collect();
    data.batch_recipe = vec![BatchRecipe { id: 1, batch_id: 1, recipe_id: 20 }].into_iter().collect();
    data.recipe_type_revision = vec![
        revision(30, 5, 10),
        revision(31, 5, 50),
        revision(32, 5, 200),
        revision(33, 6, 10),
    ]
    .into_iter()
    .collect();
    data
}

#[test]
fn init_roots_unrooted_batches() {
    let mut data = dataset();
    let plan = BatchFieldsPhase.init(&data).unwrap();
    assert_eq!(plan.total_work, 3);
    assert_eq!(plan.writes.len(), 2);
    data.apply_batch(&plan.writes);

    let roots: Vec<_> = data.batch.iter().map(|b| b.root_batch_id).collect();
    assert_eq!(roots, vec![Some(1), Some(1), Some(3)]);
}

#[test]
fn links_jobs_and_recipes_and_takes_revision_from_recipe() {
    let mut data = dataset();
    let chunk = BatchFieldsPhase.iterate(&data, None).unwrap();
    assert_eq!((chunk.processed, chunk.last_key), (1, Some(1)));
    data.apply_batch(&chunk.writes);

    assert_eq!(data.job.get(10).unwrap().batch_id, Some(1));
    // Existing batch link is kept
    assert_eq!(data.job.get(11).unwrap().batch_id, Some(3));
    assert_eq!(data.recipe.get(20).unwrap().batch_id, Some(1));
    assert_eq!(data.recipe.get(21).unwrap().batch_id, None);
    assert_eq!(data.batch.get(1).unwrap().recipe_type_rev_id, 7);
}

#[test]
fn falls_back_to_latest_revision_before_batch() {
    let mut data = dataset();
    let chunk = BatchFieldsPhase.iterate(&data, Some(1)).unwrap();
    assert_eq!(chunk.last_key, Some(2));
    data.apply_batch(&chunk.writes);
    assert_eq!(data.batch.get(2).unwrap().recipe_type_rev_id, 31);
}

#[test]
fn tracked_revision_is_left_alone() {
    let data = dataset();
    let chunk = BatchFieldsPhase.iterate(&data, Some(2)).unwrap();
    assert_eq!(chunk.processed, 1);
    assert!(chunk.writes.is_empty());
}

#[test]
fn placeholder_kept_when_no_revision_exists() {
    let mut data = dataset();
    data.recipe_type_revision = Default::default();
    let chunk = BatchFieldsPhase.iterate(&data, Some(1)).unwrap();
    assert!(chunk.writes.is_empty());
}

#[test]
fn past_last_batch_is_empty() {
    let data = dataset();
    let chunk = BatchFieldsPhase.iterate(&data, Some(3)).unwrap();
    assert_eq!(chunk.processed, 0);
}
