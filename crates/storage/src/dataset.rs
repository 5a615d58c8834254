// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized tables the updater reads and rewrites.

use scale_core::{
    Batch, BatchJob, BatchRecipe, Job, JobExecution, JobExecutionEnd, JobExecutionOutput, JobType,
    Recipe, RecipeNode, RecipeTypeRevision, Record, RecordId, TaskUpdate,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::batch::{Mutation, Row, TableName, WriteBatch};
use crate::progress::PhaseProgress;

/// Rows of one table ordered by primary key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table<R> {
    rows: BTreeMap<RecordId, R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self { rows: BTreeMap::new() }
    }
}

impl<R: Record> Table<R> {
    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.rows.get(&id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in primary key order
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rows.values()
    }

    pub fn count_where(&self, pred: impl Fn(&R) -> bool) -> u64 {
        self.rows.values().filter(|r| pred(r)).count() as u64
    }

    /// Up to `limit` matching rows with a key greater than `cursor`, in key order.
    pub fn page_after(
        &self,
        cursor: Option<RecordId>,
        limit: usize,
        pred: impl Fn(&R) -> bool,
    ) -> Vec<&R> {
        let rows = match cursor {
            Some(after) => self.rows.range(after.saturating_add(1)..),
            None => self.rows.range(..),
        };
        rows.map(|(_, r)| r).filter(|r| pred(r)).take(limit).collect()
    }

    pub fn max_id(&self) -> Option<RecordId> {
        self.rows.keys().next_back().copied()
    }

    /// Insert or replace a row by its key
    pub fn put(&mut self, row: R) {
        self.rows.insert(row.id(), row);
    }

    pub fn remove(&mut self, id: RecordId) -> Option<R> {
        self.rows.remove(&id)
    }
}

impl<R: Record> FromIterator<R> for Table<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut table = Self::default();
        for row in iter {
            table.put(row);
        }
        table
    }
}

/// Every table the updater works on, plus per-phase progress.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub job_exe: Table<JobExecution>,
    #[serde(default)]
    pub job_exe_end: Table<JobExecutionEnd>,
    #[serde(default)]
    pub job_exe_output: Table<JobExecutionOutput>,
    #[serde(default)]
    pub task_update: Table<TaskUpdate>,
    #[serde(default)]
    pub job: Table<Job>,
    #[serde(default)]
    pub recipe: Table<Recipe>,
    #[serde(default)]
    pub recipe_node: Table<RecipeNode>,
    #[serde(default)]
    pub recipe_type_revision: Table<RecipeTypeRevision>,
    #[serde(default)]
    pub batch: Table<Batch>,
    #[serde(default)]
    pub batch_job: Table<BatchJob>,
    #[serde(default)]
    pub batch_recipe: Table<BatchRecipe>,
    #[serde(default)]
    pub job_type: Table<JobType>,
    /// Phase name → progress
    #[serde(default)]
    pub progress: BTreeMap<String, PhaseProgress>,
}

impl Dataset {
    pub fn progress(&self, phase: &str) -> Option<&PhaseProgress> {
        self.progress.get(phase)
    }

    /// Apply every mutation of a batch in order.
    ///
    /// Mutations cannot fail: puts replace, deletes of absent rows are no-ops.
    pub fn apply_batch(&mut self, batch: &WriteBatch) {
        for mutation in batch.iter() {
            self.apply(mutation);
        }
    }

    pub fn apply(&mut self, mutation: &Mutation) {
        match mutation {
            Mutation::Put(row) => self.put(row.clone()),
            Mutation::Delete { table, id } => self.delete(*table, *id),
            Mutation::Progress(progress) => {
                self.progress.insert(progress.name.clone(), progress.clone());
            }
        }
    }

    fn put(&mut self, row: Row) {
        match row {
            Row::JobExe(r) => self.job_exe.put(r),
            Row::JobExeEnd(r) => self.job_exe_end.put(r),
            Row::JobExeOutput(r) => self.job_exe_output.put(r),
            Row::TaskUpdate(r) => self.task_update.put(r),
            Row::Job(r) => self.job.put(r),
            Row::Recipe(r) => self.recipe.put(r),
            Row::RecipeNode(r) => self.recipe_node.put(r),
            Row::RecipeTypeRevision(r) => self.recipe_type_revision.put(r),
            Row::Batch(r) => self.batch.put(r),
            Row::BatchJob(r) => self.batch_job.put(r),
            Row::BatchRecipe(r) => self.batch_recipe.put(r),
            Row::JobType(r) => self.job_type.put(r),
        }
    }

    fn delete(&mut self, table: TableName, id: RecordId) {
        match table {
            TableName::JobExe => {
                self.job_exe.remove(id);
            }
            TableName::JobExeEnd => {
                self.job_exe_end.remove(id);
            }
            TableName::JobExeOutput => {
                self.job_exe_output.remove(id);
            }
            TableName::TaskUpdate => {
                self.task_update.remove(id);
            }
            TableName::Job => {
                self.job.remove(id);
            }
            TableName::Recipe => {
                self.recipe.remove(id);
            }
            TableName::RecipeNode => {
                self.recipe_node.remove(id);
            }
            TableName::RecipeTypeRevision => {
                self.recipe_type_revision.remove(id);
            }
            TableName::Batch => {
                self.batch.remove(id);
            }
            TableName::BatchJob => {
                self.batch_job.remove(id);
            }
            TableName::BatchRecipe => {
                self.batch_recipe.remove(id);
            }
            TableName::JobType => {
                self.job_type.remove(id);
            }
        }
    }
}

#[cfg(test)]
#[path = "dataset_tests.rs"]
mod tests;
