// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Staged writes committed as one unit.

use scale_core::{
    Batch, BatchJob, BatchRecipe, Job, JobExecution, JobExecutionEnd, JobExecutionOutput, JobType,
    Recipe, RecipeNode, RecipeTypeRevision, RecordId, TaskUpdate,
};
use serde::{Deserialize, Serialize};

use crate::progress::PhaseProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    JobExe,
    JobExeEnd,
    JobExeOutput,
    TaskUpdate,
    Job,
    Recipe,
    RecipeNode,
    RecipeTypeRevision,
    Batch,
    BatchJob,
    BatchRecipe,
    JobType,
}

scale_core::simple_display! {
    TableName {
        JobExe => "job_exe",
        JobExeEnd => "job_exe_end",
        JobExeOutput => "job_exe_output",
        TaskUpdate => "task_update",
        Job => "job",
        Recipe => "recipe",
        RecipeNode => "recipe_node",
        RecipeTypeRevision => "recipe_type_revision",
        Batch => "batch",
        BatchJob => "batch_job",
        BatchRecipe => "batch_recipe",
        JobType => "job_type",
    }
}

/// A full row destined for one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Row {
    JobExe(JobExecution),
    JobExeEnd(JobExecutionEnd),
    JobExeOutput(JobExecutionOutput),
    TaskUpdate(TaskUpdate),
    Job(Job),
    Recipe(Recipe),
    RecipeNode(RecipeNode),
    RecipeTypeRevision(RecipeTypeRevision),
    Batch(Batch),
    BatchJob(BatchJob),
    BatchRecipe(BatchRecipe),
    JobType(JobType),
}

macro_rules! row_from {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for Row {
                fn from(row: $ty) -> Self {
                    Row::$variant(row)
                }
            }
        )+

        impl Row {
            pub fn table(&self) -> TableName {
                match self {
                    $( Row::$variant(_) => TableName::$variant, )+
                }
            }
        }
    };
}

row_from! {
    JobExe(JobExecution),
    JobExeEnd(JobExecutionEnd),
    JobExeOutput(JobExecutionOutput),
    TaskUpdate(TaskUpdate),
    Job(Job),
    Recipe(Recipe),
    RecipeNode(RecipeNode),
    RecipeTypeRevision(RecipeTypeRevision),
    Batch(Batch),
    BatchJob(BatchJob),
    BatchRecipe(BatchRecipe),
    JobType(JobType),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutation {
    /// Insert or replace a row
    Put(Row),
    /// Remove a row; absent rows are ignored
    Delete { table: TableName, id: RecordId },
    /// Record a phase's counters and cursor
    Progress(PhaseProgress),
}

/// Ordered list of mutations applied all-or-nothing.
///
/// Order is preserved, so dependent rows deleted first stay deleted first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WriteBatch {
    mutations: Vec<Mutation>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, row: impl Into<Row>) {
        self.mutations.push(Mutation::Put(row.into()));
    }

    pub fn delete(&mut self, table: TableName, id: RecordId) {
        self.mutations.push(Mutation::Delete { table, id });
    }

    pub fn delete_all(&mut self, table: TableName, ids: impl IntoIterator<Item = RecordId>) {
        for id in ids {
            self.delete(table, id);
        }
    }

    pub fn set_progress(&mut self, progress: PhaseProgress) {
        self.mutations.push(Mutation::Progress(progress));
    }

    pub fn append(&mut self, other: WriteBatch) {
        self.mutations.extend(other.mutations);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mutation> {
        self.mutations.iter()
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Number of row writes, excluding progress bookkeeping
    pub fn row_writes(&self) -> usize {
        self.mutations.iter().filter(|m| !matches!(m, Mutation::Progress(_))).count()
    }
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
