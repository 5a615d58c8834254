// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Storage layer for the Scale database updater
//!
//! The [`Dataset`] holds every table the updater touches. Changes are staged
//! in a [`WriteBatch`] and applied through a [`Store`], which commits each
//! batch as one atomic unit.

mod batch;
mod dataset;
mod file_store;
mod journal;
mod progress;
mod snapshot;
mod store;

pub use batch::{Mutation, Row, TableName, WriteBatch};
pub use dataset::{Dataset, Table};
pub use file_store::{CheckpointResult, FileStore, StoreConfig};
pub use progress::PhaseProgress;
pub use snapshot::{Snapshot, CURRENT_SNAPSHOT_VERSION};
pub use store::{MemoryStore, Store, StoreError};
