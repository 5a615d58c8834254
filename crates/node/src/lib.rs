// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! scale-node: Health and fault conditions of cluster nodes
//!
//! Each node carries a [`NodeConditions`] tracker fed by the outcomes of the
//! cleanup, image pull and health check tasks the scheduler runs on it.

pub mod catalog;
mod conditions;
mod manager;
mod task;

pub use catalog::{NodeError, HEALTH_ERRORS};
pub use conditions::{ActiveError, NodeConditions, NodeStatus};
pub use manager::{Node, NodeManager};
pub use task::{
    TaskEvent, TaskKind, TaskOutcome, BAD_DAEMON_CODE, BAD_LOGSTASH_CODE, LOW_DOCKER_SPACE_CODE,
};
