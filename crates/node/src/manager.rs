// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of known nodes and their conditions.

use scale_core::{Clock, SystemClock};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::conditions::{NodeConditions, NodeStatus};
use crate::task::TaskEvent;

/// A cluster node known to the scheduler
#[derive(Debug, Clone)]
pub struct Node<C: Clock = SystemClock> {
    pub hostname: String,
    pub conditions: NodeConditions<C>,
}

impl<C: Clock> Node<C> {
    /// Docker tasks may be scheduled here
    pub fn is_schedulable(&self) -> bool {
        !self.conditions.is_daemon_bad() && self.conditions.is_health_check_normal()
    }

    pub fn can_pull(&self) -> bool {
        !self.conditions.is_pull_bad()
    }
}

/// Nodes keyed by hostname
#[derive(Debug, Clone, Default)]
pub struct NodeManager<C: Clock = SystemClock> {
    clock: C,
    nodes: BTreeMap<String, Node<C>>,
}

impl NodeManager<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> NodeManager<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock, nodes: BTreeMap::new() }
    }

    /// Add a node; registering a known hostname keeps its conditions.
    pub fn register(&mut self, hostname: &str) -> &mut Node<C> {
        let clock = &self.clock;
        self.nodes.entry(hostname.to_string()).or_insert_with(|| {
            info!(host = hostname, "node registered");
            Node {
                hostname: hostname.to_string(),
                conditions: NodeConditions::with_clock(hostname, clock.clone()),
            }
        })
    }

    /// Drop a node along with its tracker
    pub fn remove(&mut self, hostname: &str) -> Option<Node<C>> {
        let node = self.nodes.remove(hostname);
        if node.is_some() {
            info!(host = hostname, "node removed");
        }
        node
    }

    pub fn get(&self, hostname: &str) -> Option<&Node<C>> {
        self.nodes.get(hostname)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Apply a task event to its node, returning false for unknown hosts.
    pub fn handle(&mut self, event: &TaskEvent) -> bool {
        match self.nodes.get_mut(&event.host) {
            Some(node) => {
                node.conditions.handle_task(event.task, event.outcome);
                true
            }
            None => {
                warn!(host = %event.host, task = %event.task, "task event for unknown node");
                false
            }
        }
    }

    /// Hostnames of nodes that can run Docker tasks
    pub fn schedulable_nodes(&self) -> Vec<&str> {
        self.nodes.values().filter(|n| n.is_schedulable()).map(|n| n.hostname.as_str()).collect()
    }

    /// Hostnames of nodes that may pull images
    pub fn pull_eligible_nodes(&self) -> Vec<&str> {
        self.nodes.values().filter(|n| n.can_pull()).map(|n| n.hostname.as_str()).collect()
    }

    /// Status of every node, sorted by hostname
    pub fn statuses(&self) -> Vec<NodeStatus> {
        self.nodes.values().map(|n| n.conditions.status()).collect()
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
