// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `scale node` - Node condition commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use scale_node::{NodeManager, NodeStatus, TaskEvent};
use tracing::debug;

use crate::color;
use crate::output::{print_json, OutputFormat, Table};

#[derive(Args)]
pub struct NodeArgs {
    #[command(subcommand)]
    pub command: NodeCommand,
}

#[derive(Subcommand)]
pub enum NodeCommand {
    /// Feed task outcome events to node trackers and print the result
    ///
    /// Each line of the file is one JSON event, e.g.
    /// {"host": "node-1", "task": "health", "outcome": "failed", "exit_code": 2}
    Replay {
        /// JSON lines file of task events ("-" for stdin)
        events: PathBuf,
    },
}

pub fn handle(command: NodeCommand, format: OutputFormat) -> Result<()> {
    match command {
        NodeCommand::Replay { events } => {
            let text = read_events(&events)?;
            let statuses = replay(&parse_events(&text)?);
            match format {
                OutputFormat::Json => print_json(&statuses)?,
                OutputFormat::Text => print!("{}", render_statuses(&statuses)),
            }
            Ok(())
        }
    }
}

fn read_events(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin()).context("cannot read events from stdin");
    }
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

/// Parse one event per non-blank line.
pub(crate) fn parse_events(text: &str) -> Result<Vec<TaskEvent>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("line {}: invalid task event", i + 1))
        })
        .collect()
}

/// Apply events in order, registering each host on first sight.
pub(crate) fn replay(events: &[TaskEvent]) -> Vec<NodeStatus> {
    let mut manager = NodeManager::new();
    for event in events {
        manager.register(&event.host);
        manager.handle(event);
        debug!(host = %event.host, task = %event.task, "replayed event");
    }
    manager.statuses()
}

pub(crate) fn render_statuses(statuses: &[NodeStatus]) -> String {
    let mut table = Table::new(vec!["HOST", "DAEMON", "PULL", "HEALTH", "ERRORS"]);
    for status in statuses {
        let errors: Vec<&str> = status.errors.iter().map(|e| e.error.name).collect();
        table.row(vec![
            status.hostname.clone(),
            flag(!status.is_daemon_bad),
            flag(!status.is_pull_bad),
            flag(status.is_health_check_normal),
            if errors.is_empty() { "-".to_string() } else { errors.join(",") },
        ]);
    }
    table.render_with(|col, text| match (col, text) {
        (1..=3, "ok") => color::good(text),
        (1..=3, "bad") => color::bad(text),
        (4, "-") => color::context(text),
        _ => text.to_string(),
    })
}

fn flag(ok: bool) -> String {
    let text = if ok { "ok" } else { "bad" };
    text.to_string()
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
