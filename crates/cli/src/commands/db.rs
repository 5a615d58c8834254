// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `scale db` - Database update commands

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use scale_storage::{CheckpointResult, FileStore};
use scale_updater::{DatabaseUpdater, PhaseState, PhaseStatus, RunOutcome};
use serde::Serialize;

use crate::color;
use crate::exit_error::ExitError;
use crate::output::{print_json, OutputFormat, Table};
use crate::shutdown;

#[derive(Args)]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbCommand,
}

#[derive(Subcommand)]
pub enum DbCommand {
    /// Convert historical records to the current schema
    ///
    /// Safe to interrupt: Ctrl-C finishes the current chunk and stops, and
    /// the next run resumes from there.
    Update {
        /// Skip writing a snapshot after the run
        #[arg(long)]
        no_checkpoint: bool,
    },
    /// Show progress of every update phase
    Status,
    /// Compact the journal into a snapshot
    Checkpoint,
}

pub async fn handle(command: DbCommand, state_dir: &Path, format: OutputFormat) -> Result<()> {
    match command {
        DbCommand::Update { no_checkpoint } => update(state_dir, no_checkpoint, format).await,
        DbCommand::Status => status(state_dir, format),
        DbCommand::Checkpoint => checkpoint(state_dir, format),
    }
}

fn open_store(state_dir: &Path) -> Result<FileStore> {
    FileStore::open(state_dir).with_context(|| format!("cannot open state in {}", state_dir.display()))
}

#[derive(Serialize)]
struct StatusReport {
    seq: u64,
    journal_entries: usize,
    phases: Vec<PhaseStatus>,
}

#[derive(Serialize)]
struct UpdateReport {
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stopped_phase: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checkpoint: Option<CheckpointReport>,
    #[serde(flatten)]
    status: StatusReport,
}

#[derive(Serialize)]
struct CheckpointReport {
    seq: u64,
    size_bytes: u64,
}

impl From<CheckpointResult> for CheckpointReport {
    fn from(result: CheckpointResult) -> Self {
        Self { seq: result.seq, size_bytes: result.size_bytes }
    }
}

async fn update(state_dir: &Path, no_checkpoint: bool, format: OutputFormat) -> Result<()> {
    let updater = DatabaseUpdater::new(open_store(state_dir)?);
    let signals = shutdown::install_stop_handler(updater.stop_handle())?;

    // Phases do blocking file I/O; keep them off the runtime so signals still arrive
    let joined = tokio::task::spawn_blocking(move || {
        let outcome = updater.run();
        (updater, outcome)
    })
    .await;
    signals.abort();
    let (updater, outcome) = joined.context("updater task panicked")?;
    let outcome = outcome?;

    let checkpoint = if no_checkpoint {
        None
    } else {
        Some(CheckpointReport::from(updater.store().checkpoint()?))
    };

    let report = UpdateReport {
        outcome: match outcome {
            RunOutcome::Completed => "completed",
            RunOutcome::Stopped { .. } => "stopped",
        },
        stopped_phase: match outcome {
            RunOutcome::Completed => None,
            RunOutcome::Stopped { phase } => Some(phase),
        },
        checkpoint,
        status: status_report(&updater),
    };

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            print!("{}", render_phases(&report.status.phases));
            if let Some(cp) = &report.checkpoint {
                println!("{}", color::context(&format!("checkpoint at seq {} ({} bytes)", cp.seq, cp.size_bytes)));
            }
        }
    }

    match outcome {
        RunOutcome::Completed => Ok(()),
        RunOutcome::Stopped { phase } => Err(ExitError::stopped(phase).into()),
    }
}

fn status_report(updater: &DatabaseUpdater<FileStore>) -> StatusReport {
    let store = updater.store();
    StatusReport { seq: store.seq(), journal_entries: store.journal_len(), phases: updater.progress() }
}

fn status(state_dir: &Path, format: OutputFormat) -> Result<()> {
    let updater = DatabaseUpdater::new(open_store(state_dir)?);
    let report = status_report(&updater);
    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            print!("{}", render_phases(&report.phases));
            println!(
                "{}",
                color::context(&format!("seq {} ({} journal entries)", report.seq, report.journal_entries))
            );
        }
    }
    Ok(())
}

fn checkpoint(state_dir: &Path, format: OutputFormat) -> Result<()> {
    let store = open_store(state_dir)?;
    let report = CheckpointReport::from(store.checkpoint()?);
    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => println!("checkpoint at seq {} ({} bytes)", report.seq, report.size_bytes),
    }
    Ok(())
}

/// Phase progress as a text table
pub(crate) fn render_phases(phases: &[PhaseStatus]) -> String {
    let mut table = Table::new(vec!["PHASE", "STATE", "PROGRESS", "PERCENT"]);
    for phase in phases {
        table.row(vec![
            phase.name.to_string(),
            phase.state.to_string(),
            format!("{}/{} {}", phase.completed_work, phase.total_work, phase.unit),
            format!("{:.1}%", phase.percent),
        ]);
    }
    table.render_with(|col, text| match col {
        1 if text == PhaseState::Done.to_string() => color::good(text),
        1 if text == PhaseState::Pending.to_string() => color::context(text),
        _ => text.to_string(),
    })
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
