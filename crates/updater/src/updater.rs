// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The phase driver.

use scale_storage::{PhaseProgress, Store, WriteBatch};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::UpdateError;
use crate::phase::Phase;
use crate::phases::default_phases;

/// How a run ended, when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every phase is complete
    Completed,
    /// Stopped on request before an iteration of `phase`
    Stopped { phase: &'static str },
}

/// Cloneable handle that asks a running updater to stop.
///
/// The updater checks it between chunks, so the current chunk always commits.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    token: CancellationToken,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        if !self.token.is_cancelled() {
            info!("database updater has been told to stop");
        }
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseState {
    Pending,
    Running,
    Done,
}

scale_core::simple_display! {
    PhaseState {
        Pending => "pending",
        Running => "running",
        Done => "done",
    }
}

/// Progress report for one phase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseStatus {
    pub name: &'static str,
    pub unit: &'static str,
    pub state: PhaseState,
    pub completed_work: u64,
    pub total_work: u64,
    pub percent: f64,
}

/// Runs phases in order until all are complete or a stop is requested.
pub struct DatabaseUpdater<S: Store> {
    store: S,
    phases: Vec<Box<dyn Phase>>,
    stop: StopHandle,
}

impl<S: Store> DatabaseUpdater<S> {
    /// Updater running the standard phase list
    pub fn new(store: S) -> Self {
        Self::with_phases(store, default_phases())
    }

    pub fn with_phases(store: S, phases: Vec<Box<dyn Phase>>) -> Self {
        Self { store, phases, stop: StopHandle::new() }
    }

    /// Use an existing stop handle instead of a fresh one
    pub fn with_stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = stop;
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persisted progress of every phase, in run order
    pub fn progress(&self) -> Vec<PhaseStatus> {
        self.store.read(|data| {
            self.phases
                .iter()
                .map(|phase| {
                    let progress = data.progress(phase.name());
                    let state = match progress {
                        None => PhaseState::Pending,
                        Some(p) if p.is_done() => PhaseState::Done,
                        Some(_) => PhaseState::Running,
                    };
                    PhaseStatus {
                        name: phase.name(),
                        unit: phase.unit(),
                        state,
                        completed_work: progress.map_or(0, |p| p.completed_work),
                        total_work: progress.map_or(0, |p| p.total_work),
                        percent: progress.map_or(0.0, PhaseProgress::percent),
                    }
                })
                .collect()
        })
    }

    /// Run every remaining phase.
    ///
    /// Returns [`RunOutcome::Stopped`] when a stop was requested; rerunning
    /// resumes from the last committed chunk.
    pub fn run(&self) -> Result<RunOutcome, UpdateError> {
        for phase in &self.phases {
            if let Some(stopped) = self.run_phase(phase.as_ref())? {
                return Ok(stopped);
            }
        }
        info!("database update complete");
        Ok(RunOutcome::Completed)
    }

    fn run_phase(&self, phase: &dyn Phase) -> Result<Option<RunOutcome>, UpdateError> {
        let name = phase.name();

        let mut progress = match self.store.read(|data| data.progress(name).cloned()) {
            Some(progress) if progress.is_done() => {
                info!(phase = name, total = progress.total_work, "phase already complete");
                return Ok(None);
            }
            Some(progress) => {
                info!(
                    phase = name,
                    completed = progress.completed_work,
                    total = progress.total_work,
                    "resuming phase"
                );
                progress
            }
            None => {
                if self.stop.is_stopped() {
                    return Ok(Some(RunOutcome::Stopped { phase: name }));
                }
                self.init_phase(phase)?
            }
        };

        while !progress.is_done() {
            if self.stop.is_stopped() {
                warn!(phase = name, completed = progress.completed_work, "stopping before next chunk");
                return Ok(Some(RunOutcome::Stopped { phase: name }));
            }

            let chunk = self
                .store
                .read(|data| phase.iterate(data, progress.resume_cursor))
                .map_err(|source| UpdateError::Phase { phase: name, source })?;

            if chunk.processed == 0 {
                progress.exhaust();
            } else {
                progress.advance(chunk.processed, chunk.last_key);
            }
            self.commit(name, chunk.writes, &progress)?;

            info!(
                phase = name,
                completed = progress.completed_work,
                total = progress.total_work,
                percent = %format!("{:.1}", progress.percent()),
                "completed {} of {} {}",
                progress.completed_work,
                progress.total_work,
                phase.unit(),
            );
        }
        Ok(None)
    }

    fn init_phase(&self, phase: &dyn Phase) -> Result<PhaseProgress, UpdateError> {
        let name = phase.name();
        let plan = self
            .store
            .read(|data| phase.init(data))
            .map_err(|source| UpdateError::Phase { phase: name, source })?;
        info!(phase = name, total = plan.total_work, "found {} {} to update", plan.total_work, phase.unit());

        let progress = PhaseProgress::new(name, plan.total_work);
        self.commit(name, plan.writes, &progress)?;
        Ok(progress)
    }

    fn commit(
        &self,
        phase: &'static str,
        mut writes: WriteBatch,
        progress: &PhaseProgress,
    ) -> Result<(), UpdateError> {
        writes.set_progress(progress.clone());
        self.store.commit(writes).map_err(|source| UpdateError::Store { phase, source })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "updater_tests.rs"]
mod tests;
