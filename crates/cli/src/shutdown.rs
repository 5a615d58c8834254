// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Signal handling for long-running commands.

use anyhow::{Context, Result};
use scale_updater::StopHandle;
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinHandle;
use tracing::info;

/// Ask the updater to stop on SIGTERM or SIGINT.
///
/// The returned task ends after the first signal; abort it once the work is
/// finished.
pub fn install_stop_handler(stop: StopHandle) -> Result<JoinHandle<()>> {
    let mut sigterm = signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("failed to install SIGINT handler")?;

    Ok(tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("received SIGTERM, finishing current chunk"),
            _ = sigint.recv() => info!("received SIGINT, finishing current chunk"),
        }
        stop.stop();
    }))
}
