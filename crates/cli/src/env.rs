// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Version string reported by `--version`
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH"));

const DEFAULT_LOG_FILTER: &str = "info";

/// Resolve state directory:
/// SCALE_STATE_DIR > XDG_STATE_HOME/scale > platform state dir/scale > ~/.local/state/scale
pub fn state_dir() -> Result<PathBuf> {
    if let Some(dir) = non_empty("SCALE_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("scale"));
    }
    if let Some(dir) = dirs::state_dir() {
        return Ok(dir.join("scale"));
    }
    let home = dirs::home_dir().ok_or_else(|| anyhow!("cannot determine a state directory; set SCALE_STATE_DIR"))?;
    Ok(home.join(".local/state/scale"))
}

/// Log filter directives from SCALE_LOG, defaulting to `info`
pub fn log_filter() -> String {
    non_empty("SCALE_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
