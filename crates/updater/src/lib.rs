// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! scale-updater: Live, resumable conversion of historical records
//!
//! The [`DatabaseUpdater`] runs an ordered list of [`Phase`]s against a
//! [`Store`](scale_storage::Store). Each phase counts its work once, then
//! processes bounded chunks until done. A chunk's writes and the phase's
//! advanced cursor commit together, so a stopped or crashed run resumes
//! where the last commit left off.

mod error;
mod phase;
pub mod phases;
mod updater;

pub use error::{PhaseError, UpdateError};
pub use phase::{Chunk, InitPlan, Phase};
pub use updater::{DatabaseUpdater, PhaseState, PhaseStatus, RunOutcome, StopHandle};
