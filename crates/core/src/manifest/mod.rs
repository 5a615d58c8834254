// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job type manifests: the legacy free-form interface, the Seed manifest
//! that replaced it, and the one-way conversion between them.

mod convert;
mod legacy;
mod seed;
mod validate;

pub use convert::{convert_interface, convert_job_type, seed_errors, UniqueNames};
pub use legacy::{LegacyEnvVar, LegacyInput, LegacyManifest, LegacyMount, LegacyOutput, LegacySetting};
pub use seed::{
    ErrorCategory, InputFile, Inputs, Interface, JsonField, Maintainer, Mount, OutputFile, Outputs,
    Resources, ScalarResource, SeedError, SeedJob, SeedManifest, Setting, SEED_VERSION,
};
pub use validate::{ManifestValidator, SeedValidator};

use serde_json::Value;
use thiserror::Error;

/// Errors raised while reading, converting, or validating a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("malformed manifest: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid exit code {0:?} in error mapping")]
    ExitCode(String),

    #[error("{field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("duplicate interface name {0:?}")]
    DuplicateName(String),
}

impl ManifestError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid { field: field.into(), reason: reason.into() }
    }
}

/// Whether a stored manifest value is already in Seed format
pub fn is_seed_manifest(value: &Value) -> bool {
    value.get("seedVersion").is_some()
}
