// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural validation of Seed manifests.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::seed::SeedManifest;
use super::ManifestError;

#[allow(clippy::expect_used)]
static JOB_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static SEMVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.\d+\.\d+(-[0-9A-Za-z.-]+)?$").expect("constant regex pattern is valid")
});

const JSON_TYPES: &[&str] = &["string", "integer", "number", "boolean", "object", "array"];
const MOUNT_MODES: &[&str] = &["ro", "rw"];

/// Accepts a candidate manifest or rejects it with the first violation found
pub trait ManifestValidator {
    fn validate(&self, manifest: &SeedManifest) -> Result<(), ManifestError>;
}

/// Validator for the Seed 1.0 structural rules
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedValidator;

impl ManifestValidator for SeedValidator {
    fn validate(&self, manifest: &SeedManifest) -> Result<(), ManifestError> {
        let job = &manifest.job;
        check_semver("seedVersion", &manifest.seed_version)?;
        if !JOB_NAME.is_match(&job.name) {
            return Err(ManifestError::invalid("job.name", format!("{:?} is not a valid job name", job.name)));
        }
        check_semver("job.jobVersion", &job.job_version)?;
        check_semver("job.packageVersion", &job.package_version)?;
        if job.title.trim().is_empty() {
            return Err(ManifestError::invalid("job.title", "must not be empty"));
        }
        if job.maintainer.name.trim().is_empty() {
            return Err(ManifestError::invalid("job.maintainer.name", "must not be empty"));
        }
        if !job.maintainer.email.contains('@') {
            return Err(ManifestError::invalid("job.maintainer.email", "must be an email address"));
        }

        let interface = &job.interface;
        let mut seen = HashSet::new();
        for name in interface.names() {
            if !FIELD_NAME.is_match(name) {
                return Err(ManifestError::invalid("job.interface", format!("{name:?} is not a valid field name")));
            }
            if !seen.insert(name) {
                return Err(ManifestError::DuplicateName(name.to_string()));
            }
        }
        for field in interface.inputs.json.iter().chain(&interface.outputs.json) {
            if !JSON_TYPES.contains(&field.json_type.as_str()) {
                return Err(ManifestError::invalid(
                    format!("job.interface.{}", field.name),
                    format!("unknown json type {:?}", field.json_type),
                ));
            }
        }
        for output in &interface.outputs.files {
            if output.pattern.is_empty() {
                return Err(ManifestError::invalid(format!("job.interface.{}", output.name), "pattern must not be empty"));
            }
        }
        for mount in &interface.mounts {
            if !mount.path.starts_with('/') {
                return Err(ManifestError::invalid(
                    format!("job.interface.{}", mount.name),
                    format!("mount path {:?} must be absolute", mount.path),
                ));
            }
            if !MOUNT_MODES.contains(&mount.mode.as_str()) {
                return Err(ManifestError::invalid(
                    format!("job.interface.{}", mount.name),
                    format!("unknown mount mode {:?}", mount.mode),
                ));
            }
        }

        let mut resources = HashSet::new();
        for scalar in &job.resources.scalar {
            if !resources.insert(scalar.name.as_str()) {
                return Err(ManifestError::invalid("job.resources", format!("duplicate resource {:?}", scalar.name)));
            }
            let multiplier = scalar.input_multiplier.unwrap_or(0.0);
            if !(scalar.value.is_finite() && scalar.value >= 0.0 && multiplier.is_finite() && multiplier >= 0.0) {
                return Err(ManifestError::invalid(
                    format!("job.resources.{}", scalar.name),
                    "must be a non-negative number",
                ));
            }
        }

        let mut codes = HashSet::new();
        for error in &job.errors {
            if !codes.insert(error.code) {
                return Err(ManifestError::invalid("job.errors", format!("duplicate exit code {}", error.code)));
            }
            if error.name.trim().is_empty() {
                return Err(ManifestError::invalid("job.errors", format!("exit code {} has no name", error.code)));
            }
        }
        Ok(())
    }
}

fn check_semver(field: &str, version: &str) -> Result<(), ManifestError> {
    if SEMVER.is_match(version) {
        Ok(())
    } else {
        Err(ManifestError::invalid(field, format!("{version:?} is not a semantic version")))
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
