// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Legacy interface → Seed manifest conversion.

use crate::records::{ErrorMapping, JobType};

use super::legacy::LegacyManifest;
use super::seed::{
    ErrorCategory, InputFile, Interface, JsonField, Maintainer, Mount, OutputFile, Resources,
    ScalarResource, SeedError, SeedJob, SeedManifest, Setting, SEED_VERSION,
};
use super::validate::ManifestValidator;
use super::ManifestError;

const ENV_SETTING_PREFIX: &str = "ENV_";
const OUTPUT_PATTERN: &str = "*.*";
const PLACEHOLDER_EMAIL: &str = "jdoe@example.com";
const PLACEHOLDER_MAINTAINER: &str = "Legacy";

/// Suffix counter shared by every renamed field of one conversion.
///
/// Each call to [`UniqueNames::assign`] consumes one number, so names stay
/// unique even when legacy inputs, outputs, mounts, and settings reused the
/// same name.
#[derive(Debug, Default)]
pub struct UniqueNames {
    next: u32,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next suffix to `name`, or to `fallback` when the legacy
    /// field had no usable name.
    pub fn assign(&mut self, name: Option<&str>, fallback: &str) -> String {
        let base = name.filter(|n| !n.is_empty()).unwrap_or(fallback);
        let unique = format!("{}{}", base, self.next);
        self.next += 1;
        unique
    }
}

/// Convert the legacy interface fields, renaming every field through `names`.
pub fn convert_interface(legacy: &LegacyManifest, names: &mut UniqueNames) -> Interface {
    let mut interface = Interface {
        command: legacy.command.clone().unwrap_or_default(),
        ..Interface::default()
    };

    for input in &legacy.input_data {
        let name = names.assign(input.name.as_deref(), "input");
        let required = input.required.unwrap_or(true);
        if input.is_file() {
            interface.inputs.files.push(InputFile {
                name,
                required,
                partial: input.partial.unwrap_or(false),
                media_types: input.media_types.clone(),
                multiple: input.input_type.as_deref() == Some("files"),
            });
        } else {
            interface.inputs.json.push(JsonField { name, json_type: "string".to_string(), required });
        }
    }

    for output in &legacy.output_data {
        interface.outputs.files.push(OutputFile {
            name: names.assign(output.name.as_deref(), "output"),
            required: output.required.unwrap_or(true),
            media_type: output.media_type.clone(),
            multiple: output.output_type.as_deref() == Some("files"),
            pattern: OUTPUT_PATTERN.to_string(),
        });
    }

    for mount in &legacy.mounts {
        interface.mounts.push(Mount {
            name: names.assign(mount.name.as_deref(), "mount"),
            path: mount.path.clone().unwrap_or_default(),
            mode: mount.mode.clone().unwrap_or_else(|| "ro".to_string()),
        });
    }

    for setting in &legacy.settings {
        interface.settings.push(Setting {
            name: names.assign(setting.name.as_deref(), "setting"),
            secret: setting.secret.unwrap_or(false),
        });
    }
    for var in &legacy.env_vars {
        let name = names.assign(var.name.as_deref(), "setting");
        interface.settings.push(Setting { name: format!("{ENV_SETTING_PREFIX}{name}"), secret: false });
    }

    interface
}

/// Convert a legacy exit code mapping into Seed error descriptors.
pub fn seed_errors(mapping: &ErrorMapping) -> Result<Vec<SeedError>, ManifestError> {
    mapping
        .exit_codes
        .iter()
        .map(|(code, name)| {
            let code = code.trim().parse::<i32>().map_err(|_| ManifestError::ExitCode(code.clone()))?;
            Ok(SeedError {
                code,
                name: name.clone(),
                title: "Error Name".to_string(),
                description: "Error Description".to_string(),
                category: ErrorCategory::Algorithm,
            })
        })
        .collect()
}

/// Build and validate the Seed manifest for a legacy job type.
///
/// `name` and `version` are the job type's new identity. The job type is only
/// read; callers commit the returned manifest once it has passed validation.
pub fn convert_job_type(
    job_type: &JobType,
    name: &str,
    version: &str,
    validator: &dyn ManifestValidator,
) -> Result<SeedManifest, ManifestError> {
    let legacy = LegacyManifest::parse(&job_type.manifest)?;
    let mut names = UniqueNames::new();
    let interface = convert_interface(&legacy, &mut names);

    let old_name_version = format!("{} {}", job_type.name, job_type.version);
    let tags = job_type.category.iter().cloned().chain([old_name_version]).collect();

    let manifest = SeedManifest {
        seed_version: SEED_VERSION.to_string(),
        job: SeedJob {
            name: name.to_string(),
            job_version: version.to_string(),
            package_version: "1.0.0".to_string(),
            title: format!("LEGACY {}", job_type.title),
            description: job_type.description.clone(),
            tags,
            maintainer: Maintainer {
                name: job_type
                    .author_name
                    .clone()
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| PLACEHOLDER_MAINTAINER.to_string()),
                email: PLACEHOLDER_EMAIL.to_string(),
                url: job_type.author_url.clone(),
            },
            timeout: job_type.timeout,
            interface,
            resources: legacy_resources(job_type),
            errors: seed_errors(&job_type.error_mapping)?,
        },
    };

    validator.validate(&manifest)?;
    Ok(manifest)
}

fn legacy_resources(job_type: &JobType) -> Resources {
    let scalar = |name: &str, value: f64, input_multiplier: Option<f64>| ScalarResource {
        name: name.to_string(),
        value,
        input_multiplier,
    };
    Resources {
        scalar: vec![
            scalar("cpus", job_type.cpus_required, None),
            scalar("mem", job_type.mem_const_required, Some(job_type.mem_mult_required)),
            scalar("sharedMem", job_type.shared_mem_required, None),
            scalar("disk", job_type.disk_out_const_required, Some(job_type.disk_out_mult_required)),
        ],
    }
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;
