// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::manifest::is_seed_manifest;
use serde_json::{json, Value};

fn valid() -> Value {
    json!({
        "seedVersion": "1.0.0",
        "job": {
            "name": "my-job",
            "jobVersion": "1.0.0",
            "packageVersion": "1.0.0",
            "title": "My Job",
            "description": "",
            "maintainer": {"name": "Jane", "email": "jane@example.com"},
            "timeout": 60,
            "interface": {
                "command": "run",
                "inputs": {"files": [{"name": "in", "required": true, "partial": false, "mediaTypes": [], "multiple": false}]},
                "outputs": {"files": [{"name": "out", "required": true, "multiple": false, "pattern": "*.png"}]},
                "mounts": [{"name": "ref", "path": "/ref", "mode": "rw"}],
                "settings": [{"name": "key", "secret": true}]
            },
            "resources": {"scalar": [{"name": "cpus", "value": 1.0}]},
            "errors": [{"code": 1, "name": "boom", "title": "Boom", "description": "", "category": "job"}]
        }
    })
}

fn validate(value: Value) -> Result<(), ManifestError> {
    let manifest: SeedManifest = serde_json::from_value(value).unwrap();
    SeedValidator.validate(&manifest)
}

#[test]
fn accepts_valid_manifest() {
    assert!(is_seed_manifest(&valid()));
    validate(valid()).unwrap();
}

#[yare::parameterized(
    upper_job_name     = { "/job/name", json!("My-Job") },
    bad_job_version    = { "/job/jobVersion", json!("1.0") },
    bad_seed_version   = { "/seedVersion", json!("one") },
    blank_title        = { "/job/title", json!("  ") },
    bad_email          = { "/job/maintainer/email", json!("nobody") },
    dotted_field_name  = { "/job/interface/inputs/files/0/name", json!("in.put") },
    empty_pattern      = { "/job/interface/outputs/files/0/pattern", json!("") },
    relative_mount     = { "/job/interface/mounts/0/path", json!("ref") },
    unknown_mount_mode = { "/job/interface/mounts/0/mode", json!("rx") },
    negative_resource  = { "/job/resources/scalar/0/value", json!(-1.0) },
    blank_error_name   = { "/job/errors/0/name", json!("") },
)]
fn rejects_invalid_field(pointer: &str, replacement: Value) {
    let mut manifest = valid();
    *manifest.pointer_mut(pointer).unwrap() = replacement;
    assert!(matches!(validate(manifest), Err(ManifestError::Invalid { .. })));
}

#[test]
fn rejects_names_reused_across_categories() {
    let mut manifest = valid();
    manifest["job"]["interface"]["settings"][0]["name"] = json!("in");
    assert!(matches!(validate(manifest), Err(ManifestError::DuplicateName(name)) if name == "in"));
}

#[test]
fn rejects_duplicate_error_codes() {
    let mut manifest = valid();
    let error = manifest["job"]["errors"][0].clone();
    manifest["job"]["errors"].as_array_mut().unwrap().push(error);
    assert!(matches!(validate(manifest), Err(ManifestError::Invalid { field, .. }) if field == "job.errors"));
}

#[test]
fn legacy_interface_is_not_seed() {
    assert!(!is_seed_manifest(&json!({"input_data": []})));
    assert!(!is_seed_manifest(&Value::Null));
}
