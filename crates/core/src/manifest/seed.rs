// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Seed manifest types.

use serde::{Deserialize, Serialize};

pub const SEED_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedManifest {
    pub seed_version: String,
    pub job: SeedJob,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedJob {
    pub name: String,
    pub job_version: String,
    pub package_version: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub maintainer: Maintainer,
    /// Seconds
    pub timeout: u64,
    pub interface: Interface,
    pub resources: Resources,
    #[serde(default)]
    pub errors: Vec<SeedError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maintainer {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interface {
    pub command: String,
    pub inputs: Inputs,
    pub outputs: Outputs,
    pub mounts: Vec<Mount>,
    pub settings: Vec<Setting>,
}

impl Interface {
    /// Every field name the interface declares, across all categories
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let inputs = self.inputs.files.iter().map(|f| f.name.as_str());
        let input_json = self.inputs.json.iter().map(|j| j.name.as_str());
        let outputs = self.outputs.files.iter().map(|f| f.name.as_str());
        let output_json = self.outputs.json.iter().map(|j| j.name.as_str());
        let mounts = self.mounts.iter().map(|m| m.name.as_str());
        let settings = self.settings.iter().map(|s| s.name.as_str());
        inputs.chain(input_json).chain(outputs).chain(output_json).chain(mounts).chain(settings)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inputs {
    pub files: Vec<InputFile>,
    pub json: Vec<JsonField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Outputs {
    pub files: Vec<OutputFile>,
    pub json: Vec<JsonField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputFile {
    pub name: String,
    pub required: bool,
    pub partial: bool,
    pub media_types: Vec<String>,
    pub multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonField {
    pub name: String,
    #[serde(rename = "type")]
    pub json_type: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFile {
    pub name: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub multiple: bool,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mount {
    pub name: String,
    pub path: String,
    /// `ro` or `rw`
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub name: String,
    pub secret: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default)]
    pub scalar: Vec<ScalarResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarResource {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_multiplier: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Job,
    Algorithm,
    Data,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedError {
    pub code: i32,
    pub name: String,
    pub title: String,
    pub description: String,
    pub category: ErrorCategory,
}
