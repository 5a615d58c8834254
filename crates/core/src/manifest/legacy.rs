// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The legacy job interface: a loosely-typed mapping where every key is
//! optional.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ManifestError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyManifest {
    pub command: Option<String>,
    pub input_data: Vec<LegacyInput>,
    pub output_data: Vec<LegacyOutput>,
    pub mounts: Vec<LegacyMount>,
    pub settings: Vec<LegacySetting>,
    pub env_vars: Vec<LegacyEnvVar>,
}

impl LegacyManifest {
    /// Read a legacy interface from its stored value.
    ///
    /// A null value is an empty interface.
    pub fn parse(value: &Value) -> Result<Self, ManifestError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value.clone())?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyInput {
    pub name: Option<String>,
    /// `file`, `files`, `property`, ...
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    pub required: Option<bool>,
    pub partial: Option<bool>,
    pub media_types: Vec<String>,
}

impl LegacyInput {
    pub fn is_file(&self) -> bool {
        self.input_type.as_deref().is_some_and(|t| t.contains("file"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyOutput {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub output_type: Option<String>,
    pub required: Option<bool>,
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyMount {
    pub name: Option<String>,
    pub path: Option<String>,
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacySetting {
    pub name: Option<String>,
    pub secret: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyEnvVar {
    pub name: Option<String>,
    pub value: Option<String>,
}
