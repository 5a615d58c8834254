// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn scale_help_lists_command_groups() {
    cli().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("db").stdout_has("node");
}

#[test]
fn scale_db_help_shows_subcommands() {
    cli()
        .args(&["db", "--help"])
        .passes()
        .stdout_has("update")
        .stdout_has("status")
        .stdout_has("checkpoint");
}

#[test]
fn scale_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2.0");
}

#[test]
fn unknown_format_is_a_usage_error() {
    cli().args(&["db", "status", "--format", "yaml"]).exits(2).stderr_has("yaml");
}
