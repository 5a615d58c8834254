// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn explicit_state_dir_wins() {
    std::env::set_var("SCALE_STATE_DIR", "/tmp/scale-explicit");
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg");
    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/scale-explicit"));
    std::env::remove_var("SCALE_STATE_DIR");
    std::env::remove_var("XDG_STATE_HOME");
}

#[test]
#[serial]
fn xdg_state_home_is_next() {
    std::env::remove_var("SCALE_STATE_DIR");
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg");
    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/xdg/scale"));
    std::env::remove_var("XDG_STATE_HOME");
}

#[test]
#[serial]
fn empty_values_are_ignored() {
    std::env::set_var("SCALE_STATE_DIR", "");
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg");
    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/xdg/scale"));
    std::env::remove_var("SCALE_STATE_DIR");
    std::env::remove_var("XDG_STATE_HOME");
}

#[test]
#[serial]
fn log_filter_defaults_to_info() {
    std::env::remove_var("SCALE_LOG");
    assert_eq!(log_filter(), "info");
    std::env::set_var("SCALE_LOG", "scale_updater=debug");
    assert_eq!(log_filter(), "scale_updater=debug");
    std::env::remove_var("SCALE_LOG");
}
