// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI surface specs: help, version, and configuration failures.

use crate::prelude::*;

#[test]
fn help_shows_usage_and_flags() {
    tg().arg("--help")
        .assert()
        .success()
        .stdout_has("Usage:")
        .stdout_has("--strategy")
        .stdout_has("--no-artifact")
        .stdout_has("SKIP_IF_TREE_OK_IN_PAST");
}

#[test]
fn version_shows_version() {
    tg().arg("--version").assert().success().stdout_has("0.2");
}

#[test]
fn bare_environment_is_a_config_error() {
    tg().assert().code(6).stderr_has("is not defined");
}

#[test]
fn empty_path_set_is_a_config_error() {
    let project = Project::new();
    project.file("svc/lib.rs", "fn a() {}\n");
    project.commit("init");

    project
        .tg("1")
        .env("SKIP_IF_TREE_OK_IN_PAST", "")
        .assert()
        .code(6)
        .stderr_has("path set is empty");
    // No marker gets recorded for a misconfigured run
    assert!(!project.exists("ci-skip-42-1"));
}
