// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Forced-decision override specs.

use crate::prelude::*;

#[test]
fn forced_skip_exits_zero_without_history() {
    let project = Project::new();
    project.file("svc/lib.rs", "fn a() {}\n");
    project.commit("init");

    project.tg("9").env("SKIP_CI_VALUE", "true").assert().code(0);
    assert_eq!(project.read("ci-skip-42-9"), "true");
    // History was never consulted or written
    assert!(!project.exists("ci_ok_history"));
}

#[test]
fn forced_run_exits_three_and_sticks() {
    let project = Project::new();
    project.file("svc/lib.rs", "fn a() {}\n");
    project.commit("init");

    project.tg("9").env("SKIP_CI_VALUE", "anything-else").assert().code(3);
    assert_eq!(project.read("ci-skip-42-9"), "false");

    // Without the override the marker still wins
    project.tg("9").assert().code(3);
}

#[test]
fn override_works_even_when_required_scan_config_is_absent() {
    let project = Project::new();
    project.file("svc/lib.rs", "fn a() {}\n");
    project.commit("init");

    // Remote strategy without CI_API_V4_URL would be a config error, but
    // the override decides before validation
    let mut cmd = project.tg("9");
    cmd.args(["--strategy", "remote"]);
    cmd.env("SKIP_CI_VALUE", "true").assert().code(0);
}
