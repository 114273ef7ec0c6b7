// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end flow under the local history strategy.

use crate::prelude::*;

#[test]
fn first_run_misses_then_identical_tree_skips() {
    let project = Project::new();
    project.file("svc/lib.rs", "fn a() {}\n");
    project.commit("init");

    // First job: no history yet
    project.tg("1").assert().code(2).stdout_has("Tree not found");
    assert_eq!(project.read("ci-skip-42-1"), "false");
    let history = project.read("ci_ok_history");
    assert_eq!(history.lines().count(), 1);
    assert!(history.trim_end().ends_with(":1"), "history should record job 1: {history}");

    // A later job on the unchanged tree finds job 1's entry
    project.tg("2").assert().code(0).stdout_has("skipping");
    assert_eq!(project.read("ci-skip-42-2"), "true");
}

#[test]
fn reinvocation_within_a_job_settles_on_the_marker() {
    let project = Project::new();
    project.file("svc/lib.rs", "fn a() {}\n");
    project.commit("init");

    project.tg("1").assert().code(2);
    // Same job id again: cached no-skip, exit 3
    project.tg("1").assert().code(3).stdout_has("already recorded");
    project.tg("1").assert().code(3);
}

#[test]
fn changed_tree_misses_again() {
    let project = Project::new();
    project.file("svc/lib.rs", "fn a() {}\n");
    project.commit("init");
    project.tg("1").assert().code(2);

    project.file("svc/lib.rs", "fn a() { todo!() }\n");
    project.commit("change svc");

    project.tg("2").assert().code(2);
    assert_eq!(project.read("ci_ok_history").lines().count(), 2);
}

#[test]
fn changes_outside_the_watched_paths_do_not_spoil_the_match() {
    let project = Project::new();
    project.file("svc/lib.rs", "fn a() {}\n");
    project.file("docs/readme.md", "one\n");
    project.commit("init");
    project.tg("1").assert().code(2);

    project.file("docs/readme.md", "two\n");
    project.commit("docs only");

    project.tg("2").assert().code(0);
}

#[test]
fn unknown_path_is_an_empty_tree() {
    let project = Project::new();
    project.file("svc/lib.rs", "fn a() {}\n");
    project.commit("init");

    project
        .tg("1")
        .env("SKIP_IF_TREE_OK_IN_PAST", "no-such-dir")
        .assert()
        .code(5)
        .stdout_has("listing is empty");
    // An empty tree still records a no-skip marker
    assert_eq!(project.read("ci-skip-42-1"), "false");
}
