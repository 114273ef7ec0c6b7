// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for the end-to-end specs.

use assert_cmd::assert::Assert;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// A scratch git repository standing in for `CI_PROJECT_DIR`.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let project = Self { dir };
        project.git(&["init", "-q", "-b", "main"]);
        project.git(&["config", "user.email", "ci@example.com"]);
        project.git(&["config", "user.name", "ci"]);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn commit(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "--allow-empty", "-m", message]);
    }

    pub fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .arg("-C")
            .arg(self.dir.path())
            .args(args)
            .env_remove("GIT_DIR")
            .env_remove("GIT_WORK_TREE")
            .status()
            .unwrap();
        assert!(status.success(), "git {args:?} failed");
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(rel)).unwrap()
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.dir.path().join(rel).exists()
    }

    /// `tg` wired to this project under the local strategy, as job `job_id`.
    ///
    /// The ambient environment is dropped so a developer's own CI variables
    /// cannot leak into the run.
    pub fn tg(&self, job_id: &str) -> assert_cmd::Command {
        let mut cmd = tg();
        cmd.env("CI_PROJECT_DIR", self.dir.path());
        cmd.env("CI_PROJECT_ID", "42");
        cmd.env("CI_JOB_ID", job_id);
        cmd.env("CI_JOB_NAME", "test");
        cmd.env("CI_COMMIT_REF_NAME", "main");
        cmd.env("SKIP_IF_TREE_OK_IN_PAST", "svc");
        cmd.env("SKIP_CI_NO_ARTIFACT", "true");
        cmd.args(["--strategy", "local"]);
        cmd
    }
}

/// Bare `tg` with a scrubbed environment.
pub fn tg() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("tg").unwrap();
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

pub trait AssertExt {
    fn stdout_has(self, needle: &str) -> Self;
    fn stderr_has(self, needle: &str) -> Self;
}

impl AssertExt for Assert {
    fn stdout_has(self, needle: &str) -> Self {
        let text = String::from_utf8_lossy(&self.get_output().stdout).to_string();
        assert!(text.contains(needle), "stdout missing {needle:?}:\n{text}");
        self
    }

    fn stderr_has(self, needle: &str) -> Self {
        let text = String::from_utf8_lossy(&self.get_output().stderr).to_string();
        assert!(text.contains(needle), "stderr missing {needle:?}:\n{text}");
        self
    }
}
