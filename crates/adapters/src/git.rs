// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fingerprint provider backed by the git CLI.
//!
//! The fingerprint of a path set at a revision is the raw `git ls-tree`
//! output for exactly those paths, order preserved. git guarantees the
//! listing is deterministic for a given (revision, path list) pair.

use async_trait::async_trait;
use std::path::PathBuf;
use tg_core::Fingerprint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("failed to invoke git: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("{command} failed: {stderr}")]
    Failed { command: &'static str, stderr: String },
    #[error("git output is not valid UTF-8")]
    InvalidUtf8,
    #[error("tree listing is empty for the configured paths")]
    EmptyTree,
}

/// Read-only view of the repository's trees.
#[async_trait]
pub trait TreeAdapter: Clone + Send + Sync + 'static {
    /// Revision id of the current HEAD.
    async fn head_revision(&self) -> Result<String, TreeError>;

    /// Canonical listing of `paths` at `revision`.
    ///
    /// Fails with [`TreeError::EmptyTree`] when the listing is empty: an
    /// empty fingerprint must never become a match key.
    async fn tree_listing(&self, revision: &str, paths: &[String])
        -> Result<Fingerprint, TreeError>;
}

/// Production adapter invoking the `git` binary.
#[derive(Debug, Clone)]
pub struct GitCliAdapter {
    repo_dir: PathBuf,
}

impl GitCliAdapter {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self { repo_dir: repo_dir.into() }
    }

    async fn run_git(&self, args: &[&str], command: &'static str) -> Result<String, TreeError> {
        let output = tokio::process::Command::new("git")
            .arg("-C")
            .arg(&self.repo_dir)
            .args(args)
            .env_remove("GIT_DIR")
            .env_remove("GIT_WORK_TREE")
            .output()
            .await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::debug!(command, stderr, "git invocation failed");
            return Err(TreeError::Failed { command, stderr });
        }
        String::from_utf8(output.stdout).map_err(|_| TreeError::InvalidUtf8)
    }
}

#[async_trait]
impl TreeAdapter for GitCliAdapter {
    async fn head_revision(&self) -> Result<String, TreeError> {
        let out = self.run_git(&["rev-parse", "HEAD"], "git rev-parse").await?;
        Ok(out.trim().to_string())
    }

    async fn tree_listing(
        &self,
        revision: &str,
        paths: &[String],
    ) -> Result<Fingerprint, TreeError> {
        // Exact configured path list, order preserved, after the `--` group.
        let mut args = vec!["ls-tree", revision, "--"];
        args.extend(paths.iter().map(String::as_str));
        let out = self.run_git(&args, "git ls-tree").await?;
        if out.is_empty() {
            return Err(TreeError::EmptyTree);
        }
        tracing::trace!(revision, listing = %out, "tree listing");
        Ok(Fingerprint::new(out))
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct FakeTreeState {
        head: String,
        listings: HashMap<String, String>,
        listed: Vec<String>,
    }

    /// In-memory tree adapter mapping revision → listing.
    #[derive(Debug, Clone, Default)]
    pub struct FakeTreeAdapter {
        state: Arc<Mutex<FakeTreeState>>,
    }

    impl FakeTreeAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_head(&self, revision: impl Into<String>) {
            self.lock().head = revision.into();
        }

        /// Register the listing returned for `revision`.
        pub fn insert_listing(&self, revision: impl Into<String>, listing: impl Into<String>) {
            self.lock().listings.insert(revision.into(), listing.into());
        }

        /// Revisions whose listing was requested, in call order.
        pub fn listed_revisions(&self) -> Vec<String> {
            self.lock().listed.clone()
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, FakeTreeState> {
            self.state.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    #[async_trait]
    impl TreeAdapter for FakeTreeAdapter {
        async fn head_revision(&self) -> Result<String, TreeError> {
            let head = self.lock().head.clone();
            if head.is_empty() {
                return Err(TreeError::Failed {
                    command: "git rev-parse",
                    stderr: "fake: no HEAD configured".to_string(),
                });
            }
            Ok(head)
        }

        async fn tree_listing(
            &self,
            revision: &str,
            _paths: &[String],
        ) -> Result<Fingerprint, TreeError> {
            let mut state = self.lock();
            state.listed.push(revision.to_string());
            match state.listings.get(revision) {
                Some(listing) if listing.is_empty() => Err(TreeError::EmptyTree),
                Some(listing) => Ok(Fingerprint::new(listing.clone())),
                None => Err(TreeError::Failed {
                    command: "git ls-tree",
                    stderr: format!("fake: unknown revision {revision}"),
                }),
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeTreeAdapter;

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
