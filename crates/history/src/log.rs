// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded append-only history log.
//!
//! One `<digest>:<job_id>` line per recorded job, newest first, capped at
//! [`HISTORY_CAP`] entries. The file lives in the CI cache and is shared
//! across job instances without locking: a concurrent read-modify-write can
//! lose one writer's entry (last successful flush wins). That is accepted —
//! the cache key is expected to be scoped to a single job name.

use std::fs;
use std::path::{Path, PathBuf};
use tg_core::Digest;
use thiserror::Error;

/// Maximum number of entries kept. Oldest entries drop off on overflow.
pub const HISTORY_CAP: usize = 500;

#[derive(Debug, Error)]
pub enum HistoryLogError {
    #[error("failed to write history log {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Append-only, size-capped fingerprint-digest → job-id log.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
    cap: usize,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), cap: HISTORY_CAP }
    }

    /// Override the cap. Test hook.
    pub fn with_cap(path: impl Into<PathBuf>, cap: usize) -> Self {
        Self { path: path.into(), cap }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Find the job id recorded for `digest`, newest entry first.
    ///
    /// Duplicate digests should not exist, but if they do the most recent
    /// success wins.
    pub fn lookup(&self, digest: &Digest) -> Option<String> {
        for line in self.read_lines() {
            match line.split_once(':') {
                Some((d, job_id)) if d == digest.as_str() => {
                    tracing::debug!(%digest, job_id, "digest found in history");
                    return Some(job_id.to_string());
                }
                Some(_) => {}
                None => tracing::warn!(line, "skipping malformed history line"),
            }
        }
        None
    }

    /// Prepend a `digest:job_id` entry, then truncate to the cap.
    ///
    /// Only called on a miss — a match already has its entry.
    pub fn append(&self, digest: &Digest, job_id: &str) -> Result<(), HistoryLogError> {
        let mut lines = self.read_lines();
        lines.insert(0, format!("{digest}:{job_id}"));
        lines.truncate(self.cap);
        tracing::debug!(%digest, job_id, entries = lines.len(), "appending to history");
        fs::write(&self.path, lines.join("\n") + "\n").map_err(|source| HistoryLogError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Current entries, newest first. An unreadable or missing file degrades
    /// to an empty history: losing cached history costs a skip opportunity,
    /// never the pipeline.
    fn read_lines(&self) -> Vec<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                content.lines().filter(|l| !l.is_empty()).map(String::from).collect()
            }
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), error = %e,
                        "history log unreadable, treating as empty");
                }
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
