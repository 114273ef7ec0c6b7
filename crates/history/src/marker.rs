// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job completion marker.
//!
//! The marker is the idempotency gate: the first invocation in a job writes
//! it, every later invocation in the same job short-circuits on it. The
//! surrounding job environment cleans it up; this crate never deletes it.

use std::fs;
use std::path::{Path, PathBuf};
use tg_core::Decision;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("failed to write marker {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Marker file keyed by (project id, job id).
#[derive(Debug, Clone)]
pub struct Marker {
    path: PathBuf,
}

impl Marker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the recorded decision, if a marker exists.
    ///
    /// An unreadable marker is treated as absent: costing one recomputation
    /// is safer than guessing a decision.
    pub fn read(&self) -> Option<Decision> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let decision = Decision::from_marker(&content);
                tracing::debug!(path = %self.path.display(), %decision, "marker present");
                Some(decision)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "marker unreadable");
                None
            }
        }
    }

    /// Persist the decision. Last write wins; the engine is the only writer
    /// and never writes twice within one decision cycle.
    pub fn write(&self, decision: Decision) -> Result<(), MarkerError> {
        tracing::debug!(path = %self.path.display(), %decision, "writing marker");
        fs::write(&self.path, decision.as_marker()).map_err(|source| MarkerError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "marker_tests.rs"]
mod tests;
