// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The gate: one idempotent skip-or-run decision per job.
//!
//! Every path through [`Gate::decide`] that reaches the fingerprinting step
//! ends with a marker write, so a re-invocation within the same job settles
//! on the recorded decision without touching git or the history store.

use crate::store::{ArtifactAvailability, HistoryStore, MatchedJob, StoreError};
use tg_adapters::{ArtifactFetcher, TreeAdapter, TreeError};
use tg_core::{ConfigError, Decision, GateConfig};
use tg_history::{Marker, MarkerError};
use thiserror::Error;

/// Fatal runtime failures. The caller maps these to a generic error exit;
/// everything the pipeline is expected to branch on is an [`Outcome`].
#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Marker(#[from] MarkerError),
}

/// Terminal state of one decision cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The job can be skipped. `matched` is present on a fresh history
    /// match and absent when the skip came from the marker or an override.
    Skip { matched: Option<MatchedJob> },
    /// The skip stands but restoring the matched job's artifacts failed.
    SkipArtifactFailed { matched: MatchedJob },
    /// A recorded or forced no-skip decision; nothing was recomputed.
    NoSkipCached,
    /// Fresh lookup found no prior success for this fingerprint.
    NotFound,
    /// Configuration preconditions failed before any filesystem write.
    ConfigError(ConfigError),
    /// The configured paths produce an empty tree listing at HEAD.
    TreeEmpty,
}

/// Decision orchestrator over a tree adapter, a history store, and an
/// artifact fetcher.
#[derive(Debug, Clone)]
pub struct Gate<T, S, F> {
    tree: T,
    store: S,
    artifacts: F,
}

impl<T: TreeAdapter, S: HistoryStore, F: ArtifactFetcher> Gate<T, S, F> {
    pub fn new(tree: T, store: S, artifacts: F) -> Self {
        Self { tree, store, artifacts }
    }

    /// Run one decision cycle.
    ///
    /// Order: forced override, recorded marker, config validation,
    /// fingerprint, history lookup. A fatal error past the validation step
    /// records a best-effort no-skip marker before propagating, so a
    /// re-invocation cannot flip to a skip the failed run never earned.
    pub async fn decide(&self, config: &GateConfig) -> Result<Outcome, GateError> {
        let marker = Marker::new(config.marker_path());

        if let Some(decision) = config.forced {
            tracing::warn!(%decision, "decision forced by override, history not consulted");
            marker.write(decision)?;
            return Ok(cached_outcome(decision));
        }

        if let Some(decision) = marker.read() {
            tracing::info!(%decision, "decision already recorded for this job");
            return Ok(cached_outcome(decision));
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "configuration invalid");
            return Ok(Outcome::ConfigError(e));
        }

        let head = match self.tree.head_revision().await {
            Ok(head) => head,
            Err(e) => return Err(self.fail(&marker, e)),
        };
        let fingerprint = match self.tree.tree_listing(&head, &config.paths).await {
            Ok(fingerprint) => fingerprint,
            Err(TreeError::EmptyTree) => {
                tracing::warn!(revision = %head, "tree listing is empty, refusing to skip");
                marker.write(Decision::Run)?;
                return Ok(Outcome::TreeEmpty);
            }
            Err(e) => return Err(self.fail(&marker, e)),
        };
        tracing::debug!(revision = %head, digest = %fingerprint.digest(), "current fingerprint");

        let matched = match self.store.lookup(&fingerprint).await {
            Ok(matched) => matched,
            Err(e) => return Err(self.fail(&marker, e)),
        };

        match matched {
            Some(matched) => {
                marker.write(Decision::Skip)?;
                tracing::info!(job_id = %matched.id, "tree unchanged since a past success");
                if config.fetch_artifacts {
                    match &matched.artifacts {
                        ArtifactAvailability::Expired => {
                            tracing::debug!(job_id = %matched.id,
                                "matched job has no retained artifacts, skipping restore");
                        }
                        ArtifactAvailability::Unknown | ArtifactAvailability::ExpiresAt(_) => {
                            if let ArtifactAvailability::ExpiresAt(expires_at) = &matched.artifacts
                            {
                                tracing::debug!(job_id = %matched.id, %expires_at,
                                    "restoring artifacts");
                            }
                            if let Err(e) = self.artifacts.fetch(&matched.id).await {
                                tracing::warn!(job_id = %matched.id, error = %e,
                                    "artifact restore failed, the skip stands");
                                return Ok(Outcome::SkipArtifactFailed { matched });
                            }
                        }
                    }
                }
                Ok(Outcome::Skip { matched: Some(matched) })
            }
            None => {
                marker.write(Decision::Run)?;
                if let Err(e) = self.store.record_miss(&fingerprint, &config.job_id).await {
                    // Losing one history entry costs a future skip, not the run.
                    tracing::warn!(error = %e, "failed to record the miss in history");
                }
                Ok(Outcome::NotFound)
            }
        }
    }

    /// Record a best-effort no-skip marker, then hand the error back.
    fn fail(&self, marker: &Marker, error: impl Into<GateError>) -> GateError {
        if let Err(e) = marker.write(Decision::Run) {
            tracing::warn!(error = %e, "failed to record the no-skip marker");
        }
        error.into()
    }
}

fn cached_outcome(decision: Decision) -> Outcome {
    match decision {
        Decision::Skip => Outcome::Skip { matched: None },
        Decision::Run => Outcome::NoSkipCached,
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
