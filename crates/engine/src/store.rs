// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The history-store capability: "has this fingerprint succeeded before".

use async_trait::async_trait;
use tg_adapters::ApiError;
use tg_core::Fingerprint;
use tg_history::HistoryLogError;
use thiserror::Error;

/// Errors from a history store. These are fatal to the run: the caller
/// cannot tell "no match" from "could not look" and must not guess.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("jobs api error: {0}")]
    Api(#[from] ApiError),
    #[error("history log error: {0}")]
    Log(#[from] HistoryLogError),
}

/// What a history store knows about a matched job's artifacts.
///
/// The jobs API reports an expiry timestamp while artifacts are retained
/// and omits it once they are purged; the local log stores no artifact
/// metadata at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArtifactAvailability {
    /// No metadata; a fetch may still succeed.
    #[default]
    Unknown,
    /// Artifacts retained until the given timestamp.
    ExpiresAt(String),
    /// The record carries no expiry; the artifacts are gone.
    Expired,
}

/// A past job whose fingerprint matched the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedJob {
    pub id: String,
    /// Human-facing URL of the job, when the store knows one.
    pub web_url: Option<String>,
    pub artifacts: ArtifactAvailability,
}

/// History lookup, implemented by the remote job scan and the local
/// bounded log. Selected by configuration, never mixed within one run.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Search prior history for the fingerprint.
    async fn lookup(&self, fingerprint: &Fingerprint) -> Result<Option<MatchedJob>, StoreError>;

    /// Record a miss so this job's own success becomes findable later.
    /// A match never records — it already exists.
    async fn record_miss(&self, fingerprint: &Fingerprint, job_id: &str)
        -> Result<(), StoreError>;
}
