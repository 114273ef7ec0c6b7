// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote job-history strategy: paginated scan of the project's successful
//! jobs, fingerprinting each candidate's revision until one matches.

use crate::store::{ArtifactAvailability, HistoryStore, MatchedJob, StoreError};
use async_trait::async_trait;
use tg_adapters::{JobsApi, TreeAdapter};
use tg_core::{Fingerprint, JobRecord, ScanLimits};

/// How one candidate job compared against the current fingerprint.
///
/// `Unevaluable` (the candidate's revision cannot be fingerprinted, e.g. a
/// rebased-away commit) is logged and then treated exactly like
/// `Mismatched`: one bad revision must not block the whole search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CandidateEval {
    Matched,
    Mismatched,
    Unevaluable,
}

/// Terminal state of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// First match wins; pages are assumed most-recent-first, so this is
    /// the nearest prior success.
    Matched(MatchedJob),
    /// All pages consumed without a match.
    Exhausted,
    /// A work bound tripped before the pages ran out.
    AbortedByLimit,
}

/// History store backed by the CI jobs API.
#[derive(Debug, Clone)]
pub struct RemoteJobScan<A, T> {
    api: A,
    tree: T,
    job_name: String,
    ref_name: Option<String>,
    paths: Vec<String>,
    limits: ScanLimits,
}

impl<A: JobsApi, T: TreeAdapter> RemoteJobScan<A, T> {
    pub fn new(
        api: A,
        tree: T,
        job_name: impl Into<String>,
        ref_name: Option<String>,
        paths: Vec<String>,
        limits: ScanLimits,
    ) -> Self {
        Self { api, tree, job_name: job_name.into(), ref_name, paths, limits }
    }

    async fn evaluate(&self, job: &JobRecord, current: &Fingerprint) -> CandidateEval {
        match self.tree.tree_listing(&job.commit.id, &self.paths).await {
            Ok(listing) if &listing == current => CandidateEval::Matched,
            Ok(_) => CandidateEval::Mismatched,
            Err(e) => {
                tracing::warn!(job_id = job.id, revision = %job.commit.id, error = %e,
                    "candidate fingerprint unevaluable, treating as mismatch");
                CandidateEval::Unevaluable
            }
        }
    }

    /// Walk the job history until a match, exhaustion, or a limit.
    ///
    /// Counters are checked after every inspected job, so a limit can never
    /// be overshot mid-page. There is no external cancellation; these
    /// bounds are the only thing keeping the scan finite.
    pub async fn scan(&self, current: &Fingerprint) -> Result<ScanOutcome, StoreError> {
        let mut jobs_checked: u32 = 0;
        let mut same_job: u32 = 0;
        let mut same_ref: u32 = 0;

        for page in 1..=self.limits.pages {
            let jobs = self.api.successful_jobs(page).await?;
            if jobs.is_empty() {
                break;
            }
            for job in &jobs {
                jobs_checked += 1;
                if job.name == self.job_name && job.status == "success" {
                    match self.evaluate(job, current).await {
                        CandidateEval::Matched => {
                            tracing::info!(job_id = job.id, page, "fingerprint matched past job");
                            // A missing expiry means the artifacts were purged
                            let artifacts = match &job.artifacts_expire_at {
                                Some(expires_at) => {
                                    ArtifactAvailability::ExpiresAt(expires_at.clone())
                                }
                                None => ArtifactAvailability::Expired,
                            };
                            return Ok(ScanOutcome::Matched(MatchedJob {
                                id: job.id.to_string(),
                                web_url: Some(job.web_url.clone()).filter(|u| !u.is_empty()),
                                artifacts,
                            }));
                        }
                        CandidateEval::Mismatched | CandidateEval::Unevaluable => {}
                    }
                    same_job += 1;
                    if self.ref_name.as_deref() == Some(job.job_ref.as_str()) {
                        same_ref += 1;
                    }
                }
                if jobs_checked >= self.limits.jobs
                    || same_job >= self.limits.same_job
                    || same_ref >= self.limits.same_ref
                {
                    tracing::debug!(jobs_checked, same_job, same_ref, "scan aborted by limit");
                    return Ok(ScanOutcome::AbortedByLimit);
                }
            }
            tracing::debug!(page, jobs_checked, same_job, same_ref, "page scanned without match");
        }
        tracing::debug!(jobs_checked, same_job, same_ref, "job history exhausted");
        Ok(ScanOutcome::Exhausted)
    }
}

#[async_trait]
impl<A: JobsApi, T: TreeAdapter> HistoryStore for RemoteJobScan<A, T> {
    async fn lookup(&self, fingerprint: &Fingerprint) -> Result<Option<MatchedJob>, StoreError> {
        match self.scan(fingerprint).await? {
            ScanOutcome::Matched(job) => Ok(Some(job)),
            // Both mean "give up, do not skip"
            ScanOutcome::Exhausted | ScanOutcome::AbortedByLimit => Ok(None),
        }
    }

    async fn record_miss(&self, _: &Fingerprint, _: &str) -> Result<(), StoreError> {
        // The CI system records successful jobs itself; a future scan will
        // see this job once it succeeds.
        Ok(())
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
